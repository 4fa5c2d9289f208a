use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; anything unset falls back to [`AppConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_secs = |var: &str, default: u64| -> Result<u64, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let secs = raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(secs)
    };

    let log_level = or_default("OFFERSCOUT_LOG_LEVEL", &defaults.log_level);
    let request_timeout_secs =
        parse_secs("OFFERSCOUT_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let connect_timeout_secs =
        parse_secs("OFFERSCOUT_CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs)?;
    let output_path = lookup("OFFERSCOUT_OUTPUT_PATH").map_or(defaults.output_path, PathBuf::from);

    let header_value = |var: &str| -> Result<Option<String>, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(None);
        };
        check_header_value(var, &raw)?;
        Ok(Some(raw))
    };

    let mut profile = defaults.profile;
    if let Some(user_agent) = header_value("OFFERSCOUT_USER_AGENT")? {
        profile.user_agent = user_agent;
    }
    if let Ok(bundle) = lookup("OFFERSCOUT_SELLERS_PANEL_BUNDLE") {
        profile.sellers_panel_bundle = bundle.trim_start_matches('/').to_string();
    }
    if let Some(operation) = header_value("OFFERSCOUT_OPERATION_NAME")? {
        profile.operation_name = operation;
    }
    if let Ok(origin) = lookup("OFFERSCOUT_API_ORIGIN") {
        let origin = origin.trim().trim_end_matches('/');
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar {
                var: "OFFERSCOUT_API_ORIGIN".to_string(),
                reason: format!("\"{origin}\" is not an http(s) origin"),
            });
        }
        profile.api_origin = Some(origin.to_string());
    }
    if let Some(correlation_id) = header_value("OFFERSCOUT_CORRELATION_ID")? {
        profile.correlation_id = correlation_id;
    }
    if let Some(platform_version) = header_value("OFFERSCOUT_PLATFORM_VERSION")? {
        profile.platform_version = platform_version;
    }

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        connect_timeout_secs,
        output_path,
        profile,
    })
}

/// Rejects values that cannot be sent as an HTTP header value.
///
/// Same rule as `http::HeaderValue::from_str`: control characters other
/// than horizontal tab are not allowed.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` naming `var` on the first bad byte.
fn check_header_value(var: &str, value: &str) -> Result<(), ConfigError> {
    match value.bytes().position(|b| (b < 0x20 && b != b'\t') || b == 0x7f) {
        None => Ok(()),
        Some(index) => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("control character at byte {index} is not allowed in a header value"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
