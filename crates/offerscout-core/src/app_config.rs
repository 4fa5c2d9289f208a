use std::path::PathBuf;

use crate::profile::SiteProfile;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Whole-request timeout applied to every pipeline GET.
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Where the CLI writes the offers document on success.
    pub output_path: PathBuf,
    pub profile: SiteProfile,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("output_path", &self.output_path)
            .field("operation_name", &self.profile.operation_name)
            .field("sellers_panel_bundle", &self.profile.sellers_panel_bundle)
            .field("api_origin", &self.profile.api_origin)
            .field("correlation_id", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            output_path: PathBuf::from("result.json"),
            profile: SiteProfile::default(),
        }
    }
}
