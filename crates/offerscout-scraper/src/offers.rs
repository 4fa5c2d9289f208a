//! Seller offers request against the origin's persisted-query API.

use std::fmt;

use offerscout_core::{OperationToken, SiteProfile, Sku};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{PipelineStage, ScraperError};
use crate::headers::offers_headers;
use crate::session::Session;

/// Length of the `isomorphicSessionId` baggage value.
pub const SESSION_ID_LEN: usize = 20;

const SESSION_ID_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_";

/// Everything except unreserved characters and `/` is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Query variables, serialized compactly in declaration order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OfferVariables<'a> {
    item_id: &'a str,
    is_subscription_eligible: bool,
    condition_codes: &'a [u32],
    all_offers_source: &'a str,
}

/// `baggage` header content: fixed trace metadata plus per-call session values.
struct Baggage<'a> {
    profile: &'a SiteProfile,
    session_id: String,
    render_view_id: Uuid,
}

impl fmt::Display for Baggage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.profile;
        write!(
            f,
            "trafficType={},deviceType={},renderScope={},webRequestSource={},pageName={},isomorphicSessionId={},renderViewId={}",
            p.traffic_type,
            p.device_type,
            p.render_scope,
            p.web_request_source,
            p.page_name,
            self.session_id,
            self.render_view_id,
        )
    }
}

/// Generates a session correlation string of `len` characters drawn from
/// ASCII letters, digits, and `_` using the thread-local CSPRNG.
#[must_use]
pub fn generate_session_id(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(SESSION_ID_ALPHABET[rng.random_range(0..SESSION_ID_ALPHABET.len())]))
        .collect()
}

/// Builds `<origin>/<api_path>/<operation>/<token>?variables=<encoded>`.
///
/// # Errors
///
/// Returns [`ScraperError::EncodeVariables`] if the variables fail to serialize.
pub fn build_offers_url(
    origin: &str,
    profile: &SiteProfile,
    sku: &Sku,
    token: &OperationToken,
) -> Result<String, ScraperError> {
    let variables = OfferVariables {
        item_id: sku.as_str(),
        is_subscription_eligible: profile.subscription_eligible,
        condition_codes: &profile.condition_codes,
        all_offers_source: &profile.offers_source,
    };
    let compact = serde_json::to_string(&variables).map_err(ScraperError::EncodeVariables)?;
    let encoded = utf8_percent_encode(&compact, QUERY_VALUE);

    Ok(format!(
        "{origin}/{api_path}/{operation}/{token}?variables={encoded}",
        origin = origin.trim_end_matches('/'),
        api_path = profile.api_path.trim_matches('/'),
        operation = profile.operation_name,
    ))
}

/// Requests all seller offers for `sku` and returns the parsed response.
///
/// A fresh session id and render view id are generated for every call.
///
/// # Errors
///
/// - [`ScraperError::FetchFailure`] on network errors or 4xx/5xx statuses.
/// - [`ScraperError::ResponseParseFailure`] if the body is not JSON.
/// - [`ScraperError::InvalidHeader`] if a profile value cannot be sent.
pub async fn request_offers(
    session: &Session,
    profile: &SiteProfile,
    origin: &str,
    sku: &Sku,
    token: &OperationToken,
) -> Result<serde_json::Value, ScraperError> {
    let url = build_offers_url(origin, profile, sku, token)?;
    let baggage = Baggage {
        profile,
        session_id: generate_session_id(SESSION_ID_LEN),
        render_view_id: Uuid::new_v4(),
    }
    .to_string();

    let headers = offers_headers(profile, &url, &baggage)?;

    let body = session
        .get_text(&url, headers)
        .await
        .map_err(|source| {
            tracing::error!(url = %url, error = %source, "failed to fetch seller offers");
            ScraperError::FetchFailure {
                stage: PipelineStage::Offers,
                url: url.clone(),
                source,
            }
        })?;

    let offers = serde_json::from_str(&body).map_err(|source| {
        tracing::error!(url = %url, error = %source, "seller offers response is not JSON");
        ScraperError::ResponseParseFailure {
            url: url.clone(),
            source,
        }
    })?;
    tracing::info!(sku = %sku, "fetched seller offers");
    Ok(offers)
}

#[cfg(test)]
#[path = "offers_test.rs"]
mod tests;
