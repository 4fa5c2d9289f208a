//! Header templates for the pipeline's three requests.
//!
//! Each request gets its own fixed set, filled from [`SiteProfile`] so the
//! values can be refreshed without touching request logic. A profile value
//! that is not a legal header value fails the build with
//! [`ScraperError::InvalidHeader`]; no header is ever silently left out.

use offerscout_core::SiteProfile;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE,
    PRAGMA, REFERER, USER_AGENT,
};

use crate::error::ScraperError;

const SEC_CH_UA: HeaderName = HeaderName::from_static("sec-ch-ua");
const SEC_CH_UA_MOBILE: HeaderName = HeaderName::from_static("sec-ch-ua-mobile");
const SEC_CH_UA_PLATFORM: HeaderName = HeaderName::from_static("sec-ch-ua-platform");
const SEC_FETCH_DEST: HeaderName = HeaderName::from_static("sec-fetch-dest");
const SEC_FETCH_MODE: HeaderName = HeaderName::from_static("sec-fetch-mode");
const SEC_FETCH_SITE: HeaderName = HeaderName::from_static("sec-fetch-site");

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), ScraperError> {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
            Ok(())
        }
        Err(source) => {
            tracing::error!(header = %name, "profile value is not a legal header value");
            Err(ScraperError::InvalidHeader { name, source })
        }
    }
}

fn client_hints(headers: &mut HeaderMap, profile: &SiteProfile) -> Result<(), ScraperError> {
    insert(headers, SEC_CH_UA, &profile.sec_ch_ua)?;
    headers.insert(SEC_CH_UA_MOBILE, HeaderValue::from_static("?0"));
    insert(headers, SEC_CH_UA_PLATFORM, &profile.sec_ch_ua_platform)
}

/// Headers for the product page GET.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidHeader`] for an illegal profile value.
pub fn page_headers(profile: &SiteProfile, referer: &str) -> Result<HeaderMap, ScraperError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    insert(&mut headers, ACCEPT_LANGUAGE, &profile.page_accept_language)?;
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    insert(&mut headers, REFERER, referer)?;
    client_hints(&mut headers, profile)?;
    headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("script"));
    headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("no-cors"));
    headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("cross-site"));
    headers.insert(
        HeaderName::from_static("sec-fetch-storage-access"),
        HeaderValue::from_static("active"),
    );
    insert(&mut headers, USER_AGENT, &profile.user_agent)?;
    Ok(headers)
}

/// Headers for the sellers panel bundle GET.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidHeader`] for an illegal profile value.
pub fn bundle_headers(profile: &SiteProfile, referer: &str) -> Result<HeaderMap, ScraperError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    insert(&mut headers, REFERER, referer)?;
    insert(&mut headers, USER_AGENT, &profile.user_agent)?;
    Ok(headers)
}

/// Headers for the offers API GET.
///
/// `page_url` is the fully built API URL; the origin expects it echoed in
/// both `referer` and `wm_page_url`. `baggage` carries the per-call session
/// correlation values.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidHeader`] for an illegal profile value.
pub fn offers_headers(
    profile: &SiteProfile,
    page_url: &str,
    baggage: &str,
) -> Result<HeaderMap, ScraperError> {
    let operation = profile.operation_name.as_str();
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        HeaderName::from_static("downlink"),
        HeaderValue::from_static("10"),
    );
    headers.insert(HeaderName::from_static("dpr"), HeaderValue::from_static("1"));
    insert(&mut headers, HeaderName::from_static("baggage"), baggage)?;
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(
        HeaderName::from_static("priority"),
        HeaderValue::from_static("u=1, i"),
    );
    insert(&mut headers, REFERER, page_url)?;
    client_hints(&mut headers, profile)?;
    headers.insert(SEC_FETCH_DEST, HeaderValue::from_static("empty"));
    headers.insert(SEC_FETCH_MODE, HeaderValue::from_static("cors"));
    headers.insert(SEC_FETCH_SITE, HeaderValue::from_static("same-origin"));
    insert(&mut headers, USER_AGENT, &profile.user_agent)?;

    headers.insert(HeaderName::from_static("wm_mp"), HeaderValue::from_static("true"));
    insert(&mut headers, HeaderName::from_static("wm_page_url"), page_url)?;
    insert(
        &mut headers,
        HeaderName::from_static("wm_qos.correlation_id"),
        &profile.correlation_id,
    )?;
    insert(
        &mut headers,
        HeaderName::from_static("x-apollo-operation-name"),
        operation,
    )?;
    headers.insert(
        HeaderName::from_static("x-enable-server-timing"),
        HeaderValue::from_static("1"),
    );
    headers.insert(
        HeaderName::from_static("x-latency-trace"),
        HeaderValue::from_static("1"),
    );
    insert(
        &mut headers,
        HeaderName::from_static("x-o-bu"),
        &profile.business_unit,
    )?;
    headers.insert(
        HeaderName::from_static("x-o-ccm"),
        HeaderValue::from_static("server"),
    );
    insert(
        &mut headers,
        HeaderName::from_static("x-o-correlation-id"),
        &profile.correlation_id,
    )?;
    insert(
        &mut headers,
        HeaderName::from_static("x-o-gql-query"),
        &format!("query {operation}"),
    )?;
    insert(&mut headers, HeaderName::from_static("x-o-mart"), &profile.mart)?;
    insert(
        &mut headers,
        HeaderName::from_static("x-o-platform"),
        &profile.platform,
    )?;
    insert(
        &mut headers,
        HeaderName::from_static("x-o-platform-version"),
        &profile.platform_version,
    )?;
    insert(
        &mut headers,
        HeaderName::from_static("x-o-segment"),
        &profile.segment,
    )?;
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn page_headers_look_like_browser() {
        let profile = SiteProfile::default();
        let headers = page_headers(&profile, "https://www.walmart.com/").unwrap();
        assert_eq!(header(&headers, "referer"), Some("https://www.walmart.com/"));
        assert_eq!(header(&headers, "cache-control"), Some("no-cache"));
        assert_eq!(header(&headers, "sec-ch-ua-mobile"), Some("?0"));
        assert!(headers.contains_key("sec-fetch-mode"));
        assert_eq!(
            header(&headers, "user-agent"),
            Some(profile.user_agent.as_str())
        );
    }

    #[test]
    fn bundle_headers_are_minimal() {
        let profile = SiteProfile::default();
        let headers = bundle_headers(&profile, "https://www.walmart.com/ip/1").unwrap();
        assert_eq!(headers.len(), 3);
        assert_eq!(header(&headers, "referer"), Some("https://www.walmart.com/ip/1"));
    }

    #[test]
    fn offers_headers_share_correlation_id() {
        let profile = SiteProfile::default();
        let headers = offers_headers(&profile, "https://www.walmart.com/api", "a=b").unwrap();
        assert_eq!(
            header(&headers, "wm_qos.correlation_id"),
            header(&headers, "x-o-correlation-id")
        );
        assert_eq!(
            header(&headers, "x-o-correlation-id"),
            Some(profile.correlation_id.as_str())
        );
        assert_eq!(
            header(&headers, "x-apollo-operation-name"),
            Some("GetAllSellerOffers")
        );
        assert_eq!(
            header(&headers, "x-o-gql-query"),
            Some("query GetAllSellerOffers")
        );
        assert_eq!(header(&headers, "wm_page_url"), Some("https://www.walmart.com/api"));
        assert_eq!(header(&headers, "baggage"), Some("a=b"));
        assert_eq!(header(&headers, "x-o-bu"), Some("WALMART-US"));
    }

    #[test]
    fn invalid_profile_value_fails_instead_of_dropping_header() {
        let profile = SiteProfile {
            correlation_id: "bad\nvalue".to_string(),
            ..SiteProfile::default()
        };
        let err = offers_headers(&profile, "https://www.walmart.com/api", "a=b").unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidHeader { ref name, .. } if name == "wm_qos.correlation_id"),
            "{err:?}"
        );
        assert_eq!(err.stage(), crate::error::PipelineStage::Setup);
    }

    #[test]
    fn invalid_user_agent_fails_page_headers() {
        let profile = SiteProfile {
            user_agent: "agent\r\n".to_string(),
            ..SiteProfile::default()
        };
        assert!(page_headers(&profile, "https://www.walmart.com/").is_err());
        assert!(bundle_headers(&profile, "https://www.walmart.com/ip/1").is_err());
    }
}
