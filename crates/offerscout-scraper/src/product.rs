//! Validated product page reference.

use std::fmt;

use reqwest::Url;

use crate::error::ScraperError;

/// Absolute http(s) URL of the product page. Fixed for the pipeline's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductReference(Url);

impl ProductReference {
    /// Parses and validates a product page URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidProductUrl`] for relative URLs, non-http(s)
    /// schemes, or URLs without a host.
    pub fn parse(raw: &str) -> Result<Self, ScraperError> {
        let raw = raw.trim();
        let invalid = |reason: String| ScraperError::InvalidProductUrl {
            url: raw.to_owned(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        Ok(Self(url))
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Scheme+host(+port) origin, e.g. `https://www.walmart.com`.
    #[must_use]
    pub fn origin(&self) -> String {
        self.0.origin().ascii_serialization()
    }
}

impl fmt::Display for ProductReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_product_url_and_origin() {
        let product =
            ProductReference::parse("https://www.walmart.com/ip/LEGO-Technic-tbd-42200/6924164794")
                .unwrap();
        assert_eq!(product.origin(), "https://www.walmart.com");
    }

    #[test]
    fn origin_keeps_non_default_port() {
        let product = ProductReference::parse("http://127.0.0.1:8080/ip/1").unwrap();
        assert_eq!(product.origin(), "http://127.0.0.1:8080");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let product = ProductReference::parse("  https://www.walmart.com/ip/1\n").unwrap();
        assert_eq!(product.as_str(), "https://www.walmart.com/ip/1");
    }

    #[test]
    fn rejects_relative_url() {
        let err = ProductReference::parse("/ip/6924164794").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidProductUrl { .. }), "{err:?}");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ProductReference::parse("ftp://www.walmart.com/ip/1").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidProductUrl { .. }), "{err:?}");
    }
}
