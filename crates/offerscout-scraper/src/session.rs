//! Shared HTTP session for the pipeline's three sequential requests.

use std::time::Duration;

use offerscout_core::AppConfig;
use reqwest::header::HeaderMap;
use reqwest::{redirect, Client};

use crate::error::{RequestError, ScraperError};

const REDIRECT_LIMIT: usize = 10;

/// Cookie-carrying client context. One per pipeline; never shared.
pub struct Session {
    client: Client,
}

impl Session {
    /// Builds the session with the configured timeouts and a cookie jar so
    /// cookies set by the product page ride along on the later requests.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::limited(REDIRECT_LIMIT))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(ScraperError::Client)?;
        Ok(Self { client })
    }

    /// Issues one GET and returns the body as text.
    ///
    /// Redirects are followed; a final 4xx/5xx status is a failure.
    pub(crate) async fn get_text(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<String, RequestError> {
        let response = self.client.get(url).headers(headers).send().await?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            tracing::debug!(url, status = status.as_u16(), "request returned error status");
            return Err(RequestError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}
