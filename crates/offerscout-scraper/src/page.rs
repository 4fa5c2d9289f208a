//! Product page fetch.

use offerscout_core::SiteProfile;

use crate::error::{PipelineStage, ScraperError};
use crate::headers::page_headers;
use crate::product::ProductReference;
use crate::session::Session;

/// Fetches the product page HTML with a browser-like header set.
///
/// Single attempt. Cookies set by the response stay in `session`.
///
/// # Errors
///
/// Returns [`ScraperError::FetchFailure`] for network errors and 4xx/5xx
/// statuses alike, or [`ScraperError::InvalidHeader`] before sending anything.
pub async fn fetch_page(
    session: &Session,
    profile: &SiteProfile,
    product: &ProductReference,
) -> Result<String, ScraperError> {
    let url = product.as_str();
    let referer = format!("{}/", product.origin());

    let headers = page_headers(profile, &referer)?;

    match session.get_text(url, headers).await {
        Ok(html) => {
            tracing::info!(url, bytes = html.len(), "fetched product page");
            Ok(html)
        }
        Err(source) => {
            tracing::error!(url, error = %source, "failed to fetch product page");
            Err(ScraperError::FetchFailure {
                stage: PipelineStage::Page,
                url: url.to_owned(),
                source,
            })
        }
    }
}
