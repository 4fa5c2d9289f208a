//! Sequential page → identifier → token → offers pipeline.

use std::time::{Duration, Instant};

use offerscout_core::{AppConfig, OperationToken, SiteProfile, Sku};
use serde_json::Value;
use tracing::Instrument;

use crate::error::ScraperError;
use crate::identifier::extract_identifier;
use crate::offers::request_offers;
use crate::page::fetch_page;
use crate::product::ProductReference;
use crate::session::Session;
use crate::sink::OfferSink;
use crate::token::TokenLocator;

/// Result of a fully successful run.
#[derive(Debug, Clone)]
pub struct OfferReport {
    pub sku: Sku,
    pub token: OperationToken,
    pub offers: Value,
    /// Wall-clock time from the page fetch through the offers response.
    pub elapsed: Duration,
}

/// Owns the session and runs the four stages for one product page.
///
/// Each stage needs its predecessor's output; the first failure ends the run
/// and nothing partial is returned.
pub struct OfferPipeline {
    product: ProductReference,
    profile: SiteProfile,
    session: Session,
    locator: TokenLocator,
}

impl OfferPipeline {
    /// # Errors
    ///
    /// Returns a setup-stage [`ScraperError`] if `product_url` is not an
    /// absolute http(s) URL or the session cannot be built.
    pub fn new(product_url: &str, config: &AppConfig) -> Result<Self, ScraperError> {
        let product = ProductReference::parse(product_url)?;
        let session = Session::new(config)?;
        let locator = TokenLocator::new(&config.profile)?;
        Ok(Self {
            product,
            profile: config.profile.clone(),
            session,
            locator,
        })
    }

    /// Runs all four stages and returns the offers document.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure; [`ScraperError::stage`] names it.
    pub async fn run(&self) -> Result<OfferReport, ScraperError> {
        let span = tracing::info_span!("offer_pipeline", product_url = %self.product);
        self.run_stages().instrument(span).await
    }

    /// Runs the pipeline and hands the offers document to `sink`.
    ///
    /// `sink` is only called after every stage succeeded.
    ///
    /// # Errors
    ///
    /// Returns the first stage failure, or [`ScraperError::Persist`] from the sink.
    pub async fn run_into<S: OfferSink + ?Sized>(
        &self,
        sink: &S,
    ) -> Result<OfferReport, ScraperError> {
        let report = self.run().await?;
        sink.persist(&report.offers)?;
        Ok(report)
    }

    async fn run_stages(&self) -> Result<OfferReport, ScraperError> {
        let started = Instant::now();

        let html = fetch_page(&self.session, &self.profile, &self.product).await?;
        let sku = extract_identifier(&html)?;
        let token = self
            .locator
            .locate(&self.session, &self.profile, &self.product, &html)
            .await?;

        let origin = self
            .profile
            .api_origin
            .clone()
            .unwrap_or_else(|| self.product.origin());
        let offers = request_offers(&self.session, &self.profile, &origin, &sku, &token).await?;

        let elapsed = started.elapsed();
        tracing::info!(
            sku = %sku,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "pipeline complete"
        );
        Ok(OfferReport {
            sku,
            token,
            offers,
            elapsed,
        })
    }
}
