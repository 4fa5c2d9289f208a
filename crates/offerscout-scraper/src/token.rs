//! Operation token recovery from the sellers panel bundle.
//!
//! 1. Find the seller-info chunk `<script src>` on the product page.
//! 2. Take everything before the static-assets segment as the asset origin and
//!    append the sellers panel bundle path.
//! 3. Fetch that bundle through the session.
//! 4. Scan its `const` object literals for the one naming the operation and
//!    return its `hash`.

use offerscout_core::{OperationToken, SiteProfile};
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::{ScraperError, TokenMiss};
use crate::headers::bundle_headers;
use crate::literal::object_literals;
use crate::product::ProductReference;
use crate::session::Session;

pub struct TokenLocator {
    asset_pattern: Regex,
    script_selector: Selector,
}

impl TokenLocator {
    /// Compiles the seller-info chunk matcher for `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPattern`] if the assembled pattern does
    /// not compile.
    pub fn new(profile: &SiteProfile) -> Result<Self, ScraperError> {
        let pattern = format!(
            r"{segment}static/chunks/{prefix}[a-zA-Z0-9]+\.js$",
            segment = regex::escape(&profile.static_assets_segment),
            prefix = regex::escape(&profile.seller_info_chunk_prefix),
        );
        let asset_pattern = Regex::new(&pattern)?;
        let script_selector = Selector::parse("script[src]").expect("valid selector");
        Ok(Self {
            asset_pattern,
            script_selector,
        })
    }

    /// Returns the `src` of the first script whose path ends with the
    /// seller-info chunk pattern.
    #[must_use]
    pub fn find_asset_reference(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.script_selector)
            .filter_map(|script| script.value().attr("src"))
            .find(|src| self.asset_pattern.is_match(src))
            .map(str::to_owned)
    }

    /// Builds the sellers panel bundle URL from a matched script reference.
    ///
    /// Relative references are resolved against the product page first.
    #[must_use]
    pub fn bundle_url(
        product: &ProductReference,
        profile: &SiteProfile,
        reference: &str,
    ) -> Option<String> {
        let absolute: Url = product.url().join(reference).ok()?;
        let absolute = absolute.as_str();
        let marker = format!("/{}", profile.static_assets_segment);
        let cut = absolute.find(&marker)?;
        Some(format!(
            "{base}{marker}{bundle}",
            base = &absolute[..cut],
            bundle = profile.sellers_panel_bundle,
        ))
    }

    /// Runs the full lookup against an already fetched product page.
    ///
    /// # Errors
    ///
    /// Every lookup failure is a [`ScraperError::TokenNotFound`]; a failed
    /// bundle fetch is reported as [`TokenMiss::BundleFetch`], not as a
    /// page-level fetch failure. An illegal profile header value is
    /// [`ScraperError::InvalidHeader`].
    pub async fn locate(
        &self,
        session: &Session,
        profile: &SiteProfile,
        product: &ProductReference,
        html: &str,
    ) -> Result<OperationToken, ScraperError> {
        let reference = self.find_asset_reference(html).ok_or_else(|| {
            tracing::warn!("required seller-info <script> reference not found");
            TokenMiss::AssetReferenceMissing
        })?;

        let url = Self::bundle_url(product, profile, &reference).ok_or_else(|| {
            tracing::warn!(reference = %reference, "could not derive sellers panel bundle URL");
            TokenMiss::BundleUrl {
                reference: reference.clone(),
            }
        })?;

        let headers = bundle_headers(profile, product.as_str())?;
        let script = session
            .get_text(&url, headers)
            .await
            .map_err(|source| {
                tracing::error!(url = %url, error = %source, "failed to fetch sellers panel bundle");
                TokenMiss::BundleFetch {
                    url: url.clone(),
                    source,
                }
            })?;
        tracing::info!(url = %url, bytes = script.len(), "fetched sellers panel bundle");

        match token_from_bundle(&script, &profile.operation_name) {
            Some(token) => {
                tracing::info!(token = %token, "found operation token");
                Ok(token)
            }
            None => {
                tracing::warn!(
                    operation = %profile.operation_name,
                    "operation token not found in bundle; possibly anti-bot protection"
                );
                Err(TokenMiss::OperationMissing {
                    operation: profile.operation_name.clone(),
                }
                .into())
            }
        }
    }
}

/// Returns the `hash` of the first bundle literal whose `name` is `operation`.
#[must_use]
pub fn token_from_bundle(script: &str, operation: &str) -> Option<OperationToken> {
    object_literals(script)
        .filter(|literal| literal.get("name").and_then(Value::as_str) == Some(operation))
        .find_map(|literal| {
            literal
                .get("hash")
                .and_then(Value::as_str)
                .and_then(OperationToken::new)
        })
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
