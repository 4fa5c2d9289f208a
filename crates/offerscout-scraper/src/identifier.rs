//! Product identifier extraction from the page's schema.org JSON-LD block.

use std::sync::LazyLock;

use offerscout_core::Sku;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::IdentifierMiss;

static PRODUCT_SCHEMA_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"][data-seo-id="schema-org-product"]"#)
        .expect("valid selector")
});

/// Extracts the canonical product identifier (`sku`) from the product schema
/// block.
///
/// The block may hold a single object, a list of objects, or an `@graph`
/// container; the first entry carrying a usable `sku` wins.
///
/// # Errors
///
/// - [`IdentifierMiss::BlockMissing`] when the page has no product schema block.
/// - [`IdentifierMiss::Malformed`] when its text is not JSON.
/// - [`IdentifierMiss::FieldMissing`] when no entry carries a non-empty `sku`.
pub fn extract_identifier(html: &str) -> Result<Sku, IdentifierMiss> {
    let block = product_schema_text(html).ok_or_else(|| {
        tracing::warn!("JSON-LD script tag with product schema not found");
        IdentifierMiss::BlockMissing
    })?;

    let document: Value = serde_json::from_str(block.trim()).map_err(|e| {
        tracing::error!(error = %e, "product schema block is not valid JSON");
        IdentifierMiss::Malformed(e.to_string())
    })?;

    match sku_from_document(&document) {
        Some(sku) => {
            tracing::info!(sku = %sku, "found product identifier");
            Ok(sku)
        }
        None => {
            tracing::warn!("sku field not found in product schema");
            Err(IdentifierMiss::FieldMissing)
        }
    }
}

fn product_schema_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let element = document.select(&PRODUCT_SCHEMA_SELECTOR).next()?;
    Some(element.text().collect())
}

fn sku_from_document(document: &Value) -> Option<Sku> {
    match document {
        Value::Array(items) => items.iter().find_map(sku_from_entry),
        Value::Object(_) => sku_from_entry(document).or_else(|| {
            document
                .get("@graph")
                .and_then(Value::as_array)
                .and_then(|graph| graph.iter().find_map(sku_from_entry))
        }),
        _ => None,
    }
}

/// `sku` may be published as a string or a bare number.
fn sku_from_entry(entry: &Value) -> Option<Sku> {
    match entry.get("sku")? {
        Value::String(s) => Sku::new(s),
        Value::Number(n) => Sku::new(&n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "identifier_test.rs"]
mod tests;
