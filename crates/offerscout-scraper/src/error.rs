use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline step a [`ScraperError`] originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Setup,
    Page,
    Identifier,
    Token,
    Offers,
    Persist,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Setup => "setup",
            PipelineStage::Page => "product page",
            PipelineStage::Identifier => "identifier extraction",
            PipelineStage::Token => "token lookup",
            PipelineStage::Offers => "seller offers",
            PipelineStage::Persist => "persistence",
        };
        f.write_str(name)
    }
}

/// Outcome of a single GET that did not produce a usable body.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Why the structured-data block did not yield a product identifier.
#[derive(Debug, Error)]
pub enum IdentifierMiss {
    #[error("product schema block not present in page")]
    BlockMissing,

    #[error("product schema block is not valid JSON: {0}")]
    Malformed(String),

    #[error("product schema block has no sku field")]
    FieldMissing,
}

/// Why the operation token could not be recovered.
#[derive(Debug, Error)]
pub enum TokenMiss {
    #[error("seller-info script reference not present in page")]
    AssetReferenceMissing,

    #[error("could not derive sellers panel bundle URL from \"{reference}\"")]
    BundleUrl { reference: String },

    #[error("fetching bundle {url} failed: {source}")]
    BundleFetch {
        url: String,
        #[source]
        source: RequestError,
    },

    #[error("no object literal in bundle names operation {operation}")]
    OperationMissing { operation: String },
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("{stage} request to {url} failed: {source}")]
    FetchFailure {
        stage: PipelineStage,
        url: String,
        #[source]
        source: RequestError,
    },

    #[error("product identifier not found: {0}")]
    IdentifierNotFound(IdentifierMiss),

    #[error("operation token not found: {0}")]
    TokenNotFound(TokenMiss),

    #[error("offers response from {url} is not valid JSON: {source}")]
    ResponseParseFailure {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode offer query variables: {0}")]
    EncodeVariables(#[source] serde_json::Error),

    #[error("invalid product URL \"{url}\": {reason}")]
    InvalidProductUrl { url: String, reason: String },

    #[error("failed to build HTTP session: {0}")]
    Client(#[source] reqwest::Error),

    #[error("profile value for header {name} is not a legal header value")]
    InvalidHeader {
        name: reqwest::header::HeaderName,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("invalid asset pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("failed to write offers to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScraperError {
    /// The stage that failed, for operator-facing reporting.
    #[must_use]
    pub fn stage(&self) -> PipelineStage {
        match self {
            ScraperError::FetchFailure { stage, .. } => *stage,
            ScraperError::IdentifierNotFound(_) => PipelineStage::Identifier,
            ScraperError::TokenNotFound(_) => PipelineStage::Token,
            ScraperError::ResponseParseFailure { .. } | ScraperError::EncodeVariables(_) => {
                PipelineStage::Offers
            }
            ScraperError::InvalidProductUrl { .. }
            | ScraperError::Client(_)
            | ScraperError::InvalidHeader { .. }
            | ScraperError::InvalidPattern(_) => PipelineStage::Setup,
            ScraperError::Persist { .. } => PipelineStage::Persist,
        }
    }
}

impl From<IdentifierMiss> for ScraperError {
    fn from(miss: IdentifierMiss) -> Self {
        ScraperError::IdentifierNotFound(miss)
    }
}

impl From<TokenMiss> for ScraperError {
    fn from(miss: TokenMiss) -> Self {
        ScraperError::TokenNotFound(miss)
    }
}
