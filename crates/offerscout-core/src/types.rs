//! Opaque identifiers passed between pipeline stages.

use std::fmt;

/// Canonical product identifier recovered from the page's structured data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sku(String);

impl Sku {
    /// Wraps `raw` after trimming. Returns `None` for empty input so a blank
    /// identifier can never reach the offers stage.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted-query hash authorizing one named backend operation.
///
/// Tied to a single build of the origin's client bundle; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationToken(String);

impl OperationToken {
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sku_trims_whitespace() {
        assert_eq!(Sku::new("  6924164794 ").unwrap().as_str(), "6924164794");
    }

    #[test]
    fn sku_rejects_blank() {
        assert!(Sku::new("").is_none());
        assert!(Sku::new("   ").is_none());
    }

    #[test]
    fn token_displays_raw_value() {
        let token = OperationToken::new("abc123").unwrap();
        assert_eq!(token.to_string(), "abc123");
    }

    #[test]
    fn token_rejects_blank() {
        assert!(OperationToken::new("\n").is_none());
    }
}
