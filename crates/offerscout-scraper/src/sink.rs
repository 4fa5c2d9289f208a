//! Destinations for a successful pipeline's offers document.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::ScraperError;

/// Receives the offers document once every stage has succeeded.
pub trait OfferSink {
    /// # Errors
    ///
    /// Returns [`ScraperError::Persist`] if the document cannot be stored.
    fn persist(&self, offers: &Value) -> Result<(), ScraperError>;
}

/// Writes the document as 4-space indented UTF-8 JSON, non-ASCII kept as-is.
///
/// The document goes to a sibling `.tmp` file first and is renamed over the
/// target once fully flushed, so a failed write never leaves a truncated file.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write(&self, offers: &Value) -> std::io::Result<()> {
        let staging = self.staging_path();
        let written =
            write_pretty(&staging, offers).and_then(|()| fs::rename(&staging, &self.path));
        if written.is_err() {
            fs::remove_file(&staging).ok();
        }
        written
    }
}

fn write_pretty(path: &Path, offers: &Value) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let mut serializer =
        Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    offers.serialize(&mut serializer)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

impl OfferSink for JsonFileSink {
    fn persist(&self, offers: &Value) -> Result<(), ScraperError> {
        self.write(offers).map_err(|source| ScraperError::Persist {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "seller offers saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("offerscout-sink-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn writes_pretty_json_with_unicode() {
        let path = temp_path();
        let sink = JsonFileSink::new(&path);
        let offers = json!({"data": {"sellerName": "Société Générale ✓"}});

        sink.persist(&offers).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(written.contains("Société Générale ✓"), "{written}");
        assert!(written.contains("\n    \"data\""), "{written}");
        let reparsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(reparsed, offers);
    }

    #[test]
    fn replaces_existing_file_without_leaving_staging_file() {
        let path = temp_path();
        std::fs::write(&path, "stale").unwrap();
        let sink = JsonFileSink::new(&path);

        sink.persist(&json!({"data": []})).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let staging_left = sink.staging_path().exists();
        std::fs::remove_file(&path).ok();
        assert!(!written.contains("stale"), "{written}");
        assert!(!staging_left, "staging file should be renamed away");
    }

    #[test]
    fn failed_write_keeps_previous_document() {
        let dir = std::env::temp_dir().join(format!("offerscout-sink-dir-{}", Uuid::new_v4()));
        std::fs::create_dir(&dir).unwrap();
        let path = dir.join("result.json");
        std::fs::write(&path, "previous").unwrap();
        let sink = JsonFileSink::new(&path);
        // A directory in the staging slot makes the staging write fail.
        std::fs::create_dir(sink.staging_path()).unwrap();

        let err = sink.persist(&json!({"data": []})).unwrap_err();

        let kept = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();
        assert!(matches!(err, ScraperError::Persist { .. }), "{err:?}");
        assert_eq!(kept, "previous");
    }

    #[test]
    fn unwritable_path_is_persist_error() {
        let path = std::env::temp_dir()
            .join(format!("offerscout-missing-{}", Uuid::new_v4()))
            .join("result.json");
        let err = JsonFileSink::new(&path).persist(&json!({})).unwrap_err();
        assert!(matches!(err, ScraperError::Persist { .. }), "{err:?}");
    }
}
