use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::CoreError;
use crate::models::portfolio::Portfolio;

/// Indent used for the human-readable `portfolio.json`.
pub const JSON_INDENT: &[u8] = b"    ";

/// High-level storage operations: save/load portfolio to/from JSON bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a portfolio to pretty-printed JSON.
    ///
    /// Output: `[{"symbol": .., "quantity": .., "buy_price": ..}, ...]`,
    /// four-space indent, fields in that order.
    ///
    /// Every holding must pass [`Asset::validate`](crate::models::asset::Asset::validate);
    /// a file that could not be loaded back is never produced.
    pub fn save_to_bytes(portfolio: &Portfolio) -> Result<Vec<u8>, CoreError> {
        for asset in portfolio.holdings() {
            asset.validate()?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        portfolio
            .serialize(&mut serializer)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolio: {e}")))?;
        Ok(buf)
    }

    /// Parse a portfolio from JSON bytes.
    ///
    /// The whole document must be an array of valid records; one bad entry
    /// fails the load with `CorruptState` rather than yielding a partial list.
    pub fn load_from_bytes(data: &[u8]) -> Result<Portfolio, CoreError> {
        serde_json::from_slice(data)
            .map_err(|e| CoreError::CorruptState(format!("Failed to parse portfolio: {e}")))
    }

    /// Replace `path` with the serialized portfolio.
    ///
    /// The bytes go to a temporary file in the same directory which is then
    /// renamed over `path`, so a failed save leaves the previous file intact.
    pub fn save_to_file(portfolio: &Portfolio, path: impl AsRef<Path>) -> Result<(), CoreError> {
        let path = path.as_ref();
        let bytes = Self::save_to_bytes(portfolio)?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        // On failure the temp file is dropped and removed.
        tmp.persist(path).map_err(|e| CoreError::from(e.error))?;
        info!(path = %path.display(), holdings = portfolio.len(), "saved portfolio");
        Ok(())
    }

    /// Load a portfolio from `path`. A missing file is `Ok(None)`, not an error.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Option<Portfolio>, CoreError> {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "no saved portfolio, starting empty");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let portfolio = Self::load_from_bytes(&bytes)?;
        info!(path = %path.display(), holdings = portfolio.len(), "loaded portfolio");
        Ok(Some(portfolio))
    }
}
