use thiserror::Error;

/// Unified error type for the entire portfolio-tracker-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Storage / File ──────────────────────────────────────────────
    #[error("Corrupt portfolio file: {0}")]
    CorruptState(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Price not available for {symbol}: {reason}")]
    PriceUnavailable {
        symbol: String,
        reason: String,
    },

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Asset validation failed: {0}")]
    ValidationError(String),

    #[error("Asset not found in portfolio: {0}")]
    AssetNotFound(String),
}

impl CoreError {
    /// User-facing outcomes the caller reports and moves on from,
    /// as opposed to broken state or I/O failures.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoreError::PriceUnavailable { .. }
                | CoreError::AssetNotFound(_)
                | CoreError::ValidationError(_)
        )
    }

    /// Symbol the error refers to, when there is one.
    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        match self {
            CoreError::PriceUnavailable { symbol, .. } => Some(symbol.as_str()),
            CoreError::AssetNotFound(symbol) => Some(symbol.as_str()),
            _ => None,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        // Anything serde can't map onto the record shape is a broken file,
        // except for writer failures which surface as I/O.
        if e.is_io() {
            CoreError::FileIO(e.to_string())
        } else {
            CoreError::CorruptState(e.to_string())
        }
    }
}
