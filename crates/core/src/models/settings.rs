use std::path::PathBuf;
use std::time::Duration;

/// File name used when no explicit path is given.
pub const DEFAULT_DATA_FILE: &str = "portfolio.json";

/// Upper bound on a single price request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime settings for a tracker instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Where holdings are persisted (relative paths resolve against the cwd).
    pub data_file: PathBuf,

    /// Timeout applied to each outbound price request.
    pub request_timeout: Duration,
}

impl TrackerConfig {
    pub fn with_data_file(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
            ..Self::default()
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
