//! Error types surfaced at the library boundary.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failure while loading the catalog. Fatal to initialization: the host
/// presents a retry affordance instead of a partial UI.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read data source {path}: {reason}")]
    Unreachable { path: Utf8PathBuf, reason: String },
    #[error("failed to parse data source {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid record #{index} in {path}: {reason}")]
    InvalidRecord {
        path: Utf8PathBuf,
        index: usize,
        reason: String,
    },
}

impl LoadError {
    /// Path of the data source that failed.
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            LoadError::Unreachable { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::InvalidRecord { path, .. } => path,
        }
    }
}

/// Copying failed on every available mechanism.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("no clipboard mechanism is available")]
    NoMechanism,
    #[error("copy failed on every clipboard mechanism: {}", .attempts.join("; "))]
    AllFailed { attempts: Vec<String> },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
