//! Error types for header generation.
//!
//! Every failure is fatal for a generation run: nothing here is retried, and
//! the binary surfaces the error and exits non-zero.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors raised while resolving configuration or committing a header to disk.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Reading, creating or writing a path failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The buffered temp file could not be renamed over the target
    #[error("failed to persist generated header to {path:?}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The existing target file is marked read-only
    #[error("refusing to overwrite read-only file {path:?}")]
    ReadOnly { path: PathBuf },

    /// A repetition count that is not a non-negative integer
    #[error("invalid repetition count '{raw}': expected a non-negative decimal or 0x-prefixed hex integer")]
    InvalidCount { raw: String },

    /// Configuration could not be loaded or resolved
    #[error("configuration error: {0}")]
    Config(String),

    /// `--check` found a header whose content differs from what would be generated
    #[error("generated header {path:?} is out of date")]
    StaleHeader { path: PathBuf },

    /// `--check` found no header at the expected path
    #[error("generated header {path:?} does not exist")]
    MissingHeader { path: PathBuf },
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-friendly label used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorError::Io { .. } => "io",
            GeneratorError::Persist { .. } => "persist",
            GeneratorError::ReadOnly { .. } => "read_only",
            GeneratorError::InvalidCount { .. } => "invalid_count",
            GeneratorError::Config(_) => "config",
            GeneratorError::StaleHeader { .. } => "stale_header",
            GeneratorError::MissingHeader { .. } => "missing_header",
        }
    }
}
