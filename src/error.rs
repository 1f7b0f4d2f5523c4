//! Error types for the page pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading records or producing pages
#[derive(Error, Debug)]
pub enum Error {
    /// An input CSV source does not exist
    #[error("Missing input source: {}", path.display())]
    MissingSource { path: PathBuf },

    /// A source row (or its header) lacks a required field or cannot be parsed
    #[error(
        "Malformed row in {}{}: {reason}",
        file.display(),
        row.map(|r| format!(" (row {r})")).unwrap_or_default()
    )]
    MalformedRow {
        file: PathBuf,
        /// 1-based data row number, `None` for header-level problems
        row: Option<usize>,
        reason: String,
    },

    /// An external tool (typesetter or rasterizer) could not be launched
    #[error("Failed to launch external tool `{tool}`: {source}")]
    ExternalTool {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem failure while writing output
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid template or pipeline configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(
        file: impl Into<PathBuf>,
        row: Option<usize>,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedRow {
            file: file.into(),
            row,
            reason: reason.into(),
        }
    }
}
