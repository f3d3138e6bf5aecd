//! Error types for the imsakia converter.
//!
//! Library crates use [`ImsakiaError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for reporting.

use std::path::PathBuf;

/// Top-level error type for all conversion operations.
#[derive(Debug, thiserror::Error)]
pub enum ImsakiaError {
    /// The source workbook does not exist.
    #[error("source workbook not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// The source workbook exists but could not be opened or read.
    #[error("cannot read workbook {}: {message}", path.display())]
    SourceUnreadable { path: PathBuf, message: String },

    /// The workbook contains no worksheet.
    #[error("workbook {} has no sheets", path.display())]
    NoSheet { path: PathBuf },

    /// A data row is too narrow for the nine positional columns.
    #[error("row {row} has {columns} columns, expected at least 9")]
    MalformedRow { row: u32, columns: usize },

    /// The destination file could not be written.
    #[error("cannot write {}: {source}", path.display())]
    DestinationNotWritable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error outside the conversion itself (config files).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Coarse error category, for callers that react per failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Source missing, unreadable, or without sheets.
    Source,
    /// Destination not writable.
    Destination,
    /// Row data or serialization problem.
    Data,
    /// Configuration problem.
    Config,
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ImsakiaError>;

impl ImsakiaError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a write failure on the destination path.
    pub fn destination(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DestinationNotWritable {
            path: path.into(),
            source,
        }
    }

    /// The failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceNotFound { .. } | Self::SourceUnreadable { .. } | Self::NoSheet { .. } => {
                ErrorKind::Source
            }
            Self::DestinationNotWritable { .. } => ErrorKind::Destination,
            Self::MalformedRow { .. } | Self::Serialize(_) => ErrorKind::Data,
            Self::Config { .. } | Self::Io { .. } => ErrorKind::Config,
        }
    }
}
