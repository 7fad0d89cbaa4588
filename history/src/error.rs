use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing the history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line did not have the `name \t path \t timestamp` shape.
    #[error("line {line}: expected 3 tab-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    /// The timestamp field was not a valid Unix time.
    #[error("line {line}: invalid timestamp `{value}`")]
    Timestamp { line: usize, value: String },
}

impl HistoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HistoryError::Io {
            path: path.into(),
            source,
        }
    }
}
