//! Error types for md2html-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can arise while loading documents.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Reading a document failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
