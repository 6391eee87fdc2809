//! Error types for md2html-sync.

use std::path::PathBuf;

use thiserror::Error;

use md2html_core::CoreError;
use md2html_inventory::InventoryError;
use md2html_renderer::RenderError;

/// All errors that can arise from a conversion run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Reading a document failed.
    #[error("document error: {0}")]
    Core(#[from] CoreError),

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Scanning the input tree failed.
    #[error("inventory error: {0}")]
    Inventory(#[from] InventoryError),

    #[error("{path} does not exist")]
    InputNotFound { path: PathBuf },

    #[error("output directory '{output}' cannot be the same as input directory '{input}'")]
    SameAsInput { input: PathBuf, output: PathBuf },

    #[error("output directory '{output}' cannot be inside input directory '{input}'")]
    OutputInsideInput { input: PathBuf, output: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
