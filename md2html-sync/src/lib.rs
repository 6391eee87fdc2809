//! # md2html-sync
//!
//! Conversion orchestration: path validation, overwrite policy and atomic
//! output.
//!
//! Call [`pipeline::run`] with a [`ConvertOptions`] and a [`Confirm`] source
//! to convert a Markdown file or tree into HTML.

pub mod error;
pub mod pipeline;
pub mod policy;
pub mod writer;

pub use error::SyncError;
pub use pipeline::{run, validate_paths, ConversionSummary, ConvertOptions, FailedFile};
pub use policy::{Confirm, Decision, OverwritePolicy, StdinConfirm};
pub use writer::{copy_asset, write_page, WriteResult};
