//! md2html core library: domain types and front-matter extraction.
//!
//! - [`types`]: [`Document`], [`Metadata`], [`TemplateId`]
//! - [`frontmatter`]: splits a raw document into metadata and body
//! - [`error`]: [`CoreError`]

pub mod error;
pub mod frontmatter;
pub mod types;

pub use error::CoreError;
pub use frontmatter::{extract, Extracted};
pub use types::{scalar_text, Document, Metadata, TemplateId};
