//! # md2html-renderer
//!
//! Template resolution and rendering for md2html: Markdown is converted with
//! pulldown-cmark, merged with front-matter metadata into a render context,
//! and rendered through the template [`resolver`] picks.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use md2html_core::Document;
//! use md2html_renderer::{Renderer, TemplateRegistry};
//!
//! fn convert(root: &Path, templates: &[PathBuf], doc: &Document) {
//!     if let Ok(registry) = TemplateRegistry::load(templates) {
//!         let renderer = Renderer::new(registry);
//!         if let Ok(page) = renderer.render_document(doc, Some(root)) {
//!             let path = doc.input_path().display();
//!             println!("{path} via {}: {} bytes", page.template, page.html.len());
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod markdown;
pub mod resolver;

pub use context::RenderContext;
pub use engine::{RenderedPage, Renderer, TemplateRegistry, DEFAULT_TEMPLATE};
pub use error::RenderError;
pub use resolver::{select, MatchStrategy, Resolution, ResolutionReason};
