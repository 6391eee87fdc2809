//! Input tree inventory for `md2html-inventory`.
//!
//! `scan(path)` walks an input file or directory and sorts every entry into
//! documents, templates, assets, and sub-directories. Classification is by
//! extension only and ignores case.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Extensions recognised as Markdown documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Extension recognised as a page template.
pub const TEMPLATE_EXTENSION: &str = "jinja";

/// What an input file is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Markdown converted to HTML.
    Document,
    /// Template source; never copied to the output.
    Template,
    /// Anything else; copied verbatim.
    Asset,
}

/// Everything found under an input path, in walk order (sorted by name).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Directory all relative paths are computed from.
    pub root: PathBuf,
    pub documents: Vec<PathBuf>,
    pub templates: Vec<PathBuf>,
    pub assets: Vec<PathBuf>,
    /// Sub-directories relative to `root`.
    pub directories: Vec<PathBuf>,
}

impl Inventory {
    /// Total number of files found.
    pub fn file_count(&self) -> usize {
        self.documents.len() + self.templates.len() + self.assets.len()
    }

    fn push(&mut self, path: PathBuf) {
        match classify(&path) {
            EntryKind::Document => self.documents.push(path),
            EntryKind::Template => self.templates.push(path),
            EntryKind::Asset => self.assets.push(path),
        }
    }
}

/// Errors from scanning the input.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("input path does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to walk input tree: {0}")]
    Walk(#[from] walkdir::Error),
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify a file by its extension.
pub fn classify(path: &Path) -> EntryKind {
    let ext = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some(e) if DOCUMENT_EXTENSIONS.contains(&e) => EntryKind::Document,
        Some(TEMPLATE_EXTENSION) => EntryKind::Template,
        _ => EntryKind::Asset,
    }
}

/// Inventory `input`.
///
/// A directory is walked recursively and becomes the root. A single file is
/// inventoried alone, with its parent directory as the root.
pub fn scan(input: &Path) -> Result<Inventory, InventoryError> {
    if !input.exists() {
        return Err(InventoryError::NotFound {
            path: input.to_path_buf(),
        });
    }

    if input.is_file() {
        let root = input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let mut inventory = Inventory {
            root,
            ..Inventory::default()
        };
        inventory.push(input.to_path_buf());
        return Ok(inventory);
    }

    let mut inventory = Inventory {
        root: input.to_path_buf(),
        ..Inventory::default()
    };
    for entry in WalkDir::new(input)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            if let Ok(rel) = entry.path().strip_prefix(input) {
                inventory.directories.push(rel.to_path_buf());
            }
        } else if file_type.is_file() {
            inventory.push(entry.into_path());
        }
    }

    tracing::debug!(
        root = %inventory.root.display(),
        documents = inventory.documents.len(),
        templates = inventory.templates.len(),
        assets = inventory.assets.len(),
        directories = inventory.directories.len(),
        "inventory complete"
    );
    Ok(inventory)
}
