//! Domain types shared by every md2html crate.
//!
//! All path fields use `PathBuf`; template identifiers are kept as strings
//! because the sentinel [`TemplateId::DEFAULT`] is not a path.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{io_err, CoreError};
use crate::frontmatter;

// ---------------------------------------------------------------------------
// TemplateId
// ---------------------------------------------------------------------------

/// Identifier of a compiled template: its path string, or the built-in
/// fallback sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub String);

impl TemplateId {
    /// Sentinel identifier of the built-in fallback template.
    pub const DEFAULT: &'static str = "DEFAULT";

    /// The fallback identifier.
    pub fn fallback() -> Self {
        Self(Self::DEFAULT.to_owned())
    }

    /// Identifier for a template file on disk.
    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    pub fn is_fallback(&self) -> bool {
        self.0 == Self::DEFAULT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier viewed as a filesystem path.
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// File stem of the identifier (`/a/b/post.jinja` → `post`).
    pub fn stem(&self) -> Option<&str> {
        self.as_path().file_stem().and_then(|s| s.to_str())
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Front-matter metadata: an insertion-ordered YAML mapping.
///
/// Keys are usually strings; other scalar keys are addressed by their text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(pub Mapping);

impl Metadata {
    /// Look up a value by string key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in document order, with keys rendered as text.
    pub fn iter(&self) -> impl Iterator<Item = (String, &Value)> {
        self.0.iter().map(|(k, v)| (key_text(k), v))
    }

    /// Text of the value under `key` when it is a scalar.
    pub fn scalar(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_text)
    }
}

impl From<Mapping> for Metadata {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// Text representation of a scalar YAML value; `None` for sequences and
/// mappings.
///
/// Null renders as empty text. Tagged values render their inner value.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn key_text(key: &Value) -> String {
    scalar_text(key).unwrap_or_else(|| {
        serde_yaml::to_string(key)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default()
    })
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A Markdown input file, parsed once and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    input_path: PathBuf,
    output_relative_path: PathBuf,
    raw: String,
    metadata: Option<Metadata>,
    body_start: usize,
}

impl Document {
    /// Parse `raw` as the contents of `input_path`, which lives under
    /// `input_root`.
    pub fn parse(input_root: &Path, input_path: PathBuf, raw: String) -> Self {
        let extracted = frontmatter::extract(&raw);
        let body_start = raw.len() - extracted.body.len();
        let metadata = extracted.metadata;
        Document {
            output_relative_path: output_relative_path(input_root, &input_path),
            input_path,
            raw,
            metadata,
            body_start,
        }
    }

    /// Read and parse the document at `input_path`.
    pub fn read(input_root: &Path, input_path: PathBuf) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(&input_path).map_err(|e| io_err(&input_path, e))?;
        Ok(Self::parse(input_root, input_path, raw))
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Output path relative to the output root, extension replaced by `.html`.
    pub fn output_relative_path(&self) -> &Path {
        &self.output_relative_path
    }

    /// `<output_root>/<output_relative_path>`.
    pub fn output_path(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.output_relative_path)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Text following the front-matter block (the whole text if none was
    /// stripped).
    pub fn body(&self) -> &str {
        &self.raw[self.body_start..]
    }
}

/// Relative output path for a document: its path under `input_root` with the
/// extension replaced by `.html`. Falls back to the bare file name when the
/// document is not under `input_root`.
pub fn output_relative_path(input_root: &Path, input_path: &Path) -> PathBuf {
    let relative = input_path
        .strip_prefix(input_root)
        .ok()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| input_path.file_name().map(PathBuf::from))
        .unwrap_or_else(|| input_path.to_path_buf());
    relative.with_extension("html")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
