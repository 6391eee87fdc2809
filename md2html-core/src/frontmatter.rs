//! YAML front-matter extraction.
//!
//! A block is recognised only at byte offset 0:
//!
//! ```text
//! ---
//! title: Hello
//! tags: [a, b]
//! ---
//!
//! # Body starts here
//! ```
//!
//! The block is stripped from the body iff its content is valid YAML.
//! Metadata is present iff that YAML is a non-empty mapping. Invalid YAML
//! leaves the text untouched.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::types::Metadata;

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---\s*\n(.*?)\n---\s*\n").expect("front-matter pattern is valid")
});

/// Result of [`extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a> {
    /// Parsed metadata, if a non-empty mapping was found.
    pub metadata: Option<Metadata>,
    /// Document text after the block (or the whole text).
    pub body: &'a str,
}

impl<'a> Extracted<'a> {
    fn untouched(raw: &'a str) -> Self {
        Extracted {
            metadata: None,
            body: raw,
        }
    }
}

/// Split `raw` into front-matter metadata and body text. Never fails.
pub fn extract(raw: &str) -> Extracted<'_> {
    let Some(caps) = FRONT_MATTER.captures(raw) else {
        tracing::debug!("no front matter found");
        return Extracted::untouched(raw);
    };
    let (Some(whole), Some(block)) = (caps.get(0), caps.get(1)) else {
        return Extracted::untouched(raw);
    };

    let parsed = if block.as_str().trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_yaml::from_str(block.as_str())
    };
    let value: Value = match parsed {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse front matter; keeping it in the body");
            return Extracted::untouched(raw);
        }
    };

    let body = &raw[whole.end()..];
    let metadata = match value {
        Value::Mapping(mapping) if !mapping.is_empty() => Some(Metadata::from(mapping)),
        Value::Mapping(_) | Value::Null => {
            tracing::debug!("front matter is empty");
            None
        }
        other => {
            tracing::warn!(kind = kind(&other), "front matter is not a mapping; ignoring it");
            None
        }
    };
    if let Some(meta) = &metadata {
        tracing::debug!(keys = meta.len(), "parsed front matter");
    }
    Extracted { metadata, body }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
