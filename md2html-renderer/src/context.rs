//! Render context: the variables a page template sees.
//!
//! Built from `{content, meta_tags}` and then every top-level metadata entry.
//! Metadata is merged after the two base keys, so a front-matter key named
//! `content` or `meta_tags` shadows them.

use serde_yaml::{Mapping, Value};

use md2html_core::{scalar_text, Metadata};

/// Key holding the rendered HTML body.
pub const CONTENT_KEY: &str = "content";
/// Key holding the generated `<meta>` tag strings.
pub const META_TAGS_KEY: &str = "meta_tags";

/// Variables passed to a template, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderContext {
    vars: Mapping,
}

impl RenderContext {
    /// Context with only `content` set and no meta tags.
    pub fn new(content: impl Into<String>) -> Self {
        let mut vars = Mapping::new();
        vars.insert(CONTENT_KEY.into(), Value::String(content.into()));
        vars.insert(META_TAGS_KEY.into(), Value::Sequence(Vec::new()));
        RenderContext { vars }
    }

    /// Full context for a page: `content`, then metadata entries, then one
    /// generated meta tag per metadata entry.
    ///
    /// Generated tags are appended to `meta_tags` when metadata left it a
    /// list, and replace it otherwise.
    pub fn build(content: impl Into<String>, metadata: Option<&Metadata>) -> Self {
        let mut ctx = Self::new(content);
        let Some(metadata) = metadata else {
            return ctx;
        };

        for (key, value) in metadata.iter() {
            ctx.vars.insert(Value::String(key), value.clone());
        }

        let generated: Vec<Value> = metadata
            .iter()
            .map(|(key, value)| Value::String(meta_tag(&key, value)))
            .collect();
        tracing::debug!(count = generated.len(), "generated meta tags");

        if let Some(Value::Sequence(tags)) = ctx.vars.get_mut(META_TAGS_KEY) {
            tags.extend(generated);
        } else {
            ctx.vars.insert(META_TAGS_KEY.into(), Value::Sequence(generated));
        }
        ctx
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// The `meta_tags` entries that are strings.
    pub fn meta_tags(&self) -> Vec<&str> {
        self.get(META_TAGS_KEY)
            .and_then(Value::as_sequence)
            .map(|tags| tags.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Convert to a [`tera::Context`]. Entries tera cannot represent are
    /// logged and left out.
    pub fn to_tera_context(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        for (key, value) in &self.vars {
            let Some(key) = key.as_str() else {
                continue;
            };
            if let Err(err) = ctx.try_insert(key, value) {
                tracing::warn!(key, error = %err, "context value cannot be passed to templates");
            }
        }
        ctx
    }
}

/// `<meta name="KEY" content="VALUE">` for one metadata entry.
///
/// KEY is emitted verbatim; double quotes in VALUE become `&quot;`.
pub fn meta_tag(key: &str, value: &Value) -> String {
    let content = meta_value_text(value).replace('"', "&quot;");
    format!(r#"<meta name="{key}" content="{content}">"#)
}

/// Text of a metadata value as it appears in a meta tag.
///
/// Lists join their elements with `", "`; mappings dump as block-style YAML;
/// scalars use their plain text.
pub fn meta_value_text(value: &Value) -> String {
    match value {
        Value::Sequence(items) => items
            .iter()
            .map(element_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Mapping(_) => serde_yaml::to_string(value).unwrap_or_default(),
        Value::Tagged(tagged) => meta_value_text(&tagged.value),
        scalar => scalar_text(scalar).unwrap_or_default(),
    }
}

/// List elements that are themselves collections render as compact JSON.
fn element_text(value: &Value) -> String {
    scalar_text(value).unwrap_or_else(|| serde_json::to_string(value).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
