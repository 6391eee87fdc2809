//! Tera rendering engine: [`TemplateRegistry`] and [`Renderer`].
//!
//! Every template is compiled into its own [`Tera`] instance, so one broken
//! file cannot poison the others. Autoescaping is off: `content` is already
//! HTML and meta tags are pre-escaped.
//!
//! Plain variables a page does not define render as empty strings, so a
//! template can print optional front-matter keys with `{{ author }}`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tera::Tera;

use md2html_core::{Document, Metadata, TemplateId};

use crate::context::RenderContext;
use crate::error::{describe, RenderError};
use crate::markdown;
use crate::resolver::{self, Resolution, ResolutionReason};

// ---------------------------------------------------------------------------
// Built-in template, baked into the binary via include_str!
// ---------------------------------------------------------------------------

/// Source of the built-in fallback template.
pub const DEFAULT_TEMPLATE: &str = include_str!("templates/default.html.tera");

fn compile(id: &TemplateId, source: &str) -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    tera.add_raw_template(id.as_str(), source)?;
    Ok(tera)
}

/// Most undefined variables filled in for a single render.
const MAX_UNDEFINED: usize = 64;

static UNDEFINED_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Variable `([A-Za-z_][A-Za-z0-9_]*)` not found in context")
        .expect("undefined-variable pattern is valid")
});

/// Render `name`, binding each undefined top-level variable to `""` and
/// retrying. Dotted lookups and other failures are returned unchanged.
fn render_lenient(tera: &Tera, name: &str, ctx: &tera::Context) -> Result<String, tera::Error> {
    let mut ctx = ctx.clone();
    let mut filled = 0;
    loop {
        let err = match tera.render(name, &ctx) {
            Ok(html) => return Ok(html),
            Err(err) => err,
        };
        let Some(variable) = undefined_variable(&err) else {
            return Err(err);
        };
        if filled == MAX_UNDEFINED || ctx.contains_key(&variable) {
            return Err(err);
        }
        tracing::debug!(template = name, %variable, "undefined variable renders empty");
        ctx.insert(variable, "");
        filled += 1;
    }
}

/// Name of the undefined variable somewhere in `err`'s source chain.
fn undefined_variable(err: &tera::Error) -> Option<String> {
    let mut current: Option<&dyn std::error::Error> = Some(err);
    while let Some(e) = current {
        if let Some(caps) = UNDEFINED_VARIABLE.captures(&e.to_string()) {
            return Some(caps[1].to_string());
        }
        current = e.source();
    }
    None
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// TemplateRegistry
// ---------------------------------------------------------------------------

/// Immutable set of compiled templates for one run.
///
/// Identifiers iterate in discovery order with `DEFAULT` last. The fallback
/// is always present, so every [`Resolution`] names a renderable template.
pub struct TemplateRegistry {
    ids: Vec<TemplateId>,
    compiled: HashMap<TemplateId, Tera>,
    fallback: Tera,
}

impl TemplateRegistry {
    /// Registry holding only the built-in template.
    pub fn builtin() -> Result<Self, RenderError> {
        Self::from_sources(std::iter::empty())
    }

    /// Compile `sources` in order. Templates that fail to compile are logged
    /// and left out; only a broken built-in template is an error.
    pub fn from_sources<I>(sources: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = (TemplateId, String)>,
    {
        let mut ids = Vec::new();
        let mut compiled = HashMap::new();

        for (id, source) in sources {
            if id.is_fallback() || compiled.contains_key(&id) {
                tracing::warn!(template = %id, "duplicate template identifier; skipping");
                continue;
            }
            match compile(&id, &source) {
                Ok(tera) => {
                    tracing::debug!(template = %id, "loaded template");
                    ids.push(id.clone());
                    compiled.insert(id, tera);
                }
                Err(RenderError::Tera(err)) => {
                    tracing::error!(
                        template = %id,
                        error = %describe(&err),
                        "failed to compile template"
                    );
                }
                Err(err) => {
                    tracing::error!(template = %id, error = %err, "failed to compile template");
                }
            }
        }

        let fallback = compile(&TemplateId::fallback(), DEFAULT_TEMPLATE)?;
        ids.push(TemplateId::fallback());
        tracing::debug!(count = ids.len(), "template registry ready");

        Ok(TemplateRegistry {
            ids,
            compiled,
            fallback,
        })
    }

    /// Read and compile the template files at `paths`. Unreadable files are
    /// logged and skipped.
    pub fn load(paths: &[PathBuf]) -> Result<Self, RenderError> {
        let sources = paths.iter().filter_map(|path| {
            match std::fs::read_to_string(path).map_err(|e| io_err(path, e)) {
                Ok(source) => Some((TemplateId::from_path(path), source)),
                Err(err) => {
                    tracing::error!(error = %err, "failed to load template");
                    None
                }
            }
        });
        Self::from_sources(sources)
    }

    /// Identifiers in resolution order, `DEFAULT` last.
    pub fn ids(&self) -> &[TemplateId] {
        &self.ids
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        id.is_fallback() || self.compiled.contains_key(id)
    }

    /// Number of templates, including the built-in one.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Resolve the template for a document against this registry.
    pub fn select(
        &self,
        document_path: &Path,
        metadata: Option<&Metadata>,
        input_root: Option<&Path>,
    ) -> Resolution {
        resolver::select(document_path, &self.ids, metadata, input_root)
    }

    /// Render `ctx` with template `id`.
    ///
    /// A missing or failing template falls back to the built-in one; the
    /// failure is logged, not returned.
    pub fn render(&self, id: &TemplateId, ctx: &RenderContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context();
        if !id.is_fallback() {
            match self.compiled.get(id) {
                Some(tera) => match render_lenient(tera, id.as_str(), &tera_ctx) {
                    Ok(html) => return Ok(html),
                    Err(err) => tracing::warn!(
                        template = %id,
                        error = %describe(&err),
                        "template failed to render; falling back to built-in template"
                    ),
                },
                None => tracing::warn!(
                    template = %id,
                    "template not in registry; using built-in template"
                ),
            }
        }
        Ok(self.fallback.render(TemplateId::DEFAULT, &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Output of [`Renderer::render_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub template: TemplateId,
    pub reason: ResolutionReason,
    pub html: String,
}

/// Markdown + metadata → final HTML. Create once per run and reuse.
pub struct Renderer {
    registry: TemplateRegistry,
}

impl Renderer {
    pub fn new(registry: TemplateRegistry) -> Self {
        Renderer { registry }
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Convert `body` to HTML, build the context from it and `metadata`, and
    /// render with `template`.
    pub fn render(
        &self,
        body: &str,
        metadata: Option<&Metadata>,
        template: &TemplateId,
    ) -> Result<String, RenderError> {
        let content = markdown::to_html(body);
        let ctx = RenderContext::build(content, metadata);
        self.registry.render(template, &ctx)
    }

    /// Resolve the template for `doc` and render it.
    pub fn render_document(
        &self,
        doc: &Document,
        input_root: Option<&Path>,
    ) -> Result<RenderedPage, RenderError> {
        let Resolution { id, reason } =
            self.registry.select(doc.input_path(), doc.metadata(), input_root);
        let html = self.render(doc.body(), doc.metadata(), &id)?;
        Ok(RenderedPage {
            template: id,
            reason,
            html,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
