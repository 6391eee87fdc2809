//! Template resolution: picks exactly one template for a document.
//!
//! | Step | Source                                   | Strategy    |
//! |------|------------------------------------------|-------------|
//! | 1    | front-matter `template` value            | `Substring` |
//! | 2    | template beside the document, same stem  | `Stem`      |
//! | 3    | template named after an ancestor dir     | `Stem`      |
//! | 4    | built-in `DEFAULT`                       | -           |
//!
//! The first step that matches wins. A step-1 miss falls through to step 2.

use std::fmt;
use std::path::Path;

use md2html_core::{scalar_text, Metadata, TemplateId};

/// Front-matter key naming an explicit template.
pub const TEMPLATE_KEY: &str = "template";

/// How a template identifier is compared against a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    /// The identifier contains the name anywhere.
    Substring,
    /// The identifier's file stem equals the name exactly.
    Stem,
}

impl MatchStrategy {
    pub fn matches(self, id: &TemplateId, name: &str) -> bool {
        match self {
            MatchStrategy::Substring => id.as_str().contains(name),
            MatchStrategy::Stem => id.stem() == Some(name),
        }
    }
}

/// Which resolution step produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionReason {
    FrontMatter,
    SameName,
    Directory,
    Fallback,
}

impl fmt::Display for ResolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionReason::FrontMatter => write!(f, "front matter"),
            ResolutionReason::SameName => write!(f, "same name"),
            ResolutionReason::Directory => write!(f, "directory name"),
            ResolutionReason::Fallback => write!(f, "fallback"),
        }
    }
}

/// Selected template plus the step that chose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub id: TemplateId,
    pub reason: ResolutionReason,
}

impl Resolution {
    fn new(id: &TemplateId, reason: ResolutionReason) -> Self {
        tracing::debug!(template = %id, %reason, "template selected");
        Resolution {
            id: id.clone(),
            reason,
        }
    }
}

/// Select the template for `document_path`.
///
/// `templates` is searched in order. `input_root` bounds the ancestor walk of
/// step 3; without it the walk runs up to the filesystem root.
pub fn select(
    document_path: &Path,
    templates: &[TemplateId],
    metadata: Option<&Metadata>,
    input_root: Option<&Path>,
) -> Resolution {
    if let Some(value) = metadata.and_then(|m| m.get(TEMPLATE_KEY)) {
        match scalar_text(value).filter(|wanted| !wanted.trim().is_empty()) {
            Some(wanted) => {
                if let Some(id) = find(templates, MatchStrategy::Substring, &wanted) {
                    return Resolution::new(id, ResolutionReason::FrontMatter);
                }
                tracing::debug!(template = %wanted, "front-matter template not found");
            }
            None => tracing::debug!("front-matter template is empty or not a scalar; ignoring it"),
        }
    }

    let document_dir = document_path.parent();
    if let Some(stem) = document_path.file_stem().and_then(|s| s.to_str()) {
        let same_name = templates.iter().find(|id| {
            MatchStrategy::Stem.matches(id, stem) && id.as_path().parent() == document_dir
        });
        if let Some(id) = same_name {
            return Resolution::new(id, ResolutionReason::SameName);
        }
    }

    let mut current = document_dir;
    while let Some(dir) = current {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            break;
        };
        if input_root.is_some_and(|root| !dir.starts_with(root)) {
            break;
        }
        if let Some(id) = find(templates, MatchStrategy::Stem, name) {
            return Resolution::new(id, ResolutionReason::Directory);
        }
        current = dir.parent();
    }

    Resolution::new(&TemplateId::fallback(), ResolutionReason::Fallback)
}

fn find<'a>(
    templates: &'a [TemplateId],
    strategy: MatchStrategy,
    name: &str,
) -> Option<&'a TemplateId> {
    templates.iter().find(|id| strategy.matches(id, name))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
