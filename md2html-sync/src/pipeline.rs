//! Conversion pipeline entrypoint used by the CLI.
//!
//! One run: validate paths, inventory the input, mirror its directories,
//! build the template registry, then convert documents and copy assets under
//! the run's [`OverwritePolicy`].

use std::path::{Path, PathBuf};

use serde::Serialize;

use md2html_core::Document;
use md2html_inventory::Inventory;
use md2html_renderer::{Renderer, TemplateRegistry};

use crate::error::{io_err, SyncError};
use crate::policy::{Confirm, Decision, OverwritePolicy};
use crate::writer::{self, WriteResult};

// ---------------------------------------------------------------------------
// Options and summary
// ---------------------------------------------------------------------------

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Markdown file or directory to convert.
    pub input: PathBuf,
    /// Output directory. `None` writes next to the sources.
    pub output: Option<PathBuf>,
    /// Copy files that are neither documents nor templates.
    pub copy_assets: bool,
    /// Initial policy for existing destinations.
    pub policy: OverwritePolicy,
}

impl ConvertOptions {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        ConvertOptions {
            input: input.into(),
            output: None,
            copy_assets: true,
            policy: OverwritePolicy::default(),
        }
    }
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedFile {
    pub path: PathBuf,
    pub error: String,
}

/// Result of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    /// HTML pages written.
    pub converted: Vec<PathBuf>,
    /// Assets copied.
    pub copied: Vec<PathBuf>,
    /// Destinations left alone.
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedFile>,
}

impl ConversionSummary {
    /// Files handled without error.
    pub fn processed(&self) -> usize {
        self.converted.len() + self.copied.len() + self.skipped.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, result: WriteResult) {
        match result {
            WriteResult::Written { path } => self.converted.push(path),
            WriteResult::Copied { path } => self.copied.push(path),
            WriteResult::Skipped { path } => self.skipped.push(path),
        }
    }

    fn fail(&mut self, path: &Path, err: SyncError) {
        tracing::error!(path = %path.display(), error = %err, "failed to process file");
        self.failed.push(FailedFile {
            path: path.to_path_buf(),
            error: err.to_string(),
        });
    }
}

// ---------------------------------------------------------------------------
// Path validation
// ---------------------------------------------------------------------------

/// Absolute form of `path` with symlinks resolved as far as the path exists.
fn resolve(path: &Path) -> Result<PathBuf, SyncError> {
    let absolute = std::path::absolute(path).map_err(|e| io_err(path, e))?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_owned());
                existing = parent;
            }
            _ => break,
        }
    }
    let mut resolved = existing
        .canonicalize()
        .unwrap_or_else(|_| existing.to_path_buf());
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

/// Check `input` and `output` before anything is written.
pub fn validate_paths(input: &Path, output: Option<&Path>) -> Result<(), SyncError> {
    if !input.exists() {
        return Err(SyncError::InputNotFound {
            path: input.to_path_buf(),
        });
    }
    let Some(output) = output else {
        return Ok(());
    };

    let input_abs = resolve(input)?;
    let output_abs = resolve(output)?;
    if output_abs == input_abs {
        return Err(SyncError::SameAsInput {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
    }
    if output_abs.starts_with(&input_abs) {
        return Err(SyncError::OutputInsideInput {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Run one conversion.
///
/// Only setup failures are returned as errors; per-file failures are
/// collected in [`ConversionSummary::failed`].
pub fn run(
    options: &ConvertOptions,
    confirm: &mut dyn Confirm,
) -> Result<ConversionSummary, SyncError> {
    validate_paths(&options.input, options.output.as_deref())?;

    let input = resolve(&options.input)?;
    let inventory = md2html_inventory::scan(&input)?;
    let output_root = match &options.output {
        Some(output) => resolve(output)?,
        None => inventory.root.clone(),
    };
    tracing::info!(
        input = %inventory.root.display(),
        output = %output_root.display(),
        policy = %options.policy,
        "starting conversion"
    );

    create_output_dirs(&output_root, &inventory)?;

    let renderer = Renderer::new(TemplateRegistry::load(&inventory.templates)?);
    let mut policy = options.policy;
    let mut summary = ConversionSummary::default();

    for path in &inventory.documents {
        let converted = convert_document(
            &renderer,
            &inventory.root,
            &output_root,
            path,
            &mut policy,
            confirm,
        );
        match converted {
            Ok(result) => summary.record(result),
            Err(err) => summary.fail(path, err),
        }
    }

    for path in &inventory.assets {
        if !options.copy_assets {
            tracing::debug!(path = %path.display(), "asset copy disabled; skipping");
            summary.record(WriteResult::Skipped { path: path.clone() });
            continue;
        }
        match copy_asset(&inventory.root, &output_root, path, &mut policy, confirm) {
            Ok(result) => summary.record(result),
            Err(err) => summary.fail(path, err),
        }
    }

    tracing::info!(
        converted = summary.converted.len(),
        copied = summary.copied.len(),
        skipped = summary.skipped.len(),
        failed = summary.failed.len(),
        "Processed {} files.",
        summary.processed()
    );
    Ok(summary)
}

fn create_output_dirs(output_root: &Path, inventory: &Inventory) -> Result<(), SyncError> {
    std::fs::create_dir_all(output_root).map_err(|e| io_err(output_root, e))?;
    for dir in &inventory.directories {
        let target = output_root.join(dir);
        std::fs::create_dir_all(&target).map_err(|e| io_err(&target, e))?;
    }
    Ok(())
}

fn convert_document(
    renderer: &Renderer,
    input_root: &Path,
    output_root: &Path,
    path: &Path,
    policy: &mut OverwritePolicy,
    confirm: &mut dyn Confirm,
) -> Result<WriteResult, SyncError> {
    let doc = Document::read(input_root, path.to_path_buf())?;
    let destination = doc.output_path(output_root);
    if policy.decide(&destination, confirm) == Decision::Skip {
        return Ok(WriteResult::Skipped { path: destination });
    }

    let page = renderer.render_document(&doc, Some(input_root))?;
    tracing::debug!(
        path = %path.display(),
        template = %page.template,
        reason = %page.reason,
        "rendered document"
    );
    writer::write_page(&destination, &page.html)
}

fn copy_asset(
    input_root: &Path,
    output_root: &Path,
    path: &Path,
    policy: &mut OverwritePolicy,
    confirm: &mut dyn Confirm,
) -> Result<WriteResult, SyncError> {
    let relative = path.strip_prefix(input_root).unwrap_or(path);
    let destination = output_root.join(relative);
    if destination == path {
        tracing::debug!(path = %path.display(), "asset already in place");
        return Ok(WriteResult::Skipped { path: destination });
    }
    if policy.decide(&destination, confirm) == Decision::Skip {
        return Ok(WriteResult::Skipped { path: destination });
    }
    writer::copy_asset(path, &destination)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
