//! `md2html <INPUT> [OUTPUT]`: convert a file or tree.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use md2html_sync::{pipeline, ConversionSummary, ConvertOptions, OverwritePolicy, StdinConfirm};

/// Arguments for a conversion run.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Markdown file or directory to convert.
    pub input: PathBuf,

    /// Output directory. Defaults to writing next to the sources.
    pub output: Option<PathBuf>,

    /// Do not copy files that are not Markdown documents.
    #[arg(long)]
    pub no_copy: bool,

    #[command(flatten)]
    pub mode: OverwriteMode,

    /// Print the run summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// What to do with existing output files. Defaults to asking.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(multiple = false)]
pub struct OverwriteMode {
    /// Skip existing files.
    #[arg(short, long)]
    pub skip: bool,

    /// Overwrite existing files without asking.
    #[arg(short = 'w', long)]
    pub overwrite: bool,

    /// Ask before overwriting each existing file.
    #[arg(short, long)]
    pub interactive: bool,
}

impl From<OverwriteMode> for OverwritePolicy {
    fn from(mode: OverwriteMode) -> Self {
        if mode.skip {
            OverwritePolicy::Skip
        } else if mode.overwrite {
            OverwritePolicy::Overwrite
        } else {
            OverwritePolicy::Interactive
        }
    }
}

impl ConvertArgs {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            copy_assets: !self.no_copy,
            policy: self.mode.into(),
        }
    }

    pub fn run(self, quiet: bool) -> Result<()> {
        let options = self.options();
        let summary = pipeline::run(&options, &mut StdinConfirm)
            .with_context(|| format!("failed to convert {}", options.input.display()))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summary).context("failed to serialize summary")?
            );
        } else if !quiet {
            print_summary(&summary);
        }

        if !summary.is_success() {
            bail!("{} file(s) failed to convert", summary.failed.len());
        }
        Ok(())
    }
}

fn print_summary(summary: &ConversionSummary) {
    let mark = if summary.is_success() {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!(
        "{mark} {} converted, {} copied, {} skipped, {} failed",
        summary.converted.len(),
        summary.copied.len(),
        summary.skipped.len(),
        summary.failed.len()
    );
    for failed in &summary.failed {
        println!("  {}  {}: {}", "✗".red(), failed.path.display(), failed.error);
    }
}
