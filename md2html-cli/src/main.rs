//! md2html: convert a Markdown tree to HTML through Jinja-style templates.
//!
//! # Usage
//!
//! ```text
//! md2html <INPUT> [OUTPUT] [--no-copy] [-s|--skip | -w|--overwrite | -i|--interactive]
//!         [-q|--quiet | -v|--verbose | --debug] [--json]
//! ```

mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use commands::convert::ConvertArgs;
use logging::Verbosity;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "md2html",
    version,
    about = "Convert Markdown files with YAML front matter to HTML",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,

    #[command(flatten)]
    verbosity: Verbosity,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbosity);
    cli.convert.run(cli.verbosity.quiet)
}
