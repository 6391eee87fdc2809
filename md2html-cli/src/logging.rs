//! Log verbosity flags and subscriber setup.

use clap::Args;
use tracing_subscriber::{fmt, EnvFilter};

/// Mutually exclusive verbosity flags. `RUST_LOG` overrides them.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(multiple = false)]
pub struct Verbosity {
    /// Only log errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Log progress information.
    #[arg(short, long)]
    pub verbose: bool,

    /// Log everything, including template resolution.
    #[arg(long)]
    pub debug: bool,
}

impl Verbosity {
    /// Default filter directive for these flags.
    pub fn directive(self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

/// Install the global subscriber, logging to stderr.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
