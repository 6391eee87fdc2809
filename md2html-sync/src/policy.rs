//! Overwrite policy for destinations that already exist.
//!
//! The policy is a value owned by one run. Interactive answers can switch it:
//!
//! | Answer | Effect                          |
//! |--------|---------------------------------|
//! | `y`    | write this file                 |
//! | `o`    | write, switch to `Overwrite`    |
//! | `s`    | skip, switch to `Skip`          |
//! | other  | skip this file                  |

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Serialize;

/// What to do when a destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Leave existing files alone.
    Skip,
    /// Replace existing files without asking.
    Overwrite,
    /// Ask for every existing file.
    #[default]
    Interactive,
}

impl fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverwritePolicy::Skip => write!(f, "skip"),
            OverwritePolicy::Overwrite => write!(f, "overwrite"),
            OverwritePolicy::Interactive => write!(f, "interactive"),
        }
    }
}

/// Outcome of [`OverwritePolicy::decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Write,
    Skip,
}

/// Source of answers for interactive mode.
pub trait Confirm {
    /// Show `question` and return the raw answer.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> io::Result<String>,
{
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self(question)
    }
}

/// Prompts on stderr and reads one line from stdin. Stdout stays free for
/// the run summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(question.as_bytes())?;
        stderr.flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

impl OverwritePolicy {
    /// Decide whether `destination` may be written, asking `confirm` in
    /// interactive mode. Missing destinations are always written.
    pub fn decide(&mut self, destination: &Path, confirm: &mut dyn Confirm) -> Decision {
        if !destination.exists() {
            return Decision::Write;
        }
        match *self {
            OverwritePolicy::Overwrite => Decision::Write,
            OverwritePolicy::Skip => {
                tracing::info!(path = %destination.display(), "skipped existing file");
                Decision::Skip
            }
            OverwritePolicy::Interactive => {
                let question = format!(
                    "File {} already exists. Overwrite? (y/N/o/s): ",
                    destination.display()
                );
                let answer = match confirm.ask(&question) {
                    Ok(answer) => answer,
                    Err(err) => {
                        tracing::warn!(
                            path = %destination.display(),
                            error = %err,
                            "no answer; skipping"
                        );
                        return Decision::Skip;
                    }
                };
                match answer.trim().to_ascii_lowercase().as_str() {
                    "y" => Decision::Write,
                    "o" => {
                        tracing::info!("switching to overwrite mode");
                        *self = OverwritePolicy::Overwrite;
                        Decision::Write
                    }
                    "s" => {
                        tracing::info!("switching to skip mode");
                        *self = OverwritePolicy::Skip;
                        Decision::Skip
                    }
                    _ => {
                        tracing::info!(path = %destination.display(), "skipped");
                        Decision::Skip
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
