//! Run reporting
//!
//! ## Reporter Trait
//!
//! The suite never prints directly. Every observable event goes through a
//! [`Reporter`], so the console format can change (or be captured in tests)
//! without touching orchestration.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::golden::{CompareOutcome, StorageError, WriteStatus};
use crate::process::ProcessError;
use crate::suite::{CompareSummary, GenerateSummary, SuiteOutcome};

// ============================================================================
// Reporter Trait
// ============================================================================

/// Receives the events of a suite run.
pub trait Reporter {
    /// Called once the corpus has been enumerated
    fn on_collection_complete(&mut self, _count: usize) {}

    /// Called for each input the interpreter could not run successfully
    fn on_process_failure(&mut self, file: &Path, error: &ProcessError);

    /// Called for each comparison in compare mode
    fn on_compared(&mut self, file: &Path, golden: &Path, outcome: &CompareOutcome);

    /// Called for each golden file handled in generate mode
    fn on_written(&mut self, file: &Path, golden: &Path, status: WriteStatus);

    /// Called when the golden store could not be read or written for an input
    fn on_storage_error(&mut self, file: &Path, error: &StorageError);

    /// Called after the last input has been handled
    fn on_run_complete(&mut self, _outcome: &SuiteOutcome) {}
}

// ============================================================================
// Console Reporter
// ============================================================================

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD_RED: &str = "\x1b[1;31m";
const BOLD_GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

/// Human-readable reporter, one line per input plus indented details.
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleReporter<io::Stdout> {
    /// Report to stdout, with colors when stdout is a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_terminal();
        Self { out, color }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    // Console output is best effort: a closed stdout must not abort the run.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
    }

    fn status_line(&mut self, file: &Path, color: &str, status: &str) {
        let label = self.paint(color, status);
        self.line(&format!("{} ... {}", display_name(file), label));
    }
}

fn display_name(file: &Path) -> String {
    file.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string())
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_collection_complete(&mut self, count: usize) {
        self.line(&format!("collected {count} test file(s)"));
        self.line("");
    }

    fn on_process_failure(&mut self, file: &Path, error: &ProcessError) {
        self.status_line(file, RED, "ERROR");
        self.line(&format!("    {error}"));
    }

    fn on_compared(&mut self, file: &Path, golden: &Path, outcome: &CompareOutcome) {
        match outcome {
            CompareOutcome::Equal => self.status_line(file, GREEN, "OK"),
            CompareOutcome::Mismatch(mismatch) => {
                self.status_line(file, RED, "FAILED");
                self.line(&format!("    first difference at line {}", mismatch.line));
                self.line(&format!("    expected: {}", mismatch.expected));
                self.line(&format!("    actual:   {}", mismatch.actual));
            }
            CompareOutcome::GoldenMissing => {
                self.status_line(file, RED, "FAILED");
                self.line(&format!("    golden file not found: {}", golden.display()));
                self.line("    run with `--mode generate` to record it");
            }
        }
    }

    fn on_written(&mut self, file: &Path, golden: &Path, status: WriteStatus) {
        let color = match status {
            WriteStatus::Unchanged => GREEN,
            WriteStatus::Created | WriteStatus::Updated => YELLOW,
        };
        let label = self.paint(color, &status.to_string());
        self.line(&format!("{} ... {} ({})", display_name(file), label, golden.display()));
    }

    fn on_storage_error(&mut self, file: &Path, error: &StorageError) {
        self.status_line(file, RED, "ERROR");
        self.line(&format!("    {error}"));
    }

    fn on_run_complete(&mut self, outcome: &SuiteOutcome) {
        self.line("");
        let (text, ok) = match outcome {
            SuiteOutcome::ProcessFailures { failed, total } => (
                format!("{failed} of {total} test file(s) could not be run; nothing was compared"),
                false,
            ),
            SuiteOutcome::Compared(summary) => (compare_summary(summary), outcome.is_success()),
            SuiteOutcome::Generated(summary) => (generate_summary(summary), outcome.is_success()),
        };
        let painted = self.paint(if ok { BOLD_GREEN } else { BOLD_RED }, &text);
        self.line(&painted);
    }
}

/// `"P passed, F failed, T total"`
pub fn compare_summary(summary: &CompareSummary) -> String {
    format!(
        "{} passed, {} failed, {} total",
        summary.passed, summary.failed, summary.total
    )
}

pub fn generate_summary(summary: &GenerateSummary) -> String {
    format!(
        "{} created, {} updated, {} unchanged, {} failed",
        summary.created, summary.updated, summary.unchanged, summary.failed
    )
}
