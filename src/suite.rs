//! Suite orchestration
//!
//! Runs every test input through the interpreter and the normalizer, then either
//! compares the results against the golden store or regenerates it.
//!
//! Any interpreter failure anywhere in the corpus stops the run before a single
//! comparison or write happens: a partial run is never trusted.

use std::path::{Path, PathBuf};

use crate::config::{Mode, RunnerConfig};
use crate::corpus::{CorpusError, discover_test_files};
use crate::golden::{CompareOutcome, GoldenStore, WriteStatus};
use crate::normalize::clean_output;
use crate::process::{ProcessError, ProcessRunner};
use crate::report::Reporter;

/// Counts for a compare-mode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareSummary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

/// Counts for a generate-mode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl GenerateSummary {
    fn record(&mut self, status: WriteStatus) {
        match status {
            WriteStatus::Created => self.created += 1,
            WriteStatus::Updated => self.updated += 1,
            WriteStatus::Unchanged => self.unchanged += 1,
        }
    }
}

/// How a whole run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteOutcome {
    /// At least one interpreter run failed; nothing was compared or written.
    ProcessFailures { failed: usize, total: usize },
    Compared(CompareSummary),
    Generated(GenerateSummary),
}

impl SuiteOutcome {
    /// Whether the run should exit successfully.
    ///
    /// In generate mode content changes are expected; only write errors count.
    pub fn is_success(&self) -> bool {
        match self {
            SuiteOutcome::ProcessFailures { .. } => false,
            SuiteOutcome::Compared(summary) => summary.passed == summary.total,
            SuiteOutcome::Generated(summary) => summary.failed == 0,
        }
    }
}

/// Normalized output of one test input.
struct Captured {
    file: PathBuf,
    output: String,
}

/// Discover the corpus and run it in the configured mode.
#[tracing::instrument(skip_all, fields(mode = ?config.mode, test_dir = %config.test_dir.display()))]
pub fn run_suite(
    config: &RunnerConfig,
    runner: &dyn ProcessRunner,
    reporter: &mut dyn Reporter,
) -> Result<SuiteOutcome, CorpusError> {
    let files = discover_test_files(&config.test_dir, &config.input_extension)?;
    reporter.on_collection_complete(files.len());

    let store = GoldenStore::new(&config.golden_dir);
    let outcome = run_files(&files, config.mode, runner, &store, reporter);
    reporter.on_run_complete(&outcome);
    Ok(outcome)
}

/// Run an already-enumerated list of inputs.
pub fn run_files(
    files: &[PathBuf],
    mode: Mode,
    runner: &dyn ProcessRunner,
    store: &GoldenStore,
    reporter: &mut dyn Reporter,
) -> SuiteOutcome {
    let mut captured = Vec::with_capacity(files.len());
    let mut failures: Vec<(&Path, ProcessError)> = Vec::new();

    for file in files {
        match runner.run(file) {
            Ok(out) => captured.push(Captured {
                file: file.clone(),
                output: clean_output(&out.stdout),
            }),
            Err(e) => {
                tracing::debug!(file = %file.display(), error = %e, "interpreter run failed");
                failures.push((file.as_path(), e));
            }
        }
    }

    if !failures.is_empty() {
        for (file, error) in &failures {
            reporter.on_process_failure(file, error);
        }
        return SuiteOutcome::ProcessFailures {
            failed: failures.len(),
            total: files.len(),
        };
    }

    match mode {
        Mode::Compare => SuiteOutcome::Compared(compare_all(&captured, store, reporter)),
        Mode::Generate => SuiteOutcome::Generated(generate_all(&captured, store, reporter)),
    }
}

fn compare_all(captured: &[Captured], store: &GoldenStore, reporter: &mut dyn Reporter) -> CompareSummary {
    let mut summary = CompareSummary {
        total: captured.len(),
        ..CompareSummary::default()
    };

    for Captured { file, output } in captured {
        let golden_path = store.golden_path(file);
        match store.compare(&golden_path, output) {
            Ok(outcome) => {
                if outcome == CompareOutcome::Equal {
                    summary.passed += 1;
                } else {
                    summary.failed += 1;
                }
                reporter.on_compared(file, &golden_path, &outcome);
            }
            Err(e) => {
                summary.failed += 1;
                reporter.on_storage_error(file, &e);
            }
        }
    }

    summary
}

fn generate_all(captured: &[Captured], store: &GoldenStore, reporter: &mut dyn Reporter) -> GenerateSummary {
    let mut summary = GenerateSummary::default();

    for Captured { file, output } in captured {
        let golden_path = store.golden_path(file);
        match store.write(&golden_path, output) {
            Ok(status) => {
                summary.record(status);
                reporter.on_written(file, &golden_path, status);
            }
            Err(e) => {
                summary.failed += 1;
                reporter.on_storage_error(file, &e);
            }
        }
    }

    summary
}
