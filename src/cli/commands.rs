//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use crate::config::RunnerConfig;
use crate::process::InterpreterRunner;
use crate::report::ConsoleReporter;
use crate::suite::run_suite;

use super::{CliError, CliResult, ExitCode};

/// Run the golden suite described by `config` against the real interpreter.
///
/// A failed run returns an error with an empty message: the reporter has already
/// printed everything the user needs.
pub fn run_golden_tests(config: &RunnerConfig) -> CliResult<ExitCode> {
    let runner = InterpreterRunner::new(&config.interpreter, config.success_code).with_verbose(config.verbose);
    let mut reporter = ConsoleReporter::stdout();

    let outcome = run_suite(config, &runner, &mut reporter).map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    if outcome.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::new("", ExitCode::FAILURE))
    }
}
