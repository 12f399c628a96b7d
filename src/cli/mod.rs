//! CLI module for the golden runner
//!
//! ## Usage
//!
//! ```text
//! golden-runner <INTERPRETER> [--mode compare|generate] [--verbose]
//! ```
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::{DEFAULT_GOLDEN_DIR, DEFAULT_SUCCESS_CODE, DEFAULT_TEST_DIR, Mode, RunnerConfig};
use crate::version::VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-file regression runner for the Inpla interpreter
#[derive(Parser, Debug)]
#[command(name = "golden-runner")]
#[command(version = VERSION)]
#[command(about = "Run Inpla against the test corpus and compare with golden files", long_about = None)]
pub struct Cli {
    /// Path to the interpreter executable
    #[arg(value_name = "INTERPRETER")]
    pub interpreter: PathBuf,

    /// Compare against golden files, or regenerate them
    #[arg(short, long, value_enum, default_value_t = Mode::Compare)]
    pub mode: Mode,

    /// Print each interpreter invocation
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory containing the *.in test inputs
    #[arg(long, value_name = "DIR", default_value = DEFAULT_TEST_DIR)]
    pub test_dir: PathBuf,

    /// Directory containing the *.golden files
    #[arg(long, value_name = "DIR", default_value = DEFAULT_GOLDEN_DIR)]
    pub golden_dir: PathBuf,

    /// Interpreter exit code that means success
    #[arg(long, value_name = "CODE", default_value_t = DEFAULT_SUCCESS_CODE, allow_negative_numbers = true)]
    pub success_code: i32,
}

impl Cli {
    /// Build the run configuration from parsed arguments.
    pub fn into_config(self) -> RunnerConfig {
        RunnerConfig::new(self.interpreter)
            .with_test_dir(self.test_dir)
            .with_golden_dir(self.golden_dir)
            .with_success_code(self.success_code)
            .with_verbose(self.verbose)
            .with_mode(self.mode)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors exit with 1 rather than clap's default of 2.
            let code = if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
            process::exit(code.0);
        }
    };

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the parsed command line and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.into_config();
    commands::run_golden_tests(&config)
}

// ============================================================================
// Tests
// ============================================================================
