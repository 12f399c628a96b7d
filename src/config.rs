//! Runner configuration
//!
//! Every tunable of a run lives in [`RunnerConfig`]. The CLI builds one from its
//! flags; tests build one directly with the `with_*` methods.

use std::path::{Path, PathBuf};

/// Exit code Inpla reports after an ordinary, error-free evaluation.
///
/// The interpreter does not exit with 0 on success, so the runner compares against this
/// exact value instead of checking `ExitStatus::success()`.
pub const DEFAULT_SUCCESS_CODE: i32 = 255;

/// Directory holding the `*.in` test inputs.
pub const DEFAULT_TEST_DIR: &str = "./test";

/// Directory holding the recorded `*.golden` outputs.
pub const DEFAULT_GOLDEN_DIR: &str = "./test/golden";

/// Extension (without the dot) that marks a file as a test input.
pub const DEFAULT_INPUT_EXTENSION: &str = "in";

/// What the runner does with the normalized output of each test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Mode {
    /// Compare against the recorded golden files.
    #[default]
    Compare,
    /// Overwrite the golden files with the current output.
    Generate,
}

/// Settings for a single run of the suite.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to the interpreter executable
    pub interpreter: PathBuf,
    /// Directory scanned for test inputs
    pub test_dir: PathBuf,
    /// Directory holding golden files
    pub golden_dir: PathBuf,
    /// Extension identifying test inputs
    pub input_extension: String,
    /// Exit code that counts as a successful interpreter run
    pub success_code: i32,
    /// Print each interpreter invocation before running it
    pub verbose: bool,
    /// Compare or regenerate
    pub mode: Mode,
}

impl RunnerConfig {
    /// Create a config for `interpreter` with all other settings at their defaults.
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
            test_dir: PathBuf::from(DEFAULT_TEST_DIR),
            golden_dir: PathBuf::from(DEFAULT_GOLDEN_DIR),
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            success_code: DEFAULT_SUCCESS_CODE,
            verbose: false,
            mode: Mode::default(),
        }
    }

    /// Set the directory scanned for test inputs
    pub fn with_test_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.test_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the golden file directory
    pub fn with_golden_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.golden_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the exit code treated as success
    pub fn with_success_code(mut self, code: i32) -> Self {
        self.success_code = code;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}
