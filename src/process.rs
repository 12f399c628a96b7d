//! Interpreter invocation
//!
//! Runs the interpreter on one input file and classifies what went wrong when it does
//! not succeed. The interpreter is invoked as `<exe> -f <file>` with stdout captured and
//! stderr inherited from the runner.
//!
//! ## Failure taxonomy
//!
//! - [`ProcessError::StartupFailure`]: the process could not be spawned at all
//! - [`ProcessError::RuntimeFailure`]: reading stdout or waiting for exit failed
//! - [`ProcessError::NonZeroExit`]: the process exited, but not with the success code
//!
//! None of these are retried.

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use thiserror::Error;

/// Flag the interpreter expects in front of the input file.
const FILE_FLAG: &str = "-f";

/// Errors raised while running the interpreter on a single file
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start interpreter: {0}")]
    StartupFailure(#[source] io::Error),

    #[error("failed while running interpreter: {0}")]
    RuntimeFailure(#[source] io::Error),

    /// `None` when the process was terminated by a signal and has no exit code.
    #[error("{}", describe_exit(.0))]
    NonZeroExit(Option<i32>),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("interpreter exited with code {code}"),
        None => "interpreter terminated by signal".to_string(),
    }
}

/// Output captured from a successful interpreter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
}

/// Run the interpreter on one test input.
///
/// This is the seam between orchestration and the operating system, so a run can
/// be driven by a fake in tests.
pub trait ProcessRunner {
    fn run(&self, input: &Path) -> Result<CapturedOutput, ProcessError>;
}

/// Spawns the real interpreter executable.
#[derive(Debug, Clone)]
pub struct InterpreterRunner {
    executable: PathBuf,
    success_code: i32,
    verbose: bool,
}

impl InterpreterRunner {
    pub fn new(executable: impl Into<PathBuf>, success_code: i32) -> Self {
        Self {
            executable: executable.into(),
            success_code,
            verbose: false,
        }
    }

    /// Print every invocation before it runs.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The exact command line used for `input`, for diagnostics.
    pub fn command_line(&self, input: &Path) -> String {
        format!("{} {} \"{}\"", self.executable.display(), FILE_FLAG, input.display())
    }

    fn command(&self, input: &Path) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.arg(FILE_FLAG)
            .arg(input)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl ProcessRunner for InterpreterRunner {
    #[tracing::instrument(skip_all, fields(input = %input.display()))]
    fn run(&self, input: &Path) -> Result<CapturedOutput, ProcessError> {
        if self.verbose {
            eprintln!("Running: {}", self.command_line(input));
        }
        tracing::debug!(command = %self.command_line(input), "spawning interpreter");

        let mut child = self.command(input).spawn().map_err(ProcessError::StartupFailure)?;

        // Drain stdout before waiting, otherwise a full pipe deadlocks the child.
        let drained = match child.stdout.take() {
            Some(pipe) => read_output(pipe),
            None => Err(ProcessError::RuntimeFailure(io::Error::other(
                "interpreter stdout was not captured",
            ))),
        };
        let stdout = match drained {
            Ok(stdout) => stdout,
            Err(e) => {
                reap(&mut child);
                return Err(e);
            }
        };

        let status = child.wait().map_err(ProcessError::RuntimeFailure)?;
        tracing::debug!(status = ?status.code(), bytes = stdout.len(), "interpreter exited");

        match status.code() {
            Some(code) if code == self.success_code => Ok(CapturedOutput { stdout }),
            code => Err(ProcessError::NonZeroExit(code)),
        }
    }
}

/// Read an output stream to its end. Invalid UTF-8 is replaced, not rejected.
fn read_output(mut reader: impl Read) -> Result<String, ProcessError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(ProcessError::RuntimeFailure)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

// Best effort: the read error is what gets reported.
fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
