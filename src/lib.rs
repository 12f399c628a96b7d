#![forbid(unsafe_code)]
//! Golden-file regression runner for the Inpla interpreter
//!
//! Runs an interpreter over a corpus of `*.in` files, normalizes what it prints, and
//! either compares the result with recorded `*.golden` files or records new ones.
//!
//! ## Pipeline
//!
//! `corpus` → `process` → `normalize` → `golden` (which uses `diff`), driven by
//! `suite` and reported through `report`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod diff;
pub mod golden;
pub mod normalize;
pub mod process;
pub mod report;
pub mod suite;
pub mod version;

pub use config::{Mode, RunnerConfig};
pub use diff::{EOF_MARKER, Mismatch, first_mismatch};
pub use golden::{CompareOutcome, GoldenStore, StorageError, WriteStatus};
pub use normalize::{clean_output, normalize, strip_interpreter_noise};
pub use process::{CapturedOutput, InterpreterRunner, ProcessError, ProcessRunner};
pub use suite::{SuiteOutcome, run_suite};
