//! Output normalization
//!
//! Two passes turn raw interpreter output into text that compares stably:
//!
//! 1. [`strip_interpreter_noise`] drops the version banner and the statistics lines
//!    Inpla prints at non-deterministic points during evaluation.
//! 2. [`normalize`] unifies line endings and trims trailing whitespace. Both sides of
//!    every comparison go through this pass.
//!
//! The statistics filter matches on a plain substring, so a genuine output line that
//! contains [`STATISTICS_MARKER`] is dropped as well.

/// Substring identifying an interpreter statistics line, e.g. `(5 interactions, 0.01 sec)`.
pub const STATISTICS_MARKER: &str = "interactions";

/// Remove the banner (first line) and every statistics line from raw interpreter output.
///
/// Surviving lines keep their relative order and are rejoined with `\n`.
pub fn strip_interpreter_noise(raw: &str) -> String {
    raw.split('\n')
        .skip(1)
        .filter(|line| !line.contains(STATISTICS_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unify line endings to `\n` and trim trailing whitespace from the end of the text.
///
/// Whitespace at the end of individual lines is left alone.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified.trim_end().to_string()
}

/// Both passes, in the order the runner applies them to captured output.
pub fn clean_output(raw: &str) -> String {
    normalize(&strip_interpreter_noise(raw))
}
