//! First-divergence line diff
//!
//! Compares two normalized texts line by line and reports only the first place they
//! disagree. A content difference inside the overlapping lines always wins over a
//! difference in length; when one side runs out first, the missing line is reported
//! as [`EOF_MARKER`].

use std::fmt;

/// Stand-in for the line that does not exist on the shorter side.
pub const EOF_MARKER: &str = "<EOF>";

/// The first point where two texts diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Line number of the divergence (1-indexed for content mismatches)
    pub line: usize,
    /// Line from the recorded (expected) side, or [`EOF_MARKER`]
    pub expected: String,
    /// Line from the candidate (actual) side, or [`EOF_MARKER`]
    pub actual: String,
}

impl Mismatch {
    fn new(line: usize, expected: &str, actual: &str) -> Self {
        Self {
            line,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: expected {:?}, got {:?}",
            self.line, self.expected, self.actual
        )
    }
}

/// Find the first line where `expected` and `actual` differ.
///
/// Returns `None` when both texts have the same lines. Inputs are expected to be
/// normalized already; this function splits on `\n` only.
///
/// When the texts agree on every shared line but differ in length, the mismatch is
/// placed at the shorter side's line count, with [`EOF_MARKER`] on the shorter side.
pub fn first_mismatch(expected: &str, actual: &str) -> Option<Mismatch> {
    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();

    if let Some((idx, (exp, act))) = expected_lines
        .iter()
        .zip(&actual_lines)
        .enumerate()
        .find(|(_, (exp, act))| exp != act)
    {
        return Some(Mismatch::new(idx + 1, exp, act));
    }

    let (exp_len, act_len) = (expected_lines.len(), actual_lines.len());
    if exp_len > act_len {
        Some(Mismatch::new(act_len, expected_lines[act_len], EOF_MARKER))
    } else if exp_len < act_len {
        Some(Mismatch::new(exp_len, EOF_MARKER, actual_lines[exp_len]))
    } else {
        None
    }
}
