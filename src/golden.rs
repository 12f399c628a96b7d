//! Golden file storage
//!
//! Each test input `foo.in` owns exactly one golden file, `<golden-dir>/foo.golden`.
//! [`GoldenStore`] is the only thing that writes those files; compare mode only reads
//! them.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::diff::{Mismatch, first_mismatch};
use crate::normalize::normalize;

/// Extension of recorded golden files (without the dot).
pub const GOLDEN_EXTENSION: &str = "golden";

/// I/O failure while touching the golden directory.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("could not create golden directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("could not read golden file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write golden file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Result of comparing a candidate against its golden file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareOutcome {
    Equal,
    Mismatch(Mismatch),
    /// Nothing has been recorded for this input yet.
    GoldenMissing,
}

/// What [`GoldenStore::write`] did with a golden file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Created,
    Unchanged,
    Updated,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WriteStatus::Created => "CREATED",
            WriteStatus::Unchanged => "UNCHANGED",
            WriteStatus::Updated => "UPDATED",
        };
        f.write_str(label)
    }
}

/// Golden files rooted at a single directory.
#[derive(Debug, Clone)]
pub struct GoldenStore {
    dir: PathBuf,
}

impl GoldenStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Golden path for a test input: its file stem with a `.golden` extension, inside the
    /// store directory. Only the file name of `test_file` matters.
    pub fn golden_path(&self, test_file: &Path) -> PathBuf {
        let stem = test_file.file_stem().unwrap_or(test_file.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(GOLDEN_EXTENSION);
        self.dir.join(name)
    }

    /// Compare `candidate` against the golden file at `golden_path`.
    ///
    /// Both sides are normalized before diffing, so line-ending and trailing-whitespace
    /// differences never count as mismatches.
    pub fn compare(&self, golden_path: &Path, candidate: &str) -> Result<CompareOutcome, StorageError> {
        let recorded = match fs::read_to_string(golden_path) {
            Ok(recorded) => recorded,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CompareOutcome::GoldenMissing),
            Err(source) => {
                return Err(StorageError::Read {
                    path: golden_path.to_path_buf(),
                    source,
                });
            }
        };
        tracing::debug!(path = %golden_path.display(), bytes = recorded.len(), "read golden file");

        Ok(match first_mismatch(&normalize(&recorded), &normalize(candidate)) {
            None => CompareOutcome::Equal,
            Some(mismatch) => CompareOutcome::Mismatch(mismatch),
        })
    }

    /// Record `candidate` as the golden output at `golden_path`.
    ///
    /// The file is only rewritten when it is missing or its content differs after
    /// normalization. The candidate is written verbatim.
    pub fn write(&self, golden_path: &Path, candidate: &str) -> Result<WriteStatus, StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let status = match self.compare(golden_path, candidate)? {
            CompareOutcome::Equal => return Ok(WriteStatus::Unchanged),
            CompareOutcome::GoldenMissing => WriteStatus::Created,
            CompareOutcome::Mismatch(_) => WriteStatus::Updated,
        };

        fs::write(golden_path, candidate).map_err(|source| StorageError::Write {
            path: golden_path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %golden_path.display(), %status, "wrote golden file");

        Ok(status)
    }
}
