//! Test corpus discovery
//!
//! A test is any regular file directly inside the test directory whose extension
//! matches the configured input extension (`*.in` by default). Subdirectories, such
//! as the golden directory, are not scanned.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("could not read test directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("no *.{extension} test files found in {}", .path.display())]
    Empty { path: PathBuf, extension: String },
}

/// Enumerate test inputs in `dir`.
///
/// The result is sorted by path so console output is stable between runs; nothing
/// in the runner relies on the order.
pub fn discover_test_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, CorpusError> {
    let entries = fs::read_dir(dir).map_err(|source| CorpusError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CorpusError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(CorpusError::Empty {
            path: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "discovered test files");
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discovers_only_matching_extension() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.in"), "").unwrap();
        fs::write(dir.path().join("a.in"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("in"), "").unwrap();

        let files = discover_test_files(dir.path(), "in").unwrap();
        assert_eq!(files, vec![dir.path().join("a.in"), dir.path().join("b.in")]);
    }

    #[test]
    fn test_does_not_recurse() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("top.in"), "").unwrap();
        fs::create_dir(dir.path().join("golden")).unwrap();
        fs::write(dir.path().join("golden/nested.in"), "").unwrap();

        let files = discover_test_files(dir.path(), "in").unwrap();
        assert_eq!(files, vec![dir.path().join("top.in")]);
    }

    #[test]
    fn test_skips_directories_with_matching_name() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("weird.in")).unwrap();
        fs::write(dir.path().join("real.in"), "").unwrap();

        let files = discover_test_files(dir.path(), "in").unwrap();
        assert_eq!(files, vec![dir.path().join("real.in")]);
    }

    #[test]
    fn test_empty_directory_is_error() {
        let dir = tempdir().unwrap();
        let err = discover_test_files(dir.path(), "in").unwrap_err();
        assert!(matches!(err, CorpusError::Empty { .. }));
        assert!(err.to_string().starts_with("no *.in test files found in "));
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempdir().unwrap();
        let err = discover_test_files(&dir.path().join("absent"), "in").unwrap_err();
        assert!(matches!(err, CorpusError::ReadDir { .. }));
    }
}
