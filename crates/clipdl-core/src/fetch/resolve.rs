//! Locating the file produced by the fetch tool.

use std::path::{Path, PathBuf};

use crate::error::{ClipResult, DownloadError};

/// Returns the single regular file inside `scratch_dir`.
///
/// The scratch directory is private to one task and emptied before each
/// fetch attempt, so exactly one file means the fetch can be trusted.
/// Zero files (tool lied about success) or several (leftover fragments)
/// fail the task without a retry, since the tool already exited cleanly.
pub fn resolve_fetched_file(scratch_dir: &Path) -> ClipResult<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(scratch_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }

    match files.len() {
        1 => Ok(files.remove(0)),
        found => Err(DownloadError::FetchOutputAmbiguous { found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn single_file_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fetch.mp4");
        fs::write(&path, b"video").unwrap();

        assert_eq!(resolve_fetched_file(dir.path()).unwrap(), path);
    }

    #[test]
    fn empty_dir_is_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_fetched_file(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            DownloadError::FetchOutputAmbiguous { found: 0 }
        ));
    }

    #[test]
    fn several_files_are_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fetch.mp4"), b"video").unwrap();
        fs::write(dir.path().join("fetch.mp4.part"), b"partial").unwrap();

        let err = resolve_fetched_file(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            DownloadError::FetchOutputAmbiguous { found: 2 }
        ));
    }

    #[test]
    fn subdirectories_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("fragments")).unwrap();
        let path = dir.path().join("fetch.webm");
        fs::write(&path, b"video").unwrap();

        assert_eq!(resolve_fetched_file(dir.path()).unwrap(), path);
    }

    #[test]
    fn file_suffix_does_not_matter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fetch.mkv");
        fs::write(&path, b"video").unwrap();

        assert_eq!(resolve_fetched_file(dir.path()).unwrap(), path);
    }
}
