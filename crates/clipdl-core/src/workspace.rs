//! Batch-lifetime scratch space for in-flight fetches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Scratch root for one batch of tasks.
///
/// Created before the first task runs and removed recursively when dropped,
/// so leftovers from failed fetches never outlive the run. Workers never
/// share files inside it: each gets its own [`ScratchDir`].
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Creates the scratch root (and any missing parents).
    pub fn acquire(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Allocates a private, uniquely named scratch directory for one task.
    pub fn scratch_dir(&self) -> io::Result<ScratchDir> {
        let dir = self.root.join(Uuid::new_v4().to_string());
        fs::create_dir(&dir)?;
        Ok(ScratchDir { dir })
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_dir_all(&self.root) {
            if err.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %self.root.display(), %err, "could not remove scratch root");
            }
        }
    }
}

/// Scratch directory owned by a single task.
///
/// Removed explicitly after a successful download; failed tasks leave
/// theirs behind for the workspace teardown to sweep.
#[derive(Debug)]
pub struct ScratchDir {
    dir: PathBuf,
}

impl ScratchDir {
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Empties the directory so a retried fetch starts from a clean slate
    /// and cannot leave a stale partial file for output resolution to find.
    pub fn reset(&self) -> io::Result<()> {
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(entry.path())?;
            } else {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    /// Removes the directory and everything in it.
    pub fn remove(self) -> io::Result<()> {
        fs::remove_dir_all(&self.dir)
    }
}
