//! Seam between the worker pool and the external tools.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ClipResult, DownloadError};
use crate::task::Task;
use crate::{fetch, transcode};

/// Media operations a worker needs to run one task.
///
/// The production implementation shells out to the external tools; tests
/// substitute deterministic fakes so pool behavior can be checked without
/// network access or installed tools.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Fetches the task's source video into `scratch_dir` and returns the
    /// fetched file's path. The directory is empty when this is called;
    /// failures with a `Fetch` kind are retried by the worker.
    async fn fetch(&self, task: &Task, scratch_dir: &Path) -> ClipResult<PathBuf>;

    /// Trims `fetched` to the task's segment, writing the task's
    /// destination path. Called at most once per task.
    async fn trim(&self, fetched: &Path, task: &Task) -> ClipResult<()>;
}

/// Backend invoking yt-dlp and ffmpeg as subprocesses.
#[derive(Debug)]
pub struct CommandBackend {
    phase_timeout: Option<Duration>,
}

impl CommandBackend {
    /// Verifies both tools are on PATH so a missing binary aborts the run
    /// up front instead of failing every task one by one.
    pub fn new(phase_timeout: Option<Duration>) -> ClipResult<Self> {
        which::which(fetch::FETCH_TOOL).map_err(|_| DownloadError::YtDlpNotFound)?;
        which::which(transcode::TRANSCODE_TOOL).map_err(|_| DownloadError::FfmpegNotFound)?;
        Ok(Self { phase_timeout })
    }
}

#[async_trait]
impl MediaBackend for CommandBackend {
    async fn fetch(&self, task: &Task, scratch_dir: &Path) -> ClipResult<PathBuf> {
        fetch::run_fetch(&task.source_locator, scratch_dir, self.phase_timeout).await
    }

    async fn trim(&self, fetched: &Path, task: &Task) -> ClipResult<()> {
        transcode::run_transcode(fetched, task, self.phase_timeout).await
    }
}
