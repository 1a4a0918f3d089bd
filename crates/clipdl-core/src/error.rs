//! Error types for the fetch/transcode pipeline.

use thiserror::Error;

/// Result type for per-clip pipeline operations.
pub type ClipResult<T> = Result<T, DownloadError>;

/// Errors that can occur while fetching or trimming a single clip.
///
/// These never escape the worker pool as `Err`: each one is rendered into
/// the `detail` field of a failed task result.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("yt-dlp not found in PATH")]
    YtDlpNotFound,

    #[error("ffmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("fetch failed: {message}")]
    Fetch { message: String },

    /// The fetch tool exited 0 but the scratch directory did not end up
    /// holding exactly one file, so there is nothing unambiguous to trim.
    #[error("fetch produced {found} files, expected exactly one")]
    FetchOutputAmbiguous { found: usize },

    #[error("transcode failed: {message}")]
    Transcode { message: String },

    #[error("{phase} timed out after {secs} seconds")]
    Timeout { phase: &'static str, secs: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    /// Fetch failure carrying the tool's stderr (or a fallback note).
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Transcode failure carrying the tool's stderr (or a fallback note).
    pub fn transcode(message: impl Into<String>) -> Self {
        Self::Transcode {
            message: message.into(),
        }
    }
}
