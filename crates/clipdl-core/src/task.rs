//! Task and result value types.

use std::path::PathBuf;

/// One unit of work: fetch a clip's source video and trim it to a segment.
///
/// Constructed during task preparation and never mutated afterwards; each
/// task is handed to exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Where the clip comes from, as given in the dataset (typically a URL).
    pub source_locator: String,
    /// Final output file for the trimmed clip.
    pub destination_path: PathBuf,
    /// Segment start within the source video, in whole seconds.
    pub segment_start: u32,
    /// Segment end within the source video, in whole seconds.
    /// Always greater than `segment_start`.
    pub segment_end: u32,
}

impl Task {
    /// Segment duration in seconds.
    pub fn segment_duration(&self) -> u32 {
        self.segment_end - self.segment_start
    }
}

/// Outcome of one task, success or failure.
///
/// The pool produces exactly one of these per dispatched task. Failures are
/// facts to report, not errors to propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    /// Echo of the task's source locator.
    pub identifier: String,
    /// Whether the destination file exists after the pipeline ran.
    pub succeeded: bool,
    /// Human-readable outcome: `"Downloaded"` or a failure description.
    pub detail: String,
}

impl TaskResult {
    /// Successful download of `identifier`.
    pub fn downloaded(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            succeeded: true,
            detail: "Downloaded".to_string(),
        }
    }

    /// Failed task with a failure description.
    pub fn failed(identifier: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            succeeded: false,
            detail: detail.into(),
        }
    }
}
