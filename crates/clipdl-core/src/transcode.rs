//! Transcode phase: trim the fetched video to its segment.

use std::path::Path;
use std::time::Duration;

use crate::command::run_tool;
use crate::error::{ClipResult, DownloadError};
use crate::task::Task;

/// External tool used to trim fetched videos.
pub const TRANSCODE_TOOL: &str = "ffmpeg";

/// Cuts the task's segment out of `fetched` into the task's destination.
///
/// Stream-copies the video track and drops audio, so the cut lands on
/// keyframe boundaries rather than exact timestamps. One attempt only:
/// a failing trim is deterministic, so the caller never retries it.
pub async fn run_transcode(
    fetched: &Path,
    task: &Task,
    timeout: Option<Duration>,
) -> ClipResult<()> {
    let args = vec![
        "-i".to_string(),
        fetched.to_string_lossy().into_owned(),
        "-ss".to_string(),
        task.segment_start.to_string(),
        "-t".to_string(),
        task.segment_duration().to_string(),
        "-c:v".to_string(),
        "copy".to_string(),
        "-an".to_string(),
        "-threads".to_string(),
        "1".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        task.destination_path.to_string_lossy().into_owned(),
    ];

    let output = run_tool(TRANSCODE_TOOL, &args, timeout, "transcode").await?;
    if !output.status.success() {
        return Err(DownloadError::transcode(output.stderr_tail()));
    }

    Ok(())
}
