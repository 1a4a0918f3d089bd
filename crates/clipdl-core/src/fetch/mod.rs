//! Fetch phase: retrieve a task's source video into scratch space.
//!
//! The fetch tool decides the final file suffix itself, so the output
//! template uses its `%(ext)s` placeholder and the produced file is
//! located afterwards by [`resolve_fetched_file`].

mod resolve;

pub use resolve::resolve_fetched_file;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::command::run_tool;
use crate::error::{ClipResult, DownloadError};

/// External tool used to retrieve source videos.
pub const FETCH_TOOL: &str = "yt-dlp";

/// Output template inside the scratch directory; the tool substitutes the
/// real suffix for `%(ext)s`.
const OUTPUT_TEMPLATE: &str = "fetch.%(ext)s";

/// Fetches `url` into `scratch_dir` and returns the fetched file's path.
///
/// One attempt; the caller owns the retry loop and guarantees the scratch
/// directory is empty when this runs.
pub async fn run_fetch(
    url: &str,
    scratch_dir: &Path,
    timeout: Option<Duration>,
) -> ClipResult<PathBuf> {
    let template = scratch_dir.join(OUTPUT_TEMPLATE);
    let args = vec![
        "--quiet".to_string(),
        "--no-warnings".to_string(),
        "-f".to_string(),
        "mp4".to_string(),
        "-o".to_string(),
        template.to_string_lossy().into_owned(),
        url.to_string(),
    ];

    let output = run_tool(FETCH_TOOL, &args, timeout, "fetch").await?;
    if !output.status.success() {
        return Err(DownloadError::fetch(output.stderr_tail()));
    }

    resolve_fetched_file(scratch_dir)
}
