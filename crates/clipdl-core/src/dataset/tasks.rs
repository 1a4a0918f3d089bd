//! Task preparation: set difference against already-downloaded outputs.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

use super::collect::VideoCollection;
use crate::task::Task;

/// Builds the task list for one run: every collected video whose output
/// file `{output_dir}/{id}.{extension}` does not exist yet.
///
/// A single directory listing is taken up front so that datasets with
/// hundreds of thousands of entries do not stat the output directory once
/// per video. Tasks come out ordered by identifier.
pub fn prepare_tasks(
    collection: &VideoCollection,
    output_dir: &Path,
    extension: &str,
) -> Result<Vec<Task>> {
    let downloaded = downloaded_files(output_dir, extension)?;

    let mut tasks = Vec::new();
    for (id, entry) in &collection.videos {
        let file_name = OsString::from(format!("{}.{}", id, extension));
        if downloaded.contains(&file_name) {
            continue;
        }
        tasks.push(Task {
            source_locator: entry.url.clone(),
            destination_path: output_dir.join(&file_name),
            segment_start: entry.segment_start,
            segment_end: entry.segment_end,
        });
    }

    Ok(tasks)
}

/// Names of regular files in `output_dir` carrying the given extension.
fn downloaded_files(output_dir: &Path, extension: &str) -> Result<HashSet<OsString>> {
    let mut names = HashSet::new();
    let entries = std::fs::read_dir(output_dir)
        .with_context(|| format!("list output dir: {}", output_dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("list output dir: {}", output_dir.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map(|e| e == extension).unwrap_or(false) {
            names.insert(entry.file_name());
        }
    }
    Ok(names)
}
