//! Per-task pipeline: fetch with retry, then a single trim.

use crate::retry::{self, RetryPolicy};
use crate::task::{Task, TaskResult};
use crate::workspace::Workspace;

use super::backend::MediaBackend;

/// Runs one task to completion. Every failure becomes a result; nothing
/// in here can abort the batch.
///
/// The fetch phase runs in the task's private scratch directory, emptied
/// before every attempt so a failed attempt cannot leave a partial file
/// for output resolution to trip over. On success the worker removes its
/// scratch directory itself; on failure the directory stays behind for
/// the workspace teardown to sweep.
pub(super) async fn execute_task<B: MediaBackend>(
    backend: &B,
    workspace: &Workspace,
    policy: &RetryPolicy,
    task: &Task,
) -> TaskResult {
    let scratch = match workspace.scratch_dir() {
        Ok(scratch) => scratch,
        Err(err) => {
            tracing::warn!(url = %task.source_locator, %err, "could not allocate scratch dir");
            return TaskResult::failed(&task.source_locator, err.to_string());
        }
    };

    let fetched = retry::run_with_retry(policy, || {
        let reset = scratch.reset();
        let scratch_path = scratch.path().to_path_buf();
        async move {
            reset?;
            backend.fetch(task, &scratch_path).await
        }
    })
    .await;

    let fetched = match fetched {
        Ok(path) => path,
        Err(err) => {
            tracing::debug!(url = %task.source_locator, %err, "fetch phase failed");
            return TaskResult::failed(&task.source_locator, err.to_string());
        }
    };

    if let Err(err) = backend.trim(&fetched, task).await {
        tracing::debug!(url = %task.source_locator, %err, "transcode phase failed");
        return TaskResult::failed(&task.source_locator, err.to_string());
    }

    // The destination existing is the only success signal that counts.
    let succeeded = task.destination_path.exists();
    if let Err(err) = scratch.remove() {
        tracing::warn!(url = %task.source_locator, %err, "could not remove scratch dir");
    }

    TaskResult {
        identifier: task.source_locator.clone(),
        succeeded,
        detail: "Downloaded".to_string(),
    }
}
