//! Bounded-parallelism worker pool for fetch/trim tasks.
//!
//! Keeps up to `num_jobs` tasks in flight at once; when one finishes, the
//! next queued task is started until the queue is empty. A degree of 1
//! runs the batch as a plain in-order loop with no task spawning at all.

mod backend;
mod worker;

pub use backend::{CommandBackend, MediaBackend};

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::retry::RetryPolicy;
use crate::task::{Task, TaskResult};
use crate::workspace::Workspace;

/// Options controlling one pool instance.
#[derive(Debug, Clone)]
pub struct DownloaderOptions {
    /// Maximum tasks in flight at once; clamped to at least 1.
    pub num_jobs: usize,
    /// Scratch root for in-flight fetches, created on first use and
    /// removed after the batch.
    pub workspace_dir: PathBuf,
    /// Retry policy for the fetch phase.
    pub retry: RetryPolicy,
}

/// Worker pool executing fetch/trim tasks.
pub struct ClipDownloader<B> {
    options: DownloaderOptions,
    backend: Arc<B>,
}

impl<B: MediaBackend + 'static> ClipDownloader<B> {
    pub fn new(options: DownloaderOptions, backend: B) -> Self {
        Self {
            options,
            backend: Arc::new(backend),
        }
    }

    /// Runs every task to completion and returns one result per task.
    ///
    /// Results are additionally streamed into `progress_tx` (when given)
    /// as they land, so the caller can report while the batch runs. With
    /// `num_jobs == 1` results keep task order; otherwise they arrive in
    /// completion order.
    ///
    /// An empty task list returns immediately without touching the
    /// workspace directory. Per-task failures are reported inside the
    /// results; `Err` here means the pool itself broke (a worker panic).
    pub async fn run(
        &self,
        tasks: Vec<Task>,
        progress_tx: Option<mpsc::Sender<TaskResult>>,
    ) -> Result<Vec<TaskResult>> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let workspace = Arc::new(Workspace::acquire(&self.options.workspace_dir)?);
        let num_jobs = self.options.num_jobs.max(1);
        tracing::info!(
            tasks = tasks.len(),
            num_jobs,
            workspace = %workspace.path().display(),
            "starting download batch"
        );

        let results = if num_jobs == 1 {
            self.run_sequential(tasks, &workspace, progress_tx.as_ref())
                .await
        } else {
            self.run_parallel(tasks, num_jobs, &workspace, progress_tx.as_ref())
                .await?
        };

        Ok(results)
    }

    async fn run_sequential(
        &self,
        tasks: Vec<Task>,
        workspace: &Workspace,
        progress_tx: Option<&mpsc::Sender<TaskResult>>,
    ) -> Vec<TaskResult> {
        let mut results = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let result =
                worker::execute_task(&*self.backend, workspace, &self.options.retry, task).await;
            if let Some(tx) = progress_tx {
                let _ = tx.send(result.clone()).await;
            }
            results.push(result);
        }
        results
    }

    async fn run_parallel(
        &self,
        tasks: Vec<Task>,
        num_jobs: usize,
        workspace: &Arc<Workspace>,
        progress_tx: Option<&mpsc::Sender<TaskResult>>,
    ) -> Result<Vec<TaskResult>> {
        let total = tasks.len();
        let mut queue = tasks.into_iter();
        let mut results = Vec::with_capacity(total);
        let mut join_set = tokio::task::JoinSet::new();

        loop {
            while join_set.len() < num_jobs {
                let Some(task) = queue.next() else {
                    break;
                };
                let backend = Arc::clone(&self.backend);
                let workspace = Arc::clone(workspace);
                let retry = self.options.retry;
                join_set.spawn(async move {
                    worker::execute_task(&*backend, &workspace, &retry, &task).await
                });
            }

            if join_set.is_empty() {
                break;
            }

            let Some(res) = join_set.join_next().await else {
                break;
            };
            let result = res.map_err(|e| anyhow::anyhow!("worker task join: {}", e))?;
            if let Some(tx) = progress_tx {
                let _ = tx.send(result.clone()).await;
            }
            results.push(result);
        }

        Ok(results)
    }
}
