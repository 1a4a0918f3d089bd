//! Shared subprocess runner for the external tools.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

use crate::error::{ClipResult, DownloadError};

/// Captured outcome of one tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stderr: String,
}

impl ToolOutput {
    /// Last non-empty stderr line, the usual place tools put the reason.
    pub fn stderr_tail(&self) -> &str {
        self.stderr
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .unwrap_or("unknown error")
    }
}

/// Runs an external tool to completion with an argument vector, capturing
/// stderr. Arguments are never passed through a shell.
///
/// With a timeout set, a tool that runs past it is killed and the phase
/// fails with a timeout error instead of blocking its worker forever.
pub async fn run_tool(
    program: &str,
    args: &[String],
    timeout: Option<Duration>,
    phase: &'static str,
) -> ClipResult<ToolOutput> {
    tracing::debug!(%program, ?args, "running {} tool", phase);

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()?;

    // Drain stderr concurrently so the child cannot block on a full pipe.
    let stderr_pipe = child.stderr.take();
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = stderr_pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    });

    let status = match timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                tracing::warn!(
                    %program,
                    secs = limit.as_secs(),
                    "{} tool timed out, killing process",
                    phase
                );
                let _ = child.kill().await;
                let _ = stderr_task.await;
                return Err(DownloadError::Timeout {
                    phase,
                    secs: limit.as_secs(),
                });
            }
        },
        None => child.wait().await?,
    };

    let stderr_buf = stderr_task.await.unwrap_or_default();
    Ok(ToolOutput {
        status,
        stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
    })
}
