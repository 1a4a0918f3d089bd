//! Retry loop: run an async operation until success or policy says stop.

use std::future::Future;

use super::policy::{classify, RetryDecision, RetryPolicy};
use crate::error::ClipResult;

/// Runs `op` until it succeeds or the policy says to stop, sleeping for
/// the configured delay between attempts. The closure is invoked once per
/// attempt, so per-attempt setup (like emptying a scratch directory)
/// belongs in its body.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> ClipResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClipResult<T>>,
{
    let mut attempt = 1u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let kind = classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(delay) => {
                        tracing::debug!(attempt, %e, "fetch attempt failed, retrying");
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }
                        attempt += 1;
                    }
                }
            }
        }
    }
}
