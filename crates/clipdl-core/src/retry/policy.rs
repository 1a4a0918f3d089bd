use std::time::Duration;

use crate::config::RetryConfig;
use crate::error::DownloadError;

/// Classification of a pipeline error for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Fetch tool failure; the source may come back on a later attempt.
    Transient,
    /// Everything else: retrying would reproduce the same failure.
    Fatal,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded-attempt policy with a fixed delay between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first). Never zero.
    pub max_attempts: u32,
    /// Delay before each re-attempt; zero retries immediately.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Builds the policy from the optional config section, falling back to
    /// defaults and clamping degenerate values.
    pub fn from_config(cfg: Option<&RetryConfig>) -> Self {
        match cfg {
            Some(cfg) => Self {
                max_attempts: cfg.max_attempts.max(1),
                delay: Duration::from_secs_f64(cfg.delay_secs.max(0.0)),
            },
            None => Self::default(),
        }
    }

    /// Decide what to do after a failed attempt.
    ///
    /// `attempt` is 1-based (1 = first attempt). Returns
    /// `RetryDecision::NoRetry` once `max_attempts` attempts have run or
    /// the error kind is fatal.
    pub fn decide(&self, attempt: u32, kind: ErrorKind) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        match kind {
            ErrorKind::Fatal => RetryDecision::NoRetry,
            ErrorKind::Transient => RetryDecision::RetryAfter(self.delay),
        }
    }
}

/// Maps a pipeline error to its retry kind.
///
/// Ambiguous fetch output is fatal even though it comes out of the fetch
/// phase: the attempt already succeeded at the tool level, so re-running
/// it would only reproduce the ambiguity.
pub fn classify(err: &DownloadError) -> ErrorKind {
    match err {
        DownloadError::Fetch { .. } => ErrorKind::Transient,
        _ => ErrorKind::Fatal,
    }
}
