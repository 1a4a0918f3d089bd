//! Retry policy for the fetch phase.
//!
//! Only failures of the fetch tool itself are worth retrying (flaky
//! network, throttling); everything else in the pipeline is deterministic
//! and fails the task on the first occurrence. The policy keeps the
//! attempt counter explicit so callers never loop unbounded.

mod policy;
mod run;

pub use policy::{classify, ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
