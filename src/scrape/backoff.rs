//! Retry classification with linear backoff
//!
//! Given an error and an attempt counter, decide whether to retry and how
//! long to wait first. The delay scales linearly with the attempt number:
//! attempt N waits N times the base delay. Deliberately not exponential;
//! the portal's rate limiter responds well to a slow, steady ramp.
//!
//! Two classifications exist: a generic one driven by an exclusion set of
//! status codes, and a condition-driven one that only retries errors which
//! mark themselves retryable (rate limits and soft walls).

use crate::ShigotoError;
use std::time::Duration;

/// Attempt ceiling, base delay, and the status codes never worth retrying.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub excluded_status_codes: Vec<u16>,
}

/// Decision for one failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    /// Wait this long, then try again.
    RetryAfter(Duration),
    /// Give up and let the caller handle the error.
    Fail,
}

/// Generic classification: retry anything whose status code is not excluded,
/// up to the attempt ceiling.
///
/// `attempt` starts at 1 for the first retry evaluation.
pub fn classify(error: &ShigotoError, attempt: u32, policy: &RetryPolicy) -> RetryAction {
    if attempt > policy.max_attempts {
        return RetryAction::Fail;
    }

    if let Some(status) = error.status_code() {
        if policy.excluded_status_codes.contains(&status) {
            return RetryAction::Fail;
        }
    }

    RetryAction::RetryAfter(policy.base_delay * attempt)
}

/// Condition-driven classification: only errors that mark themselves
/// retryable are retried, with the same linear delay.
pub fn classify_if_retryable(
    error: &ShigotoError,
    attempt: u32,
    policy: &RetryPolicy,
) -> RetryAction {
    if attempt > policy.max_attempts || !error.is_retryable() {
        return RetryAction::Fail;
    }

    RetryAction::RetryAfter(policy.base_delay * attempt)
}
