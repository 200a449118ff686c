//! Retry policy for gateway requests.
//!
//! The policy is a pure function from (failure, attempt index, budget) to a
//! decision, so the synchronous and asynchronous request loops share one
//! classification and one backoff schedule and differ only in how they sleep.
//!
//! # Transience rules
//!
//! - Transport-level failures (connection refused, DNS, timeout) are always
//!   retryable.
//! - HTTP status failures are retryable only for 408, 429, and 5xx. Everything
//!   else (404, 400, 401, ...) fails immediately regardless of remaining budget.
//!
//! Backoff is exponential starting at one second: attempt `n` sleeps `2^n`
//! seconds before attempt `n + 1`.

use std::time::Duration;

/// One failed request attempt, prior to terminal-error construction.
#[derive(Debug)]
pub enum AttemptFailure {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),

    /// The server answered with a non-2xx status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as received.
        body: String,
    },
}

impl AttemptFailure {
    /// Whether this failure is transient and worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => {
                matches!(*status, 408 | 429) || *status >= 500
            }
        }
    }
}

/// Decision for a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given duration, then make the next attempt.
    Backoff(Duration),

    /// Stop retrying; the failure becomes the terminal cause.
    GiveUp,
}

/// Backoff delay after attempt `attempt` (zero-based): `2^attempt` seconds.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1u64 << attempt.min(63))
}

/// Evaluate a failed attempt against the retry budget.
///
/// `attempt` is the zero-based index of the attempt that just failed;
/// `max_retries` is the number of retries allowed beyond the first attempt.
pub fn evaluate(failure: &AttemptFailure, attempt: u32, max_retries: u32) -> RetryDecision {
    if attempt < max_retries && failure.is_transient() {
        RetryDecision::Backoff(backoff_delay(attempt))
    } else {
        RetryDecision::GiveUp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> AttemptFailure {
        AttemptFailure::Status {
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn test_backoff_delay_doubles() {
        assert_eq!(backoff_delay(0), Duration::from_secs(1));
        assert_eq!(backoff_delay(1), Duration::from_secs(2));
        assert_eq!(backoff_delay(2), Duration::from_secs(4));
        assert_eq!(backoff_delay(3), Duration::from_secs(8));
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(status(408).is_transient());
        assert!(status(429).is_transient());
        assert!(status(500).is_transient());
        assert!(status(502).is_transient());
        assert!(status(503).is_transient());
        assert!(status(599).is_transient());
    }

    #[test]
    fn test_non_retryable_statuses() {
        assert!(!status(400).is_transient());
        assert!(!status(401).is_transient());
        assert!(!status(403).is_transient());
        assert!(!status(404).is_transient());
        assert!(!status(422).is_transient());
    }

    #[test]
    fn test_evaluate_backs_off_within_budget() {
        assert_eq!(
            evaluate(&status(500), 0, 3),
            RetryDecision::Backoff(Duration::from_secs(1))
        );
        assert_eq!(
            evaluate(&status(500), 2, 3),
            RetryDecision::Backoff(Duration::from_secs(4))
        );
    }

    #[test]
    fn test_evaluate_gives_up_at_budget() {
        assert_eq!(evaluate(&status(500), 3, 3), RetryDecision::GiveUp);
    }

    #[test]
    fn test_evaluate_gives_up_on_fatal_status_with_budget_left() {
        assert_eq!(evaluate(&status(404), 0, 5), RetryDecision::GiveUp);
    }

    #[test]
    fn test_zero_retries_never_backs_off() {
        assert_eq!(evaluate(&status(503), 0, 0), RetryDecision::GiveUp);
    }
}
