//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::ProbeError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs a closure until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the backoff duration then tries again.
pub fn run_with_retry<F>(policy: &RetryPolicy, mut f: F) -> Result<(), ProbeError>
where
    F: FnMut() -> Result<(), ProbeError>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(()) => return Ok(()),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn default_policy_returns_first_error() {
        let policy = RetryPolicy::default();
        let mut calls = 0;
        let result = run_with_retry(&policy, || {
            calls += 1;
            Err(ProbeError::Http(503))
        });
        assert!(matches!(result, Err(ProbeError::Http(503))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn retries_until_success_within_budget() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        };
        let mut calls = 0;
        let result = run_with_retry(&policy, || {
            calls += 1;
            if calls < 3 {
                Err(ProbeError::Http(503))
            } else {
                Ok(())
            }
        });
        assert!(result.is_ok());
        assert_eq!(calls, 3);
    }

    #[test]
    fn hard_http_errors_not_retried() {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        };
        let mut calls = 0;
        let result = run_with_retry(&policy, || {
            calls += 1;
            Err(ProbeError::Http(404))
        });
        assert!(matches!(result, Err(ProbeError::Http(404))));
        assert_eq!(calls, 1);
    }
}
