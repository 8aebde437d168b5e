//! Probe retry and backoff policy.
//!
//! The checker is authoritative on a single attempt by default
//! (`max_attempts = 1`); operators can raise the budget in the config to get
//! bounded exponential backoff on transient failures (timeouts, throttling,
//! 5xx). Hard failures (4xx) are never retried.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::ProbeError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
