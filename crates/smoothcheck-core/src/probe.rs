//! Lightweight chunk existence probes.
//!
//! One HEAD request per chunk URL via libcurl; the body is never fetched.
//! A probe never fails the batch: HTTP errors are recorded with their
//! numeric status and transport-level failures with the sentinel status 0.

use std::time::Duration;

use crate::retry::{run_with_retry, ProbeError, RetryPolicy};

/// Sentinel status for transport-level failures (connection reset, bad
/// status line, timeout).
pub const TRANSPORT_FAILURE_STATUS: u32 = 0;

/// HTTP status that counts as a verified chunk.
pub const SUCCESS_STATUS: u32 = 200;

/// Outcome of one chunk probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub url: String,
    /// HTTP status, or 0 for a transport failure.
    pub status: u32,
}

impl ProbeResult {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Timeouts applied to each probe request.
#[derive(Debug, Clone, Copy)]
pub struct ProbeOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Probes one chunk URL, applying the retry policy to transient failures.
pub fn probe(url: String, policy: &RetryPolicy, opts: ProbeOptions) -> ProbeResult {
    let status = match run_with_retry(policy, || head_once(&url, opts)) {
        Ok(()) => SUCCESS_STATUS,
        Err(ProbeError::Http(code)) => {
            tracing::debug!(%url, code, "probe returned HTTP error");
            code
        }
        Err(ProbeError::Curl(e)) => {
            tracing::debug!(%url, error = %e, "probe transport failure");
            TRANSPORT_FAILURE_STATUS
        }
    };
    ProbeResult { url, status }
}

fn head_once(url: &str, opts: ProbeOptions) -> Result<(), ProbeError> {
    let status = perform_head(url, opts).map_err(ProbeError::Curl)?;
    if status == SUCCESS_STATUS {
        Ok(())
    } else {
        Err(ProbeError::Http(status))
    }
}

fn perform_head(url: &str, opts: ProbeOptions) -> Result<u32, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.request_timeout)?;
    easy.perform()?;
    easy.response_code()
}
