//! Probe error type for retry classification.

use std::fmt;

/// Error returned by a single chunk probe (curl failure or HTTP error).
/// Typed so the retry policy can classify before the engine folds the
/// failure into a status code.
#[derive(Debug)]
pub enum ProbeError {
    /// Curl reported an error (timeout, connection reset, bad status line).
    Curl(curl::Error),
    /// HTTP response had a non-success status.
    Http(u32),
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Curl(e) => write!(f, "{}", e),
            ProbeError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProbeError::Curl(e) => Some(e),
            ProbeError::Http(_) => None,
        }
    }
}
