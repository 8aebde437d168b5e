//! Aggregated verification outcome.

use crate::probe::ProbeResult;

/// Result of verifying every chunk of one manifest against one endpoint.
///
/// `failures` holds the probes whose status was not 200, in no particular
/// order; treat it as a set keyed by URL.
#[derive(Debug, Default)]
pub struct VerificationReport {
    pub failures: Vec<ProbeResult>,
}

impl VerificationReport {
    /// True when every probed chunk exists.
    pub fn pass(&self) -> bool {
        self.failures.is_empty()
    }

    /// Renders failures as `url status` pairs joined by `;`, for compact
    /// single-column output in job records.
    pub fn render_failures(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("{} {}", f.url, f.status))
            .collect::<Vec<_>>()
            .join(";")
    }
}
