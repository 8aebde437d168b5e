//! Verification engine: expand (track, quality, chunk) triples into URLs and
//! probe them with bounded parallelism.
//!
//! Probes for all chunks of one (track, quality) pair share a worker pool
//! that is created, drained, and joined before the next pair begins; the
//! failing list grows across pairs until the whole manifest is covered.

mod pool;

use crate::manifest::{Manifest, Track};
use crate::probe::{ProbeOptions, ProbeResult, TRANSPORT_FAILURE_STATUS};
use crate::resolver::{self, ResolveError};
use crate::retry::RetryPolicy;

/// Knobs for one verification run. Shared read-only across probe workers.
#[derive(Debug, Clone, Copy)]
pub struct VerifyOptions {
    /// Worker pool size per (track, quality) pair.
    pub parallel_probes: usize,
    pub probe: ProbeOptions,
    pub retry: RetryPolicy,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            parallel_probes: default_parallelism(),
            probe: ProbeOptions::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Default pool size: twice the available cores.
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() * 2)
        .unwrap_or(8)
}

/// Verifies every chunk of every quality level of every track.
///
/// Returns the aggregated failing probes; an empty list means the stream is
/// intact. Individual probe failures and malformed templates never abort the
/// run.
pub fn verify(
    base_url: &str,
    manifest: &Manifest,
    opts: &VerifyOptions,
) -> crate::report::VerificationReport {
    let mut failures: Vec<ProbeResult> = Vec::new();

    for (track_index, track) in manifest.tracks.iter().enumerate() {
        tracing::info!(track = track_index, kind = ?track.kind, "checking track");
        for (quality_index, quality) in track.qualities.iter().enumerate() {
            tracing::info!(
                track = track_index,
                quality = quality_index,
                bitrate = quality.bitrate,
                "checking quality level"
            );

            let quality_segment = match resolver::quality_path_segment(track, quality) {
                Ok(segment) => segment,
                Err(e) => {
                    // One failure entry for the pair; the run continues.
                    failures.push(template_failure(base_url, track, &e));
                    continue;
                }
            };

            let urls = chunk_urls(base_url, track, &quality_segment, &mut failures);
            let results = pool::run_probes(urls, opts);
            failures.extend(results.into_iter().filter(|r| !r.is_success()));
        }
    }

    crate::report::VerificationReport { failures }
}

/// Resolves every chunk URL for one (track, quality) pair.
///
/// The implicit start token is the running total of prior chunk durations
/// across the track's whole timeline, independent of the quality level.
/// Chunks whose segment cannot be resolved become failure entries instead of
/// aborting the pair.
fn chunk_urls(
    base_url: &str,
    track: &Track,
    quality_segment: &str,
    failures: &mut Vec<ProbeResult>,
) -> Vec<String> {
    let mut urls = Vec::with_capacity(track.chunks.len());
    let mut elapsed: u64 = 0;
    for chunk in &track.chunks {
        match resolver::chunk_path_segment(track, chunk, elapsed) {
            Ok(segment) => urls.push(resolver::chunk_url(base_url, quality_segment, &segment)),
            Err(e) => failures.push(template_failure(base_url, track, &e)),
        }
        elapsed += chunk.duration;
    }
    urls
}

fn template_failure(base_url: &str, track: &Track, e: &ResolveError) -> ProbeResult {
    tracing::warn!(template = %track.url_template, error = %e, "malformed URL template");
    ProbeResult {
        url: format!("{}/{}", base_url, track.url_template),
        status: TRANSPORT_FAILURE_STATUS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{ChunkDescriptor, MediaInfo, QualityLevel, Track, TrackKind};

    fn test_track(template: &str, chunks: Vec<ChunkDescriptor>) -> Track {
        Track {
            kind: TrackKind::Video,
            url_template: template.to_string(),
            qualities: vec![QualityLevel {
                bitrate: 500_000,
                fourcc: "H264".to_string(),
                media: MediaInfo::Other,
                custom_attributes: Vec::new(),
            }],
            chunks,
        }
    }

    #[test]
    fn implicit_tokens_accumulate_across_the_track_timeline() {
        let track = test_track(
            "QualityLevels({bitrate})/Fragments(video={start time})",
            vec![
                ChunkDescriptor {
                    start_time: Some("0".to_string()),
                    duration: 2000,
                },
                ChunkDescriptor {
                    start_time: None,
                    duration: 2000,
                },
                ChunkDescriptor {
                    start_time: None,
                    duration: 3000,
                },
            ],
        );
        let mut failures = Vec::new();
        let urls = chunk_urls("http://o.example.com/c", &track, "QualityLevels(500000)", &mut failures);
        assert!(failures.is_empty());
        assert_eq!(
            urls,
            vec![
                "http://o.example.com/c/QualityLevels(500000)/Fragments(video=0)",
                "http://o.example.com/c/QualityLevels(500000)/Fragments(video=2000)",
                "http://o.example.com/c/QualityLevels(500000)/Fragments(video=4000)",
            ]
        );
    }

    #[test]
    fn malformed_template_becomes_failure_entry_per_chunk() {
        let track = test_track(
            "QualityLevelsOnly",
            vec![
                ChunkDescriptor {
                    start_time: None,
                    duration: 1000,
                },
                ChunkDescriptor {
                    start_time: None,
                    duration: 1000,
                },
            ],
        );
        let mut failures = Vec::new();
        let urls = chunk_urls("http://o.example.com/c", &track, "QualityLevelsOnly", &mut failures);
        assert!(urls.is_empty());
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| f.status == TRANSPORT_FAILURE_STATUS));
    }
}
