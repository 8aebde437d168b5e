//! Human-readable manifest summary for the CLI info path.

use std::fmt::Write;

use super::{Manifest, MediaInfo, TrackKind};

/// Renders a track/quality overview of the manifest.
pub fn render_info(manifest: &Manifest, url: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Manifest URL {}", url);
    for (i, track) in manifest.tracks.iter().enumerate() {
        let kind = match track.kind {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
            TrackKind::Other => "other",
        };
        let _ = writeln!(out, "Stream: {} Type: {}", i, kind);
        let _ = writeln!(out, "\tQuality Levels:");
        for (j, q) in track.qualities.iter().enumerate() {
            match &q.media {
                MediaInfo::Video {
                    max_width,
                    max_height,
                } => {
                    let size = format!("{}x{}", max_width, max_height);
                    let _ = writeln!(
                        out,
                        "\t{:2}: {:4} {:>10} @ {:7} bps",
                        j, q.fourcc, size, q.bitrate
                    );
                }
                MediaInfo::Audio {
                    channels,
                    sampling_rate,
                    bits_per_sample,
                } => {
                    let _ = writeln!(
                        out,
                        "\t{:2}: {:4} {}Hz {}bits {}ch @ {:7} bps",
                        j, q.fourcc, sampling_rate, bits_per_sample, channels, q.bitrate
                    );
                }
                MediaInfo::Other => {
                    let _ = writeln!(out, "\t{:2}: {:4} @ {:7} bps", j, q.fourcc, q.bitrate);
                }
            }
        }
    }
    out
}
