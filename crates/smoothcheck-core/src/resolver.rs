//! Chunk URL reconstruction from templated path segments.
//!
//! Track URL templates have the form
//! `QualityLevels({bitrate})/Fragments(video={start time})` or
//! `QualityLevels({bitrate},{CustomAttributes})/Fragments(video={start time})`.
//! The first segment is resolved per quality level, the second per chunk.

use thiserror::Error;

use crate::manifest::{ChunkDescriptor, QualityLevel, Track};

const BITRATE_PLACEHOLDER: &str = "{bitrate}";
const CUSTOM_ATTRIBUTES_PLACEHOLDER: &str = "{CustomAttributes}";
const START_TIME_PLACEHOLDER: &str = "{start time}";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("track URL template {template:?} is missing its {missing} path segment")]
    MalformedTemplate {
        template: String,
        missing: &'static str,
    },
}

fn template_segment<'a>(
    template: &'a str,
    index: usize,
    missing: &'static str,
) -> Result<&'a str, ResolveError> {
    template
        .split('/')
        .nth(index)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ResolveError::MalformedTemplate {
            template: template.to_string(),
            missing,
        })
}

/// Resolves the per-quality path segment (first template segment).
///
/// `{bitrate}` is replaced with the quality's bitrate and
/// `{CustomAttributes}` with a comma-joined `key=value` rendering of its
/// custom attributes (empty string when there are none).
pub fn quality_path_segment(
    track: &Track,
    quality: &QualityLevel,
) -> Result<String, ResolveError> {
    let segment = template_segment(&track.url_template, 0, "quality")?;

    let custom = quality
        .custom_attributes
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(",");

    Ok(segment
        .replace(BITRATE_PLACEHOLDER, &quality.bitrate.to_string())
        .replace(CUSTOM_ATTRIBUTES_PLACEHOLDER, &custom))
}

/// Resolves the per-chunk path segment (second template segment).
///
/// `{start time}` is replaced with the chunk's explicit `t` token when
/// present, else with `implicit_start`: the running total of durations of
/// all strictly preceding chunks in the track's timeline.
pub fn chunk_path_segment(
    track: &Track,
    chunk: &ChunkDescriptor,
    implicit_start: u64,
) -> Result<String, ResolveError> {
    let segment = template_segment(&track.url_template, 1, "chunk")?;
    let token = match chunk.start_time.as_deref() {
        Some(t) => t.to_string(),
        None => implicit_start.to_string(),
    };
    Ok(segment.replace(START_TIME_PLACEHOLDER, &token))
}

/// Joins base URL, quality segment, and chunk segment into the request URL.
pub fn chunk_url(base_url: &str, quality_segment: &str, chunk_segment: &str) -> String {
    format!("{}/{}/{}", base_url, quality_segment, chunk_segment)
}
