//! Typed Smooth Streaming manifest model.
//!
//! Populated once at parse time (see `parse`); immutable afterwards. All
//! downstream code (resolver, verification engine) reads these structures
//! instead of poking at the XML tree.

mod info;
mod parse;

pub use info::render_info;
pub use parse::{parse_manifest, ParseError};

/// The single supported Smooth Streaming major version.
pub const SUPPORTED_MAJOR_VERSION: u32 = 2;

/// Media kind of a stream index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
    /// Anything else (e.g. text); probed like any other track.
    Other,
}

impl TrackKind {
    /// Maps the `StreamIndex@Type` attribute value.
    pub fn from_type_attr(value: &str) -> Self {
        match value {
            "video" => TrackKind::Video,
            "audio" => TrackKind::Audio,
            _ => TrackKind::Other,
        }
    }
}

/// Kind-specific encoding parameters of a quality level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInfo {
    Video {
        max_width: u32,
        max_height: u32,
    },
    Audio {
        channels: u32,
        sampling_rate: u32,
        bits_per_sample: u32,
    },
    Other,
}

/// One encoded rendition of a track.
#[derive(Debug, Clone)]
pub struct QualityLevel {
    pub bitrate: u64,
    /// Codec identifier (FourCC).
    pub fourcc: String,
    pub media: MediaInfo,
    /// Custom key/value attributes in document order; substituted into the
    /// `{CustomAttributes}` URL template placeholder.
    pub custom_attributes: Vec<(String, String)>,
}

/// One time-addressed fragment in a track's timeline.
#[derive(Debug, Clone)]
pub struct ChunkDescriptor {
    /// Explicit start-time token (`t` attribute). When absent the chunk is
    /// addressed by the running total of prior chunks' durations.
    pub start_time: Option<String>,
    /// Duration (`d` attribute); only feeds the next implicit start token.
    pub duration: u64,
}

/// One media component (StreamIndex): video, audio, etc.
///
/// The chunk timeline is per-track and shared by all of its quality levels.
#[derive(Debug, Clone)]
pub struct Track {
    pub kind: TrackKind,
    /// URL path template, e.g.
    /// `QualityLevels({bitrate})/Fragments(video={start time})`.
    pub url_template: String,
    pub qualities: Vec<QualityLevel>,
    pub chunks: Vec<ChunkDescriptor>,
}

/// Root of a parsed manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub major_version: u32,
    pub tracks: Vec<Track>,
    /// `Clip@Url` if present; the loader may use it to refine the base URL.
    pub clip_url: Option<String>,
}
