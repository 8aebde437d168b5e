//! XML manifest parsing into the typed model.
//!
//! The version gate runs before anything else: a manifest whose
//! `MajorVersion` is not the supported one is rejected with no partial state.

use thiserror::Error;

use super::{
    ChunkDescriptor, Manifest, MediaInfo, QualityLevel, Track, TrackKind, SUPPORTED_MAJOR_VERSION,
};

/// Errors produced while turning manifest bytes into the typed model.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("only Smooth Streaming version {SUPPORTED_MAJOR_VERSION} is supported (manifest declares MajorVersion={0})")]
    UnsupportedFormat(String),
    #[error("invalid manifest XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("manifest element <{element}> is missing required attribute {attribute}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("manifest attribute {element}@{attribute} is not a number: {value:?}")]
    BadNumber {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}

fn required<'a>(
    node: roxmltree::Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str, ParseError> {
    node.attribute(attribute)
        .ok_or(ParseError::MissingAttribute { element, attribute })
}

fn required_num<T: std::str::FromStr>(
    node: roxmltree::Node,
    element: &'static str,
    attribute: &'static str,
) -> Result<T, ParseError> {
    let value = required(node, element, attribute)?;
    value.parse().map_err(|_| ParseError::BadNumber {
        element,
        attribute,
        value: value.to_string(),
    })
}

/// Parses a version-2 Smooth Streaming manifest.
pub fn parse_manifest(text: &str) -> Result<Manifest, ParseError> {
    let doc = roxmltree::Document::parse(text)?;
    let root = doc.root_element();

    let version = required(root, "SmoothStreamingMedia", "MajorVersion")?;
    let major_version: u32 = version
        .parse()
        .map_err(|_| ParseError::UnsupportedFormat(version.to_string()))?;
    if major_version != SUPPORTED_MAJOR_VERSION {
        return Err(ParseError::UnsupportedFormat(version.to_string()));
    }

    let mut tracks = Vec::new();
    for stream in root
        .descendants()
        .filter(|n| n.has_tag_name("StreamIndex"))
    {
        tracks.push(parse_track(stream)?);
    }

    let clip_url = root
        .descendants()
        .find(|n| n.has_tag_name("Clip"))
        .and_then(|n| n.attribute("Url"))
        .map(str::to_string);

    Ok(Manifest {
        major_version,
        tracks,
        clip_url,
    })
}

fn parse_track(stream: roxmltree::Node) -> Result<Track, ParseError> {
    let kind = TrackKind::from_type_attr(required(stream, "StreamIndex", "Type")?);
    let url_template = required(stream, "StreamIndex", "Url")?.to_string();

    let mut qualities = Vec::new();
    for quality in stream.children().filter(|n| n.has_tag_name("QualityLevel")) {
        qualities.push(parse_quality(quality, kind)?);
    }

    let mut chunks = Vec::new();
    for chunk in stream.children().filter(|n| n.has_tag_name("c")) {
        chunks.push(ChunkDescriptor {
            start_time: chunk.attribute("t").map(str::to_string),
            duration: required_num(chunk, "c", "d")?,
        });
    }

    Ok(Track {
        kind,
        url_template,
        qualities,
        chunks,
    })
}

fn parse_quality(quality: roxmltree::Node, kind: TrackKind) -> Result<QualityLevel, ParseError> {
    let media = match kind {
        TrackKind::Video => MediaInfo::Video {
            max_width: required_num(quality, "QualityLevel", "MaxWidth")?,
            max_height: required_num(quality, "QualityLevel", "MaxHeight")?,
        },
        TrackKind::Audio => MediaInfo::Audio {
            channels: required_num(quality, "QualityLevel", "Channels")?,
            sampling_rate: required_num(quality, "QualityLevel", "SamplingRate")?,
            bits_per_sample: required_num(quality, "QualityLevel", "BitsPerSample")?,
        },
        TrackKind::Other => MediaInfo::Other,
    };

    // CustomAttributes/Attribute pairs, document order preserved.
    let mut custom_attributes = Vec::new();
    if let Some(container) = quality
        .children()
        .find(|n| n.has_tag_name("CustomAttributes"))
    {
        for attr in container.children().filter(|n| n.has_tag_name("Attribute")) {
            custom_attributes.push((
                required(attr, "Attribute", "Name")?.to_string(),
                required(attr, "Attribute", "Value")?.to_string(),
            ));
        }
    }

    Ok(QualityLevel {
        bitrate: required_num(quality, "QualityLevel", "Bitrate")?,
        fourcc: required(quality, "QualityLevel", "FourCC")?.to_string(),
        media,
        custom_attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIDEO_AUDIO_MANIFEST: &str = r#"<?xml version="1.0"?>
<SmoothStreamingMedia MajorVersion="2" MinorVersion="0" Duration="40000000">
  <StreamIndex Type="video" Chunks="2" Url="QualityLevels({bitrate})/Fragments(video={start time})">
    <QualityLevel Bitrate="500000" FourCC="H264" MaxWidth="640" MaxHeight="480"/>
    <QualityLevel Bitrate="1000000" FourCC="H264" MaxWidth="1280" MaxHeight="720"/>
    <c t="0" d="20000000"/>
    <c d="20000000"/>
  </StreamIndex>
  <StreamIndex Type="audio" Chunks="2" Url="QualityLevels({bitrate})/Fragments(audio={start time})">
    <QualityLevel Bitrate="64000" FourCC="AACL" Channels="2" SamplingRate="44100" BitsPerSample="16"/>
    <c t="0" d="20000000"/>
    <c d="20000000"/>
  </StreamIndex>
</SmoothStreamingMedia>"#;

    #[test]
    fn track_count_matches_stream_index_count() {
        let manifest = parse_manifest(VIDEO_AUDIO_MANIFEST).unwrap();
        assert_eq!(manifest.major_version, 2);
        assert_eq!(manifest.tracks.len(), 2);
        assert_eq!(manifest.tracks[0].kind, TrackKind::Video);
        assert_eq!(manifest.tracks[1].kind, TrackKind::Audio);
    }

    #[test]
    fn quality_levels_and_chunks_parsed() {
        let manifest = parse_manifest(VIDEO_AUDIO_MANIFEST).unwrap();
        let video = &manifest.tracks[0];
        assert_eq!(video.qualities.len(), 2);
        assert_eq!(video.qualities[0].bitrate, 500_000);
        assert_eq!(video.qualities[0].fourcc, "H264");
        assert_eq!(
            video.qualities[1].media,
            MediaInfo::Video {
                max_width: 1280,
                max_height: 720
            }
        );
        assert_eq!(video.chunks.len(), 2);
        assert_eq!(video.chunks[0].start_time.as_deref(), Some("0"));
        assert!(video.chunks[1].start_time.is_none());
        assert_eq!(video.chunks[1].duration, 20_000_000);

        let audio = &manifest.tracks[1];
        assert_eq!(
            audio.qualities[0].media,
            MediaInfo::Audio {
                channels: 2,
                sampling_rate: 44_100,
                bits_per_sample: 16
            }
        );
    }

    #[test]
    fn unsupported_version_rejected() {
        let text = VIDEO_AUDIO_MANIFEST.replace("MajorVersion=\"2\"", "MajorVersion=\"1\"");
        match parse_manifest(&text) {
            Err(ParseError::UnsupportedFormat(v)) => assert_eq!(v, "1"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn custom_attributes_preserve_document_order() {
        let text = r#"
<SmoothStreamingMedia MajorVersion="2">
  <StreamIndex Type="video" Url="QualityLevels({bitrate},{CustomAttributes})/Fragments(video={start time})">
    <QualityLevel Bitrate="500000" FourCC="H264" MaxWidth="640" MaxHeight="480">
      <CustomAttributes>
        <Attribute Name="B" Value="2"/>
        <Attribute Name="A" Value="1"/>
      </CustomAttributes>
    </QualityLevel>
    <c t="0" d="1000"/>
  </StreamIndex>
</SmoothStreamingMedia>"#;
        let manifest = parse_manifest(text).unwrap();
        let attrs = &manifest.tracks[0].qualities[0].custom_attributes;
        assert_eq!(
            attrs,
            &vec![
                ("B".to_string(), "2".to_string()),
                ("A".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn clip_url_captured_when_present() {
        let text = r#"
<SmoothStreamingMedia MajorVersion="2">
  <Clip Url="http://cdn.example.com/Content/Manifest"/>
</SmoothStreamingMedia>"#;
        let manifest = parse_manifest(text).unwrap();
        assert_eq!(
            manifest.clip_url.as_deref(),
            Some("http://cdn.example.com/Content/Manifest")
        );
    }

    #[test]
    fn missing_duration_attribute_is_an_error() {
        let text = r#"
<SmoothStreamingMedia MajorVersion="2">
  <StreamIndex Type="video" Url="a/b">
    <QualityLevel Bitrate="1" FourCC="H264" MaxWidth="1" MaxHeight="1"/>
    <c t="0"/>
  </StreamIndex>
</SmoothStreamingMedia>"#;
        assert!(matches!(
            parse_manifest(text),
            Err(ParseError::MissingAttribute {
                element: "c",
                attribute: "d"
            })
        ));
    }
}
