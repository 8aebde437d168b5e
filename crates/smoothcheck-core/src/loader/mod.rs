//! Manifest loading: endpoint normalization, one fetch, persistence, parse.
//!
//! Network sources are fetched exactly once and the body is persisted to the
//! destination directory before parsing, so a corrupt download stays on disk
//! for inspection. Local paths are parsed directly.

mod fetch;

use std::fs;
use std::path::Path;

use thiserror::Error;
use url::Url;

use crate::manifest::{parse_manifest, Manifest, ParseError};

/// Filename the fetched manifest is persisted under.
pub const MANIFEST_FILE: &str = "Manifest";

/// Default path segment appended when the URL does not name a manifest.
const DEFAULT_MANIFEST_SEGMENT: &str = "/Manifest";

/// Recognized manifest suffixes (matched case-insensitively).
const MANIFEST_SUFFIXES: [&str; 3] = ["/manifest", ".ismc", ".csm"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("fetching manifest {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("manifest fetch {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    #[error("reading or persisting manifest: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// True when the manifest declares an unsupported major version.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, LoadError::Parse(ParseError::UnsupportedFormat(_)))
    }
}

/// Loads a manifest from a URL or local path.
///
/// Returns the parsed manifest together with the resolved base content URL
/// (the supplied URL normalized, then possibly refined by a `Clip` element).
pub fn load(source: &str, dest_dir: &Path) -> Result<(Manifest, String), LoadError> {
    // Endpoint normalization applies to network locators only; a local path
    // is read as-is and stays the base URL until Clip refinement.
    let (text, base_url) = if is_remote(source) {
        let (manifest_url, base_url) = normalize_source(source);
        (fetch_and_persist(&manifest_url, dest_dir)?, base_url)
    } else {
        (fs::read_to_string(source)?, source.to_string())
    };

    let manifest = parse_manifest(&text)?;

    let base_url = refine_base_url(&manifest, base_url);
    Ok((manifest, base_url))
}

fn is_remote(source: &str) -> bool {
    Url::parse(source)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Splits a source locator into (manifest endpoint URL, base content URL).
///
/// If the source does not already end in a recognized manifest suffix, the
/// default `/Manifest` segment is appended to form the endpoint; if it ends
/// in `/manifest`, the base URL has that segment stripped.
fn normalize_source(source: &str) -> (String, String) {
    let lower = source.to_lowercase();

    let mut manifest_url = source.to_string();
    if !MANIFEST_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        manifest_url.push_str(DEFAULT_MANIFEST_SEGMENT);
    }

    let mut base_url = source.to_string();
    if lower.ends_with("/manifest") {
        base_url.truncate(base_url.len() - DEFAULT_MANIFEST_SEGMENT.len());
    }

    (manifest_url, base_url)
}

fn fetch_and_persist(manifest_url: &str, dest_dir: &Path) -> Result<String, LoadError> {
    fs::create_dir_all(dest_dir)?;
    let body = fetch::fetch_manifest(manifest_url)?;
    let path = dest_dir.join(MANIFEST_FILE);
    fs::write(&path, &body)?;
    tracing::debug!(url = manifest_url, path = %path.display(), "manifest persisted");

    // Parse the persisted copy, not the in-memory buffer.
    Ok(fs::read_to_string(&path)?)
}

/// Best-effort base-URL refinement from the optional `Clip` element.
///
/// Failure to refine is not an error: a manifest without a usable Clip URL
/// keeps the supplied base URL unchanged.
fn refine_base_url(manifest: &Manifest, base_url: String) -> String {
    match manifest.clip_url.as_deref() {
        Some(clip) => {
            let refined = clip.to_lowercase().replace("/manifest", "");
            tracing::debug!(from = %base_url, to = %refined, "base URL refined from Clip element");
            refined
        }
        None => {
            tracing::debug!(base = %base_url, "no Clip element; keeping supplied base URL");
            base_url
        }
    }
}
