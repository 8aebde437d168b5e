//! `smoothcheck info <source>` – print manifest info and exit.

use std::path::Path;

use anyhow::Result;
use smoothcheck_core::{loader, manifest};

pub fn run_info(source: &str, dest_dir: &Path) -> Result<()> {
    let (manifest, base_url) = loader::load(source, dest_dir)?;
    print!("{}", manifest::render_info(&manifest, &base_url));
    Ok(())
}
