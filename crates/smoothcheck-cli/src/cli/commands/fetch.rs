//! `smoothcheck fetch <source>` – download the manifest file and exit.

use std::path::Path;

use anyhow::Result;
use smoothcheck_core::loader;

pub fn run_fetch(source: &str, dest_dir: &Path) -> Result<()> {
    loader::load(source, dest_dir)?;
    println!(
        "Manifest saved to {}",
        dest_dir.join(loader::MANIFEST_FILE).display()
    );
    Ok(())
}
