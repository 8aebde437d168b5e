//! `smoothcheck check <source>` – verify every chunk of a manifest.

use std::path::Path;

use anyhow::Result;
use smoothcheck_core::verify::{self, VerifyOptions};
use smoothcheck_core::{loader, manifest};

pub fn run_check(source: &str, dest_dir: &Path, opts: &VerifyOptions) -> Result<()> {
    let (manifest, base_url) = loader::load(source, dest_dir)?;
    print!("{}", manifest::render_info(&manifest, &base_url));

    let report = verify::verify(&base_url, &manifest, opts);
    if report.pass() {
        println!("All chunks verified.");
    } else {
        for failure in &report.failures {
            println!("{} returned {}", failure.url, failure.status);
        }
        println!("{} failing chunk(s).", report.failures.len());
    }
    Ok(())
}
