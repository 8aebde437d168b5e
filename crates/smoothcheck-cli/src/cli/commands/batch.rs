//! `smoothcheck batch <csv>` – compare two endpoints per input row.

use std::path::Path;

use anyhow::Result;
use smoothcheck_core::batch;
use smoothcheck_core::verify::VerifyOptions;

pub fn run_batch(csv: &Path, dest_dir: &Path, opts: &VerifyOptions) -> Result<()> {
    let out_path = batch::check_endpoints_in_csv(csv, dest_dir, opts)?;
    println!("Batch results written to {}", out_path.display());
    Ok(())
}
