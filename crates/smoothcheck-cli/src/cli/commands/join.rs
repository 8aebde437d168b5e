//! `smoothcheck join <output>` – concatenate per-job result CSVs.

use std::path::Path;

use anyhow::Result;
use smoothcheck_core::batch;

pub fn run_join(results_dir: &Path, output: &Path) -> Result<()> {
    let joined = batch::join_results(results_dir, output)?;
    println!("Joined {} result file(s) into {}", joined, output.display());
    Ok(())
}
