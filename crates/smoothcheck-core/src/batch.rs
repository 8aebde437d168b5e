//! Batch and job workflows around the verification engine.
//!
//! The batch CSV workflow compares two endpoints per input row and appends a
//! pass/fail column for each. The job workflow verifies a single endpoint
//! and writes one record to a file named after the caller-supplied job id,
//! so concurrent workers never collide. Both always produce an output
//! record, even when an endpoint fails to load.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::loader;
use crate::report::VerificationReport;
use crate::verify::{self, VerifyOptions};

/// Input fields of one verification job; identity comes from the external
/// queue collaborator.
#[derive(Debug, Clone)]
pub struct JobData {
    pub url: String,
    pub cdn: String,
    pub media_key: String,
    pub streamable_id: String,
}

/// Loads and verifies one endpoint. A load failure counts as a failing
/// endpoint and never aborts the surrounding batch.
fn verify_endpoint(source: &str, dest_dir: &Path, opts: &VerifyOptions) -> VerificationReport {
    match loader::load(source, dest_dir) {
        Ok((manifest, base_url)) => verify::verify(&base_url, &manifest, opts),
        Err(e) => {
            tracing::error!(source, error = %e, "manifest load failed");
            VerificationReport {
                failures: vec![crate::probe::ProbeResult {
                    url: source.to_string(),
                    status: crate::probe::TRANSPORT_FAILURE_STATUS,
                }],
            }
        }
    }
}

/// Runs the two-endpoint comparison over every row of a batch CSV file.
///
/// Row layout: `[endpointA, endpointB, mediaKey, ..., streamableId]`. Each
/// completed row is written to `<input>_out` with two boolean columns
/// appended (pass for endpoint A, pass for endpoint B); chunk-level detail
/// is omitted in this mode. Returns the output path.
pub fn check_endpoints_in_csv(
    csv_path: &Path,
    dest_dir: &Path,
    opts: &VerifyOptions,
) -> Result<PathBuf> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("open batch CSV {}", csv_path.display()))?;

    let out_path = PathBuf::from(format!("{}_out", csv_path.display()));
    let out_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&out_path)
        .with_context(|| format!("open batch output {}", out_path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out_file);

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read batch CSV row {}", line))?;
        if record.len() < 2 {
            tracing::warn!(line, "batch row has fewer than two endpoints; skipped");
            continue;
        }

        let mut out: Vec<String> = record.iter().map(str::to_string).collect();
        for endpoint in [&record[0], &record[1]] {
            let report = verify_endpoint(endpoint, dest_dir, opts);
            out.push(report.pass().to_string());
        }
        writer.write_record(&out)?;
        writer.flush()?;
    }

    Ok(out_path)
}

/// Verifies one endpoint and appends a job record to
/// `<output_prefix><job_id>.csv`.
///
/// Record layout: `[url, cdn, media_key, streamable_id, result, errors]`
/// where `errors` is empty when the endpoint passes. Returns the pass flag.
pub fn run_job(
    data: &JobData,
    job_id: &str,
    output_prefix: &str,
    dest_dir: &Path,
    opts: &VerifyOptions,
) -> Result<bool> {
    let report = verify_endpoint(&data.url, dest_dir, opts);
    let result = report.pass();
    let errors = if result {
        String::new()
    } else {
        report.render_failures()
    };

    let out_path = PathBuf::from(format!("{}{}.csv", output_prefix, job_id));
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let out_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&out_path)
        .with_context(|| format!("open job output {}", out_path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out_file);
    writer.write_record([
        data.url.as_str(),
        data.cdn.as_str(),
        data.media_key.as_str(),
        data.streamable_id.as_str(),
        &result.to_string(),
        &errors,
    ])?;
    writer.flush()?;

    Ok(result)
}

/// Concatenates every `*.csv` result file in `results_dir` into one output
/// file. Returns the number of files joined.
pub fn join_results(results_dir: &Path, output_file: &Path) -> Result<usize> {
    let mut paths: Vec<PathBuf> = fs::read_dir(results_dir)
        .with_context(|| format!("read results dir {}", results_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|ext| ext == "csv").unwrap_or(false))
        .collect();
    paths.sort();

    let mut out = Vec::new();
    for path in &paths {
        let bytes =
            fs::read(path).with_context(|| format!("read result file {}", path.display()))?;
        out.extend_from_slice(&bytes);
    }
    fs::write(output_file, out)
        .with_context(|| format!("write joined results {}", output_file.display()))?;

    Ok(paths.len())
}
