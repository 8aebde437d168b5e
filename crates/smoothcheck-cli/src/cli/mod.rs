//! CLI for the smoothcheck stream checker.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smoothcheck_core::config;
use smoothcheck_core::verify::VerifyOptions;

use commands::{run_batch, run_check, run_fetch, run_info, run_join};

/// Top-level CLI for the smoothcheck stream checker.
#[derive(Debug, Parser)]
#[command(name = "smoothcheck")]
#[command(about = "Verify Smooth Streaming chunk availability", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Verify every chunk of a manifest against its origin.
    Check {
        /// Manifest URL or local manifest file.
        source: String,
        /// Directory the fetched manifest is persisted to (default: system temp dir).
        #[arg(short, long, value_name = "DIR")]
        dest_dir: Option<PathBuf>,
        /// Probes run in parallel per quality level (default: 2x cores).
        #[arg(short, long, value_name = "N")]
        parallel: Option<usize>,
    },

    /// Print manifest info and exit.
    Info {
        /// Manifest URL or local manifest file.
        source: String,
        /// Directory the fetched manifest is persisted to (default: system temp dir).
        #[arg(short, long, value_name = "DIR")]
        dest_dir: Option<PathBuf>,
    },

    /// Download the manifest file and exit.
    Fetch {
        /// Manifest URL.
        source: String,
        /// Directory the fetched manifest is persisted to (default: system temp dir).
        #[arg(short, long, value_name = "DIR")]
        dest_dir: Option<PathBuf>,
    },

    /// Compare two endpoints per row of a batch CSV file.
    Batch {
        /// CSV file with one comparison job per row: endpointA,endpointB,...
        csv: PathBuf,
        /// Directory fetched manifests are persisted to (default: system temp dir).
        #[arg(short, long, value_name = "DIR")]
        dest_dir: Option<PathBuf>,
        /// Probes run in parallel per quality level (default: 2x cores).
        #[arg(short, long, value_name = "N")]
        parallel: Option<usize>,
    },

    /// Concatenate per-job result CSVs into a single file.
    Join {
        /// Output file the results are joined into.
        output: PathBuf,
        /// Directory holding per-job result CSVs.
        #[arg(long, value_name = "DIR", default_value = "results")]
        results_dir: PathBuf,
    },
}

fn default_dest_dir(dest_dir: Option<PathBuf>) -> PathBuf {
    dest_dir.unwrap_or_else(std::env::temp_dir)
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let verify_opts = |parallel: Option<usize>| -> VerifyOptions {
            let mut opts = cfg.verify_options();
            if let Some(n) = parallel {
                opts.parallel_probes = n.max(1);
            }
            opts
        };

        match cli.command {
            CliCommand::Check {
                source,
                dest_dir,
                parallel,
            } => run_check(&source, &default_dest_dir(dest_dir), &verify_opts(parallel)),
            CliCommand::Info { source, dest_dir } => {
                run_info(&source, &default_dest_dir(dest_dir))
            }
            CliCommand::Fetch { source, dest_dir } => {
                run_fetch(&source, &default_dest_dir(dest_dir))
            }
            CliCommand::Batch {
                csv,
                dest_dir,
                parallel,
            } => run_batch(&csv, &default_dest_dir(dest_dir), &verify_opts(parallel)),
            CliCommand::Join {
                output,
                results_dir,
            } => run_join(&results_dir, &output),
        }
    }
}

#[cfg(test)]
mod tests;
