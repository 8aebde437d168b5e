//! Tests for fetch, batch, and join subcommands.

use super::parse;
use crate::cli::CliCommand;

#[test]
fn cli_parse_fetch() {
    match parse(&["smoothcheck", "fetch", "http://example.com/stream.ism"]) {
        CliCommand::Fetch { source, dest_dir } => {
            assert_eq!(source, "http://example.com/stream.ism");
            assert!(dest_dir.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_batch() {
    match parse(&["smoothcheck", "batch", "jobs.csv", "--parallel", "4"]) {
        CliCommand::Batch {
            csv,
            dest_dir,
            parallel,
        } => {
            assert_eq!(csv, std::path::PathBuf::from("jobs.csv"));
            assert!(dest_dir.is_none());
            assert_eq!(parallel, Some(4));
        }
        _ => panic!("expected Batch"),
    }
}

#[test]
fn cli_parse_join_default_results_dir() {
    match parse(&["smoothcheck", "join", "all.csv"]) {
        CliCommand::Join {
            output,
            results_dir,
        } => {
            assert_eq!(output, std::path::PathBuf::from("all.csv"));
            assert_eq!(results_dir, std::path::PathBuf::from("results"));
        }
        _ => panic!("expected Join"),
    }
}

#[test]
fn cli_parse_join_custom_results_dir() {
    match parse(&["smoothcheck", "join", "all.csv", "--results-dir", "/var/results"]) {
        CliCommand::Join { results_dir, .. } => {
            assert_eq!(results_dir, std::path::PathBuf::from("/var/results"));
        }
        _ => panic!("expected Join with --results-dir"),
    }
}
