//! Bounded worker pool for chunk probes.
//!
//! Workers pull URLs from a shared queue and send results over a channel.
//! The caller drains the channel and joins every worker before returning, so
//! all probes of a pool lifetime complete before results are read. Result
//! order is completion order, not submission order.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use crate::probe::{self, ProbeResult};

use super::VerifyOptions;

pub(super) fn run_probes(urls: Vec<String>, opts: &VerifyOptions) -> Vec<ProbeResult> {
    let count = urls.len();
    if count == 0 {
        return Vec::new();
    }

    let work: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(urls.into_iter().collect()));
    let (tx, rx) = mpsc::channel();
    let num_workers = opts.parallel_probes.max(1).min(count);
    let mut handles = Vec::with_capacity(num_workers);
    for _ in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let retry = opts.retry;
        let probe_opts = opts.probe;
        handles.push(std::thread::spawn(move || loop {
            let url = match work.lock().unwrap().pop_front() {
                Some(url) => url,
                None => break,
            };
            let _ = tx.send(probe::probe(url, &retry, probe_opts));
        }));
    }
    drop(tx);

    // Probes never error out of the pool, so every queued URL yields exactly
    // one result unless a worker panics; recv() ending early covers that.
    let mut results = Vec::with_capacity(count);
    while let Ok(result) = rx.recv() {
        results.push(result);
    }

    for h in handles {
        if h.join().is_err() {
            tracing::warn!("probe worker panicked");
        }
    }

    results
}
