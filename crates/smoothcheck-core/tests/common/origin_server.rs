//! Minimal HTTP/1.1 origin for integration tests.
//!
//! Serves a fixed manifest body for any GET ending in `/Manifest` and
//! answers HEAD probes with 200 unless a per-path status override says
//! otherwise. Optionally counts HEAD requests so tests can assert how many
//! probes were issued.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Default)]
pub struct OriginOptions {
    /// Manifest body served for GET requests ending in `/Manifest`.
    pub manifest: String,
    /// HEAD status per request path; any path not listed returns 200.
    pub overrides: HashMap<String, u32>,
    /// Incremented once per HEAD request when set.
    pub head_counter: Option<Arc<AtomicUsize>>,
}

/// Starts the origin in a background thread. Returns the server root
/// (e.g. "http://127.0.0.1:12345"); the server runs until the process exits.
pub fn start(opts: OriginOptions) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = Arc::clone(&opts);
            thread::spawn(move || handle(stream, &opts));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, opts: &OriginOptions) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);

    if method.eq_ignore_ascii_case("HEAD") {
        if let Some(counter) = &opts.head_counter {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        let status = opts.overrides.get(path).copied().unwrap_or(200);
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: 0\r\n\r\n",
            status,
            reason(status)
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }

    if method.eq_ignore_ascii_case("GET") {
        if path.ends_with("/Manifest") {
            let body = opts.manifest.as_bytes();
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(body);
        } else {
            let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
        }
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
}

fn parse_request_line(request: &str) -> (&str, &str) {
    let line = request.lines().next().unwrap_or("");
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");
    (method, path)
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
