//! Minimal HTTP/1.1 stand-in for the lookup service and the media origin,
//! for integration tests.
//!
//! POST requests get the configured result markup; GET requests get the
//! configured media bytes. Hit counters let tests assert which calls were
//! (not) made. The literal `{base}` in the markup is replaced with the
//! server's base URL so anchors can point back at the media route.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LookupServerOptions {
    /// Markup body returned for the lookup POST.
    pub markup: String,
    /// Status code for the lookup POST.
    pub lookup_status: u32,
    /// Delay before answering the lookup POST (timeout simulation).
    pub lookup_delay: Option<Duration>,
    /// Body served for media GETs.
    pub media: Vec<u8>,
    /// Status code for media GETs.
    pub media_status: u32,
}

impl Default for LookupServerOptions {
    fn default() -> Self {
        Self {
            markup: String::new(),
            lookup_status: 200,
            lookup_delay: None,
            media: Vec::new(),
            media_status: 200,
        }
    }
}

pub struct LookupServer {
    /// Base URL with a trailing slash, e.g. "http://127.0.0.1:12345/".
    pub base_url: String,
    pub lookup_hits: Arc<AtomicUsize>,
    pub media_hits: Arc<AtomicUsize>,
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(opts: LookupServerOptions) -> LookupServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}/", port);

    let lookup_hits = Arc::new(AtomicUsize::new(0));
    let media_hits = Arc::new(AtomicUsize::new(0));

    let markup = opts.markup.replace("{base}", &base_url);
    let opts = LookupServerOptions { markup, ..opts };

    let server = LookupServer {
        base_url,
        lookup_hits: Arc::clone(&lookup_hits),
        media_hits: Arc::clone(&media_hits),
    };

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let opts = opts.clone();
            let lookup_hits = Arc::clone(&lookup_hits);
            let media_hits = Arc::clone(&media_hits);
            thread::spawn(move || handle(stream, &opts, &lookup_hits, &media_hits));
        }
    });

    server
}

fn handle(
    mut stream: std::net::TcpStream,
    opts: &LookupServerOptions,
    lookup_hits: &AtomicUsize,
    media_hits: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    // Read until headers and any Content-Length body have arrived, so the
    // client is never mid-send when the response goes out.
    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        match stream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                data.extend_from_slice(&buf[..n]);
                if request_complete(&data) || data.len() > 65536 {
                    break;
                }
            }
            Err(_) => return,
        }
    }
    let request = String::from_utf8_lossy(&data);
    let method = request.split_whitespace().next().unwrap_or("");

    if method.eq_ignore_ascii_case("POST") {
        lookup_hits.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = opts.lookup_delay {
            thread::sleep(delay);
        }
        respond(&mut stream, opts.lookup_status, opts.markup.as_bytes());
        return;
    }

    if method.eq_ignore_ascii_case("GET") {
        media_hits.fetch_add(1, Ordering::SeqCst);
        respond(&mut stream, opts.media_status, &opts.media);
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\n\r\n");
}

fn request_complete(data: &[u8]) -> bool {
    let text = String::from_utf8_lossy(data);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let body_len = text[..header_end]
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    data.len() >= header_end + 4 + body_len
}

fn respond(stream: &mut std::net::TcpStream, status: u32, body: &[u8]) {
    let header = format!(
        "HTTP/1.1 {} Status\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
}
