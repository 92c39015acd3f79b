//! Shared helpers for the HTTP integration tests.
//!
//! `FeedServer` is a minimal HTTP/1.1 responder on a loopback port. Every
//! request gets the same canned response. By default the connection is then
//! closed; `FeedServer::keep_alive` leaves it open for more requests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// A two-entry ThingSpeak payload; the second entry is the latest.
pub const SAMPLE_FEED: &str = r#"{
  "channel": {"id": 741213, "name": "Parcare", "last_entry_id": 42},
  "feeds": [
    {"created_at": "2019-04-02T11:40:00Z", "entry_id": 41, "field1": "0", "field2": "0", "field3": "0"},
    {"created_at": "2019-04-02T11:46:10Z", "entry_id": 42, "field1": "1", "field2": "0", "field3": "23.5"}
  ]
}"#;

pub struct FeedServer {
    url: String,
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
}

impl FeedServer {
    /// Serve `body` with `status` to every request, closing each connection
    /// after one response.
    pub fn start(status: u16, body: &str) -> Self {
        Self::serve(status, body, false)
    }

    /// Like `start`, but a connection stays open for further requests until
    /// the client closes it.
    pub fn keep_alive(status: u16, body: &str) -> Self {
        Self::serve(status, body, true)
    }

    fn serve(status: u16, body: &str, keep_alive: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");
        let hits = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(AtomicUsize::new(0));

        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: {}\r\n\r\n{}",
            status,
            reason(status),
            body.len(),
            if keep_alive { "keep-alive" } else { "close" },
            body
        );
        let counter = hits.clone();
        let served = requests.clone();

        // Detached; the listener lives until the test process exits.
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                counter.fetch_add(1, Ordering::SeqCst);
                if keep_alive {
                    let response = response.clone();
                    let served = served.clone();
                    thread::spawn(move || serve_connection(stream, &response, &served));
                } else {
                    respond(stream, &response, &served);
                }
            }
        });

        Self {
            url: format!("http://127.0.0.1:{}/channels/741213/feeds.json?results=2", addr.port()),
            addr,
            hits,
            requests,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Number of connections accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Number of requests answered so far, across all connections.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

/// Consume one request head. False once the peer has closed or failed.
fn read_request_head(reader: &mut BufReader<TcpStream>) -> bool {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return false,
            Ok(_) if line == "\r\n" || line == "\n" => return true,
            Ok(_) => {}
        }
    }
}

fn respond(stream: TcpStream, response: &str, served: &AtomicUsize) {
    let mut reader = BufReader::new(stream);
    if !read_request_head(&mut reader) {
        return;
    }
    served.fetch_add(1, Ordering::SeqCst);
    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn serve_connection(stream: TcpStream, response: &str, served: &AtomicUsize) {
    let mut reader = BufReader::new(stream);
    while read_request_head(&mut reader) {
        served.fetch_add(1, Ordering::SeqCst);
        let stream = reader.get_mut();
        if stream.write_all(response.as_bytes()).is_err() || stream.flush().is_err() {
            return;
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// A loopback URL with nothing listening on it.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/feeds.json", port)
}

/// A loopback URL that accepts connections but never answers.
pub fn silent_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}/feeds.json", port)
}

/// A loopback URL that sends response headers and part of the body, then
/// stops writing without closing.
pub fn stalled_body_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let port = listener.local_addr().expect("local addr").port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            let mut reader = BufReader::new(stream);
            if !read_request_head(&mut reader) {
                continue;
            }
            let mut stream = reader.into_inner();
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 1000\r\n\r\n{\"feeds\": [",
            );
            let _ = stream.flush();
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}/feeds.json", port)
}
