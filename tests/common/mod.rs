//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Value, json};
use tempfile::TempDir;

/// One request received by [`StubServer`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// e.g. `POST /api/debug HTTP/1.1`
    pub request_line: String,
    pub body: String,
}

/// Loopback HTTP server answering every request with the same canned response
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let body = body.to_string();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                if let Some(request) = read_request(&mut stream) {
                    recorded.lock().unwrap().push(request);
                }
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason(status),
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut content_length = 0usize;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header).ok()?;
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).ok()?;
    Some(RecordedRequest {
        request_line: request_line.trim_end().to_string(),
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// A port nothing listens on
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Response body of a typical successful analysis
pub fn sample_analysis() -> String {
    json!({
        "message": "Analysis complete (model)",
        "using_ai": true,
        "bugs": [
            {"line": null, "type": "Logic", "message": "Index out of range on line 42"},
            {"line": 3, "type": "Syntax", "message": "Missing colon"}
        ],
        "explanation": "The loop runs one step too far.",
        "fixed_code": "for i in range(len(xs)):\n    print(xs[i])",
        "optimized_code": "for x in xs:\n    print(x)",
        "complexity": {"time": "O(n)", "space": "O(1)"},
        "tests": [
            {"description": "empty list", "input": [], "expected_output": "no output"}
        ]
    })
    .to_string()
}

/// Builder for a data directory with a pre-seeded local store
pub struct PlaygroundHome {
    temp_dir: TempDir,
    values: serde_json::Map<String, Value>,
}

impl PlaygroundHome {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, values: serde_json::Map::new() }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), Value::String(value.to_string()));
        self.write();
        self
    }

    /// `count` history entries, newest first, with codes `old-<n>` (n = count..=1)
    pub fn with_history(self, count: usize) -> Self {
        let entries: Vec<Value> = (1..=count)
            .rev()
            .map(|n| {
                json!({
                    "id": 1_700_000_000_000i64 + n as i64,
                    "timestamp": "1/1/2024, 12:00:00 PM",
                    "language": "Python",
                    "code": format!("old-{:02}", n),
                    "fullCode": format!("old-{:02}", n),
                    "bugCount": 0
                })
            })
            .collect();
        let history = serde_json::to_string(&entries).unwrap();
        self.with_value("codeDebugHistory", &history)
    }

    fn write(&self) {
        let path = self.temp_dir.path().join("local-storage.json");
        fs::write(path, serde_json::to_string_pretty(&self.values).unwrap())
            .expect("Failed to write local store");
    }

    /// Parsed contents of the local store; empty when nothing was written yet
    pub fn store(&self) -> serde_json::Map<String, Value> {
        let path = self.temp_dir.path().join("local-storage.json");
        if !path.exists() {
            return serde_json::Map::new();
        }
        let raw = fs::read_to_string(path).expect("Failed to read local store");
        serde_json::from_str(&raw).expect("Invalid local store")
    }

    /// Parsed history array from the local store
    pub fn history(&self) -> Vec<Value> {
        self.store()
            .get("codeDebugHistory")
            .and_then(Value::as_str)
            .map(|raw| serde_json::from_str(raw).expect("Invalid history"))
            .unwrap_or_default()
    }
}
