//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of routes, one request per connection. Requests whose
//! target is an absolute URI (`GET http://host/path`) are served by path as
//! well, so the server doubles as a forward proxy. Every request is recorded.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub reason: &'static str,
    pub body: Vec<u8>,
    /// If false, no `Content-Length` is sent and the body is delimited by closing the connection.
    pub content_length: bool,
    pub headers: Vec<(String, String)>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            body: body.into(),
            content_length: true,
            headers: Vec::new(),
        }
    }

    pub fn status(status: u16, reason: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason,
            ..Self::ok(body)
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self::status(302, "Found", Vec::new()).header("Location", location)
    }

    pub fn without_content_length(mut self) -> Self {
        self.content_length = false;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target exactly as sent (absolute URI when proxied).
    pub target: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub struct ReleaseServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ReleaseServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `routes` (path → response).
/// Unknown paths get 404. The server runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> ReleaseServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &routes, &recorded));
        }
    });
    ReleaseServer {
        base_url: format!("http://127.0.0.1:{}", port),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    routes: &HashMap<String, Route>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(5)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = match parse_request(&String::from_utf8_lossy(&buf)) {
        Some(r) => r,
        None => return,
    };
    let route = routes
        .get(&request.path)
        .cloned()
        .unwrap_or_else(|| Route::status(404, "Not Found", &b"{\"message\":\"Not Found\"}"[..]));
    recorded.lock().unwrap().push(request);

    let mut head = format!("HTTP/1.1 {} {}\r\n", route.status, route.reason);
    if route.content_length {
        head.push_str(&format!("Content-Length: {}\r\n", route.body.len()));
    }
    for (k, v) in &route.headers {
        head.push_str(&format!("{}: {}\r\n", k, v));
    }
    head.push_str("Connection: close\r\n\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&route.body);
    let _ = stream.flush();
    let _ = stream.shutdown(std::net::Shutdown::Write);
}

fn parse_request(request: &str) -> Option<RecordedRequest> {
    let mut lines = request.lines();
    let mut first = lines.next()?.split_whitespace();
    let method = first.next()?.to_string();
    let target = first.next()?.to_string();
    let path = match target.strip_prefix("http://") {
        Some(rest) => rest.find('/').map(|i| rest[i..].to_string()).unwrap_or_else(|| "/".to_string()),
        None => target.clone(),
    };
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    Some(RecordedRequest {
        method,
        target,
        path,
        headers,
    })
}
