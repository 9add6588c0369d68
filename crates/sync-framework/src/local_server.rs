//! # Local HTTP Server
//!
//! [`LocalServer`] is a scripted HTTP/1.1 listener on `127.0.0.1`. It complements
//! [`MockTransport`](crate::mock::MockTransport): the mock replaces the transport, while the
//! server lets a real [`HttpTransport`](crate::HttpTransport) run its whole request path
//! (URL resolution, headers, status and body mapping).
//!
//! Replies are handed out in FIFO order regardless of route, and every request is recorded
//! with its headers.
//!
//! ```rust
//! use sync_framework::local_server::LocalServer;
//! use sync_framework::{HttpTransport, Transport};
//! use serde_json::json;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = LocalServer::start().await.unwrap();
//!     server.reply_json(200, json!({ "data": [] }));
//!
//!     let http = HttpTransport::new(server.url(), Duration::from_secs(5)).unwrap();
//!     assert_eq!(http.get("/api/bookings").await, Ok(json!({ "data": [] })));
//!     assert_eq!(server.received()[0].target, "/api/bookings");
//! }
//! ```

use crate::transport::Url;
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::VecDeque;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracing::debug;

const HEADER_END: &[u8] = b"\r\n\r\n";

/// A request as the server saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedRequest {
    pub method: String,
    /// Path and query, exactly as sent.
    pub target: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ReceivedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

struct Canned {
    status: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Canned>,
    received: Vec<ReceivedRequest>,
}

/// Scripted HTTP/1.1 listener. The accept loop stops when the server is dropped.
pub struct LocalServer {
    addr: SocketAddr,
    script: Arc<Mutex<Script>>,
    task: JoinHandle<()>,
}

impl LocalServer {
    /// Binds an ephemeral port on the loopback interface and starts accepting.
    ///
    /// # Errors
    ///
    /// Returns the bind error.
    pub async fn start() -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let script = Arc::new(Mutex::new(Script::default()));
        let task = tokio::spawn(serve(listener, script.clone()));
        debug!(%addr, "Local server listening");
        Ok(Self { addr, script, task })
    }

    /// Origin URL of the server, e.g. `http://127.0.0.1:41234/`.
    pub fn url(&self) -> Url {
        // A socket address always forms a valid origin.
        Url::parse(&format!("http://{}/", self.addr)).unwrap_or_else(|_| unreachable!())
    }

    /// Queue a JSON reply.
    pub fn reply_json(&self, status: u16, body: Value) {
        self.reply_raw(status, "application/json", body.to_string());
    }

    /// Queue a reply with an arbitrary content type and body, possibly empty.
    pub fn reply_raw(&self, status: u16, content_type: &'static str, body: impl Into<String>) {
        self.lock().replies.push_back(Canned {
            status,
            content_type,
            body: body.into(),
        });
    }

    /// Every request received so far, in arrival order.
    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.lock().received.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        lock(&self.script)
    }
}

impl Drop for LocalServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn lock(script: &Mutex<Script>) -> MutexGuard<'_, Script> {
    script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn serve(listener: TcpListener, script: Arc<Mutex<Script>>) {
    while let Ok((stream, peer)) = listener.accept().await {
        let script = script.clone();
        tokio::spawn(async move {
            if let Err(e) = answer(stream, &script).await {
                debug!(%peer, error = %e, "Local server connection failed");
            }
        });
    }
}

/// Reads one request and writes one reply, then closes the connection.
async fn answer(mut stream: TcpStream, script: &Mutex<Script>) -> io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_len = loop {
        if let Some(pos) = buffer.windows(HEADER_END.len()).position(|w| w == HEADER_END) {
            break pos + HEADER_END.len();
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..head_len]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);
    while buffer.len() < head_len + content_length {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);
    }
    let body = String::from_utf8_lossy(&buffer[head_len..]).into_owned();

    let canned = {
        let mut script = lock(script);
        script.received.push(ReceivedRequest {
            method,
            target,
            headers,
            body,
        });
        script.replies.pop_front()
    };
    let canned = canned.unwrap_or(Canned {
        status: 500,
        content_type: "text/plain",
        body: "no reply scripted".to_string(),
    });

    let reason = StatusCode::from_u16(canned.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown");
    let response = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: {}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        canned.status,
        reason,
        canned.content_type,
        canned.body.len(),
        canned.body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
