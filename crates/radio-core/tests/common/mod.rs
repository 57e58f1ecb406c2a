//! Shared helpers for radio-core integration tests: station builders and a
//! one-shot HTTP server that serves a canned response on localhost.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use radio_core::config::DirectoryConfig;
use radio_core::station::Station;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", name, e))
}

pub fn station(name: &str, tags: &str, url: &str) -> Station {
    Station {
        id: format!("id-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        tags: tags.to_string(),
        url: url.to_string(),
        ..Station::default()
    }
}

/// Directory config pointing at a local test server.
pub fn local_config(addr: SocketAddr) -> DirectoryConfig {
    DirectoryConfig {
        base_url: format!("http://{}", addr),
        timeout_secs: 5,
        ..DirectoryConfig::default()
    }
}

/// Canned response served once by [`serve_once`].
pub struct CannedResponse {
    pub status_line: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl CannedResponse {
    pub fn json(body: impl Into<String>) -> Self {
        Self {
            status_line: "HTTP/1.1 200 OK",
            content_type: "application/json",
            body: body.into(),
        }
    }

    pub fn status(status_line: &'static str) -> Self {
        Self {
            status_line,
            content_type: "text/plain",
            body: "error".to_string(),
        }
    }
}

/// Bind an ephemeral port and answer exactly one request with `response`.
///
/// The join handle resolves to the request head the client sent, so tests can
/// assert on the path and headers.
pub async fn serve_once(response: CannedResponse) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.expect("read request");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        let head = String::from_utf8_lossy(&buf).to_string();

        let reply = format!(
            "{}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response.status_line,
            response.content_type,
            response.body.len(),
            response.body
        );
        socket
            .write_all(reply.as_bytes())
            .await
            .expect("write response");
        let _ = socket.shutdown().await;
        head
    });

    (addr, handle)
}
