//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use hypertoy::{Handler, Options, Running, ServerConfiguration, Supervisor};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Start `handler` on the given loopback ports.
///
/// Keep the returned value alive: dropping it stops the listeners.
pub async fn start<H: Handler>(handler: H, ports: &[u16], options: Value) -> Running {
    let options: Options = match options {
        Value::Object(map) => map,
        _ => Options::new(),
    };
    let config = ServerConfiguration::new("127.0.0.1", ports.to_vec(), options);
    Supervisor::new(config, handler).start().await.unwrap()
}

pub fn url(port: u16, path: &str) -> String {
    format!("http://127.0.0.1:{port}{path}")
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Write `request` as-is and read until the server closes the connection.
#[allow(dead_code)]
pub async fn raw_request(port: u16, request: &str) -> String {
    let addr: SocketAddr = format!("127.0.0.1:{port}").parse().unwrap();
    let mut socket = TcpStream::connect(addr).await.unwrap();
    socket.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), socket.read_to_end(&mut response))
        .await
        .expect("server did not close the connection")
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}

/// Body of a raw HTTP/1 response.
#[allow(dead_code)]
pub fn raw_body(response: &str) -> &str {
    response.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or("")
}
