//! Per-request context handed to handler hooks.
//!
//! # Design Decisions
//! - Fields are copied out of the parsed request so hooks can run off the
//!   connection task
//! - Method and target are kept exactly as received; truncation is left to
//!   handlers that store them

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request};
use axum::http::HeaderMap;

/// What the transport parsed out of one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request method as sent, e.g. `GET` or `FOOBAR`.
    pub method: String,
    /// Request target, e.g. `/index.html?q=1`.
    pub path: String,
    /// Protocol version, e.g. `HTTP/1.1`.
    pub version: String,
    pub headers: HeaderMap,
    /// Remote address, when the connection recorded one.
    pub peer: Option<SocketAddr>,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn from_request(request: &Request) -> Self {
        Self {
            method: request.method().as_str().to_string(),
            path: request.uri().to_string(),
            version: format!("{:?}", request.version()),
            headers: request.headers().clone(),
            peer: request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
        }
    }
}

/// A value cut down to a maximum number of characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated {
    pub value: String,
    /// Whether anything was cut off.
    pub truncated: bool,
}

/// Keep at most `max_chars` characters of `value`.
pub fn truncate(value: &str, max_chars: usize) -> Truncated {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => Truncated {
            value: value[..cut].to_string(),
            truncated: true,
        },
        None => Truncated {
            value: value.to_string(),
            truncated: false,
        },
    }
}
