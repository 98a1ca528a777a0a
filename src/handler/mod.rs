//! Request handler subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfiguration.options
//!     → factory.rs (copy per port, insert "port")
//!     → options.rs (HandlerOptions, read-only)
//!     → BoundHandler (base handler + its listener's options)
//!     → pipeline.rs (hooks in order, per request)
//!     → ResponseEnvelope
//! ```
//!
//! # Design Decisions
//! - Hooks are trait methods with default bodies; a concrete handler
//!   overrides only what it needs
//! - The base handler is shared behind an `Arc`; per-listener state lives in
//!   `HandlerOptions`, per-request state in `RequestContext`
//! - `on_response` observes the final values and cannot change them

pub mod factory;
pub mod options;
pub mod pipeline;

use std::time::SystemTime;

use crate::http::request::RequestContext;

pub use factory::{BoundHandler, HandlerFactory};
pub use options::{HandlerOptions, Options};

/// A single response header as `(name, value)`.
pub type Header = (String, String);

/// Status returned when a handler does not override `status_code`.
pub const DEFAULT_STATUS: u16 = 200;

/// Identity advertised in the `Server` header by default.
pub const DEFAULT_SERVER_STRING: &str = "Apache";

/// What a hook can see while a request is being answered.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// The parsed request.
    pub request: &'a RequestContext,
    /// Options of the listener that accepted the request.
    pub options: &'a HandlerOptions,
}

impl<'a> Context<'a> {
    pub fn new(request: &'a RequestContext, options: &'a HandlerOptions) -> Self {
        Self { request, options }
    }
}

/// Behaviour of a responder.
///
/// Every request that reaches the pipeline runs, in order: [`on_request`],
/// [`content`], [`server_headers`], [`status_code`], [`on_response`]. Methods
/// the transport does not implement go through the same hooks.
///
/// Hooks are synchronous and run on tokio's blocking pool, so blocking I/O
/// inside a hook does not stall the listener. A panic inside a hook drops the
/// current connection only.
///
/// [`on_request`]: Handler::on_request
/// [`content`]: Handler::content
/// [`server_headers`]: Handler::server_headers
/// [`status_code`]: Handler::status_code
/// [`on_response`]: Handler::on_response
pub trait Handler: Send + Sync + 'static {
    /// Called before the response is generated.
    fn on_request(&self, _cx: &Context<'_>) {}

    /// Response body. Empty by default.
    fn content(&self, _cx: &Context<'_>) -> String {
        String::new()
    }

    /// Response status code. 200 by default.
    fn status_code(&self, _cx: &Context<'_>) -> u16 {
        DEFAULT_STATUS
    }

    /// Response headers, in send order.
    ///
    /// The default sends `Content-type`, `Last-Modified` and a
    /// `Content-Length` equal to the byte length of `content`.
    fn server_headers(&self, _cx: &Context<'_>, content: &str) -> Vec<Header> {
        default_headers(content)
    }

    /// Value of the `Server` header.
    fn server_string(&self, _cx: &Context<'_>) -> String {
        DEFAULT_SERVER_STRING.to_string()
    }

    /// Called after the response is generated, before it is sent.
    fn on_response(&self, _cx: &Context<'_>, _content: &str, _headers: &[Header], _code: u16) {}
}

/// Headers sent when a handler does not override `server_headers`.
pub fn default_headers(content: &str) -> Vec<Header> {
    vec![
        ("Content-type".to_string(), "text/html".to_string()),
        (
            "Last-Modified".to_string(),
            httpdate::fmt_http_date(SystemTime::now()),
        ),
        ("Content-Length".to_string(), content.len().to_string()),
    ]
}

/// A fully computed response, produced fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: Vec<Header>,
    pub body: String,
}

impl ResponseEnvelope {
    /// First header value whose name matches case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
