//! The per-request hook pipeline.
//!
//! Order is fixed: `on_request`, `content`, `server_headers`, `status_code`,
//! `on_response`. Values handed to `on_response` are the values sent.

use crate::handler::{Context, Handler, ResponseEnvelope};

/// Run every hook of `handler` for one request.
pub fn run<H: Handler + ?Sized>(handler: &H, cx: &Context<'_>) -> ResponseEnvelope {
    handler.on_request(cx);

    let body = handler.content(cx);
    let headers = handler.server_headers(cx, &body);
    let status = handler.status_code(cx);

    handler.on_response(cx, &body, &headers, status);

    ResponseEnvelope {
        status,
        headers,
        body,
    }
}
