//! Turning computed values into HTTP responses.
//!
//! # Responsibilities
//! - Encode a `ResponseEnvelope` (status, ordered headers, body)
//! - Advertise the handler's identity in `Server`
//! - Render the transport's minimal error page
//!
//! # Design Decisions
//! - `Server` goes first, handler headers follow in order, duplicates kept
//! - Header values are taken as raw bytes, so non-ASCII values survive
//! - An envelope that cannot be encoded becomes a minimal 500
//! - Informational (1xx) statuses are refused; hyper would replace them with
//!   a bare 500

use axum::body::Body;
use axum::http::header::{CONNECTION, CONTENT_TYPE, SERVER};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::Response;

use crate::handler::ResponseEnvelope;

/// Reasons an envelope cannot be sent.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("invalid status code {0}")]
    Status(u16),
    #[error("invalid header name {0:?}")]
    HeaderName(String),
    #[error("invalid value for header {0:?}")]
    HeaderValue(String),
}

/// Encode `envelope`, announcing `server` in the `Server` header.
pub fn encode(envelope: ResponseEnvelope, server: &str) -> Result<Response, ResponseError> {
    let status = StatusCode::from_u16(envelope.status)
        .ok()
        .filter(|status| !status.is_informational())
        .ok_or(ResponseError::Status(envelope.status))?;

    let mut response = Response::new(Body::from(envelope.body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(SERVER, server_value(server));
    for (name, value) in envelope.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ResponseError::HeaderName(name.clone()))?;
        let header_value =
            HeaderValue::from_bytes(value.as_bytes()).map_err(|_| ResponseError::HeaderValue(name))?;
        headers.append(header_name, header_value);
    }

    Ok(response)
}

/// The transport's minimal error response.
pub fn minimal_error(status: StatusCode, reason: &str, server: &str) -> Response {
    let body = format!(
        "<!DOCTYPE HTML>\n<html>\n<head><meta charset=\"utf-8\"><title>Error response</title></head>\n\
         <body>\n<h1>Error response</h1>\n<p>Error code: {}</p>\n<p>Message: {}.</p>\n</body>\n</html>\n",
        status.as_u16(),
        escape_html(reason),
    );

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(SERVER, server_value(server));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/html;charset=utf-8"));
    headers.insert(CONNECTION, HeaderValue::from_static("close"));
    response
}

fn server_value(server: &str) -> HeaderValue {
    HeaderValue::from_bytes(server.as_bytes()).unwrap_or_else(|_| {
        tracing::warn!(server = %server, "Server string is not a valid header value");
        HeaderValue::from_static(crate::handler::DEFAULT_SERVER_STRING)
    })
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::default_headers;

    fn envelope(status: u16, headers: Vec<(String, String)>) -> ResponseEnvelope {
        ResponseEnvelope {
            status,
            headers,
            body: "hi".into(),
        }
    }

    #[test]
    fn encodes_status_and_headers_in_order() {
        let response = encode(envelope(555, default_headers("hi")), "Funtime Server!").unwrap();
        assert_eq!(response.status().as_u16(), 555);

        let names: Vec<&str> = response.headers().keys().map(|n| n.as_str()).collect();
        assert_eq!(names, ["server", "content-type", "last-modified", "content-length"]);
        assert_eq!(response.headers()[SERVER], "Funtime Server!");
        assert_eq!(response.headers()["content-length"], "2");
    }

    #[test]
    fn repeated_headers_are_kept() {
        let headers = vec![
            ("Set-Cookie".into(), "a=1".into()),
            ("Set-Cookie".into(), "b=2".into()),
        ];
        let response = encode(envelope(200, headers), "Apache").unwrap();
        assert_eq!(response.headers().get_all("set-cookie").iter().count(), 2);
    }

    #[test]
    fn rejects_out_of_range_status() {
        let err = encode(envelope(1000, Vec::new()), "Apache").unwrap_err();
        assert!(matches!(err, ResponseError::Status(1000)));
    }

    #[test]
    fn rejects_informational_status() {
        for code in [100, 102, 199] {
            let err = encode(envelope(code, Vec::new()), "Apache").unwrap_err();
            assert!(matches!(err, ResponseError::Status(c) if c == code));
        }
        assert_eq!(encode(envelope(200, Vec::new()), "Apache").unwrap().status(), 200);
    }

    #[test]
    fn rejects_bad_header_name() {
        let headers = vec![("Bad Name".into(), "x".into())];
        let err = encode(envelope(200, headers), "Apache").unwrap_err();
        assert!(matches!(err, ResponseError::HeaderName(_)));
    }

    #[test]
    fn rejects_control_characters_in_value() {
        let headers = vec![("X-Evil".into(), "a\r\nb".into())];
        let err = encode(envelope(200, headers), "Apache").unwrap_err();
        assert!(matches!(err, ResponseError::HeaderValue(name) if name == "X-Evil"));
    }

    #[test]
    fn minimal_error_page() {
        let response = minimal_error(StatusCode::BAD_REQUEST, "bad <target>", "Apache");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[SERVER], "Apache");
        assert_eq!(response.headers()[CONNECTION], "close");
    }

    #[test]
    fn escapes_reason() {
        assert_eq!(escape_html("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
