//! Classification of what the transport made of a request.
//!
//! # Responsibilities
//! - Decide whether the transport implements the request method
//! - Mark unimplemented methods as intercepted
//!
//! # Design Decisions
//! - `NotImplemented` is intercepted and answered by the pipeline, so one
//!   handler definition covers every method
//! - Target form is not checked: `GET *` or `FOOBAR host:443` get the
//!   handler's answer like any other request
//! - Bytes hyper cannot parse are answered by hyper's own minimal error
//!   response and never get here

use axum::http::Method;

/// Methods the transport has a dedicated implementation for.
pub const IMPLEMENTED_METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
    Method::PATCH,
];

/// What the transport made of a parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The method has a dedicated implementation.
    Handled,
    /// No implementation exists for this method. Intercepted.
    NotImplemented(Method),
}

impl Outcome {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, Outcome::NotImplemented(_))
    }
}

/// Classify a parsed request by its method.
pub fn classify(method: &Method) -> Outcome {
    if IMPLEMENTED_METHODS.contains(method) {
        Outcome::Handled
    } else {
        Outcome::NotImplemented(method.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_methods_are_handled() {
        for method in IMPLEMENTED_METHODS {
            assert_eq!(classify(&method), Outcome::Handled, "{method}");
            assert!(!classify(&method).is_intercepted());
        }
    }

    #[test]
    fn extension_method_is_not_implemented() {
        let method = Method::from_bytes(b"FOOBAR").unwrap();
        assert_eq!(classify(&method), Outcome::NotImplemented(method.clone()));
        assert!(classify(&method).is_intercepted());
    }

    #[test]
    fn webdav_method_is_intercepted() {
        let method = Method::from_bytes(b"PROPFIND").unwrap();
        assert!(classify(&method).is_intercepted());
    }
}
