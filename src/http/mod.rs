//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → hyper HTTP/1 (parse; malformed bytes answered by hyper)
//!     → server.rs (axum fallback dispatcher)
//!     → request.rs (RequestContext)
//!     → outcome.rs (Handled / NotImplemented, both intercepted)
//!     → handler pipeline
//!     → response.rs (encode envelope)
//!     → Send to client
//! ```

pub mod outcome;
pub mod request;
pub mod response;
pub mod server;

pub use outcome::Outcome;
pub use request::{truncate, RequestContext, Truncated};
pub use server::HttpServer;
