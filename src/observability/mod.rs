//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stdout, pretty or JSON
//! ```

pub mod logging;

pub use logging::LogFormat;
