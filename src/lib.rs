//! Customizable catch-all HTTP responders.
//!
//! A [`Handler`] decides body, status and headers through overridable hooks.
//! The [`Supervisor`] binds one listener per configured port, each with its
//! own copy of the options, and every request on every port, whatever its
//! method, runs through the same hook pipeline.
//!
//! ```text
//!   ServerConfiguration (host, ports, options)
//!            │
//!            ▼
//!   ┌─────────────────┐   one per port    ┌──────────────┐
//!   │   Supervisor    │──────────────────▶│ HandlerFactory│──▶ BoundHandler
//!   └─────────────────┘                   └──────────────┘        │
//!            │ spawn                                              ▼
//!            ▼                                             ┌────────────┐
//!   Listener ─▶ hyper HTTP/1 ─▶ dispatch ─▶ classify ────▶│  pipeline  │─▶ response
//!                  │ unparseable                           └────────────┘
//!                  └──────────▶ hyper's minimal error response
//! ```

// Core subsystems
pub mod config;
pub mod handler;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod cli;
pub mod lifecycle;
pub mod observability;

// Example responders
pub mod toys;

pub use config::ServerConfiguration;
pub use handler::{Context, Handler, HandlerFactory, HandlerOptions, Options, ResponseEnvelope};
pub use lifecycle::{Running, Supervisor, SupervisorError};
