//! Ready-made responders.
//!
//! - `fake_server`: fixed body, status and `Server` header from options
//! - `tarpit`: random pages linking to more random pages
//! - `request_logger`: records every request, answers with the defaults

pub mod fake_server;
pub mod random;
pub mod request_logger;
pub mod tarpit;

pub use fake_server::FakeServer;
pub use request_logger::RequestLogger;
pub use tarpit::Tarpit;
