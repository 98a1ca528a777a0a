//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (supervisor.rs):
//!     Validate config → Bind every port → Spawn one task per listener
//!
//! Run:
//!     Join listener tasks (blocks until the process is killed)
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and leaves nothing bound
//! - Listeners start only once every port is bound
//! - No graceful shutdown; termination is external

pub mod supervisor;

pub use supervisor::{Running, Supervisor, SupervisorError};
