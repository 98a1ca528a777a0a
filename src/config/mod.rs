//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line / options file (TOML)
//!     → loader.rs (parse options table)
//!     → schema.rs (ServerConfiguration)
//!     → validation.rs (semantic checks)
//!     → Supervisor (immutable from here on)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once handed to the supervisor
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::ServerConfiguration;
pub use validation::{validate_config, ValidationError};
