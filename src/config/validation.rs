//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: ServerConfiguration → Result<(), Vec<ValidationError>>
//! - Repeated ports are not an error; they collapse to one listener

use crate::config::schema::ServerConfiguration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("host must not be empty")]
    EmptyHost,
    #[error("at least one port is required")]
    NoPorts,
    #[error("port 0 is not a valid listening port")]
    ZeroPort,
    #[error("max_connections must be greater than 0")]
    NoConnections,
}

pub fn validate_config(config: &ServerConfiguration) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if config.ports.is_empty() {
        errors.push(ValidationError::NoPorts);
    }
    if config.ports.contains(&0) {
        errors.push(ValidationError::ZeroPort);
    }
    if config.max_connections == 0 {
        errors.push(ValidationError::NoConnections);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
