//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::handler::Options;

/// Everything the supervisor needs to start listening.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfiguration {
    /// Host to bind every listener to.
    pub host: String,

    /// Ports to listen on, one listener each.
    pub ports: Vec<u16>,

    /// Caller-supplied values handed to every handler.
    pub options: Options,

    /// Maximum concurrent connections per listener (backpressure).
    pub max_connections: usize,
}

impl Default for ServerConfiguration {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            ports: vec![8080],
            options: Options::new(),
            max_connections: 10_000,
        }
    }
}

impl ServerConfiguration {
    pub fn new(host: impl Into<String>, ports: Vec<u16>, options: Options) -> Self {
        Self {
            host: host.into(),
            ports,
            options,
            ..Self::default()
        }
    }

    /// Ports in configuration order with repeats removed.
    pub fn unique_ports(&self) -> Vec<u16> {
        let mut seen = Vec::with_capacity(self.ports.len());
        for port in &self.ports {
            if !seen.contains(port) {
                seen.push(*port);
            }
        }
        seen
    }
}
