//! Listener supervision.
//!
//! # Responsibilities
//! - Bind one listener per configured port, each with its own options
//! - Start one task per listener running the accept loop
//! - Block until every listener task has exited
//!
//! # Design Decisions
//! - All-or-nothing startup: every port is bound before any accept loop
//!   starts; one failed bind closes the sockets already bound and fails
//! - No shutdown signal; the process ends the listeners
//! - A listener task that dies is logged, the others keep serving

use std::net::SocketAddr;

use tokio::task::JoinSet;

use crate::config::{validate_config, ConfigError, ServerConfiguration};
use crate::handler::{Handler, HandlerFactory};
use crate::http::HttpServer;
use crate::net::listener::{Listener, ListenerError};

#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("startup aborted on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: ListenerError,
    },
}

/// Starts and watches the listeners of one configuration.
pub struct Supervisor<H> {
    config: ServerConfiguration,
    factory: HandlerFactory<H>,
}

impl<H: Handler> Supervisor<H> {
    pub fn new(config: ServerConfiguration, handler: H) -> Self {
        let factory = HandlerFactory::new(handler, config.options.clone());
        Self { config, factory }
    }

    /// Bind every port and start serving.
    pub async fn start(self) -> Result<Running, SupervisorError> {
        validate_config(&self.config).map_err(ConfigError::Validation)?;

        let host = self.config.host.as_str();
        let ports = self.config.unique_ports();

        let mut bound = Vec::with_capacity(ports.len());
        for port in ports {
            let listener = Listener::bind(host, port, self.config.max_connections)
                .await
                .map_err(|source| {
                    tracing::error!(host, port, error = %source, "Bind failed, aborting startup");
                    SupervisorError::Bind { port, source }
                })?;
            bound.push((self.factory.bind(port), listener));
        }

        let mut units = JoinSet::new();
        let mut addrs = Vec::with_capacity(bound.len());
        for (handler, listener) in bound {
            addrs.push(listener.local_addr());
            let server = HttpServer::new(handler);
            units.spawn(server.run(listener));
        }

        tracing::info!(
            host,
            ports = ?addrs.iter().map(SocketAddr::port).collect::<Vec<_>>(),
            "Listening"
        );

        Ok(Running { addrs, units })
    }
}

/// The listeners of a started supervisor.
pub struct Running {
    addrs: Vec<SocketAddr>,
    units: JoinSet<()>,
}

impl Running {
    /// Bound addresses, in configuration order.
    pub fn local_addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Wait until every listener task has exited.
    ///
    /// Listener tasks never finish on their own, so this normally blocks for
    /// the rest of the process.
    pub async fn wait(mut self) {
        while let Some(result) = self.units.join_next().await {
            match result {
                Ok(()) => tracing::warn!(remaining = self.units.len(), "Listener stopped"),
                Err(e) => tracing::error!(
                    remaining = self.units.len(),
                    error = %e,
                    "Listener task failed"
                ),
            }
        }
        tracing::warn!("All listeners stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Options;

    struct Quiet;
    impl Handler for Quiet {}

    #[tokio::test]
    async fn starts_one_listener_per_unique_port() {
        let config = ServerConfiguration::new("127.0.0.1", vec![38_910, 38_911, 38_910], Options::new());
        let running = Supervisor::new(config, Quiet).start().await.unwrap();

        let ports: Vec<u16> = running.local_addrs().iter().map(SocketAddr::port).collect();
        assert_eq!(ports, vec![38_910, 38_911]);
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_binding() {
        let config = ServerConfiguration::new("127.0.0.1", vec![], Options::new());
        let err = Supervisor::new(config, Quiet).start().await.err().unwrap();
        assert!(matches!(err, SupervisorError::Config(ConfigError::Validation(_))));
    }

    #[tokio::test]
    async fn failed_bind_releases_earlier_ports() {
        let _taken = tokio::net::TcpListener::bind("127.0.0.1:38913").await.unwrap();

        let config = ServerConfiguration::new("127.0.0.1", vec![38_912, 38_913], Options::new());
        let err = Supervisor::new(config, Quiet).start().await.err().unwrap();
        assert!(matches!(err, SupervisorError::Bind { port: 38_913, .. }));

        // 38912 was bound first and must be free again.
        assert!(tokio::net::TcpListener::bind("127.0.0.1:38912").await.is_ok());
    }
}
