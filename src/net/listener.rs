//! TCP listener implementation with backpressure.
//!
//! # Responsibilities
//! - Bind to one (host, port) pair
//! - Accept incoming TCP connections
//! - Enforce max_connections limit via semaphore

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Error type for listener operations.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to bind {host}:{port}: {source}")]
    Bind {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    /// Failed to accept connection.
    #[error("failed to accept: {0}")]
    Accept(#[source] std::io::Error),
    /// The connection limit semaphore was closed.
    #[error("connection limit closed")]
    Closed,
}

/// A bounded TCP listener that limits concurrent connections.
///
/// When `max_connections` connections are open, accepting waits until one
/// of them closes.
pub struct Listener {
    inner: TcpListener,
    connection_limit: Arc<Semaphore>,
    local_addr: SocketAddr,
}

impl Listener {
    /// Bind `host:port`. `host` may be an IP address or a resolvable name.
    pub async fn bind(host: &str, port: u16, max_connections: usize) -> Result<Self, ListenerError> {
        let bind_error = |source| ListenerError::Bind {
            host: host.to_string(),
            port,
            source,
        };

        let inner = TcpListener::bind((host, port)).await.map_err(bind_error)?;
        let local_addr = inner.local_addr().map_err(bind_error)?;

        tracing::info!(
            address = %local_addr,
            max_connections,
            "Listener bound"
        );

        Ok(Self {
            inner,
            connection_limit: Arc::new(Semaphore::new(max_connections)),
            local_addr,
        })
    }

    /// Accept a new connection, respecting the connection limit.
    ///
    /// The returned permit must be held for the connection's lifetime.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr, OwnedSemaphorePermit), ListenerError> {
        // Acquire permit first (backpressure)
        let permit = Arc::clone(&self.connection_limit)
            .acquire_owned()
            .await
            .map_err(|_| ListenerError::Closed)?;

        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;

        tracing::trace!(
            peer_addr = %addr,
            available_permits = self.connection_limit.available_permits(),
            "Connection accepted"
        );

        Ok((stream, addr, permit))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_reports_address() {
        let listener = Listener::bind("127.0.0.1", 38_900, 4).await.unwrap();
        assert_eq!(listener.local_addr().port(), 38_900);
    }

    #[tokio::test]
    async fn bind_conflict_names_port() {
        let _first = Listener::bind("127.0.0.1", 38_901, 4).await.unwrap();
        let err = Listener::bind("127.0.0.1", 38_901, 4).await.err().unwrap();
        assert!(matches!(err, ListenerError::Bind { port: 38_901, .. }));
        assert!(err.to_string().contains("127.0.0.1:38901"));
    }

    #[tokio::test]
    async fn accept_holds_a_permit() {
        let listener = Listener::bind("127.0.0.1", 38_902, 1).await.unwrap();
        let _client = TcpStream::connect(listener.local_addr()).await.unwrap();
        let (_stream, _peer, permit) = listener.accept().await.unwrap();
        assert_eq!(listener.connection_limit.available_permits(), 0);
        drop(permit);
        assert_eq!(listener.connection_limit.available_permits(), 1);
    }
}
