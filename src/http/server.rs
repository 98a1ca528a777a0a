//! HTTP server for one listener.
//!
//! # Responsibilities
//! - Build the axum router: a single fallback dispatcher, so every path and
//!   every method lands in the same place
//! - Classify each request and run the hook pipeline for every method
//! - Serve accepted connections with hyper's HTTP/1 server
//!
//! # Design Decisions
//! - Hooks run on the blocking pool; a panicking hook is resumed on the
//!   connection task so only that connection is lost
//! - Header names are written title-cased on the wire

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use crate::handler::{BoundHandler, Handler};
use crate::http::outcome::{classify, Outcome};
use crate::http::request::RequestContext;
use crate::http::response::{encode, minimal_error};
use crate::net::connection::ConnectionTracker;
use crate::net::listener::Listener;

/// Pause after a failed accept before trying again.
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Serves one listener's traffic through a bound handler.
pub struct HttpServer<H> {
    router: Router,
    bound: BoundHandler<H>,
    tracker: ConnectionTracker,
}

impl<H: Handler> HttpServer<H> {
    pub fn new(bound: BoundHandler<H>) -> Self {
        let router = Self::build_router(bound.clone());
        Self {
            router,
            bound,
            tracker: ConnectionTracker::new(),
        }
    }

    fn build_router(bound: BoundHandler<H>) -> Router {
        Router::new()
            .fallback(dispatch::<H>)
            .with_state(bound)
            .layer(TraceLayer::new_for_http())
    }

    /// Accept and serve connections until the process ends.
    pub async fn run(self, listener: Listener) {
        let port = self.bound.port();
        tracing::info!(port, "HTTP server starting");

        loop {
            let (stream, peer, permit) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!(port, error = %e, "Accept failed");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };

            let router = self.router.clone();
            let guard = self.tracker.track();
            tracing::debug!(
                port,
                connection_id = %guard.id(),
                peer_addr = %peer,
                active = self.tracker.active_count(),
                "Serving connection"
            );

            tokio::spawn(async move {
                if let Err(e) = serve_connection(stream, peer, router).await {
                    tracing::debug!(connection_id = %guard.id(), error = %e, "Connection error");
                }
                drop(permit);
                drop(guard);
            });
        }
    }
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    router: Router,
) -> Result<(), hyper::Error> {
    let service = service_fn(move |mut request: Request<Incoming>| {
        request.extensions_mut().insert(ConnectInfo(peer));
        router.clone().oneshot(request)
    });

    let mut builder = http1::Builder::new();
    builder.title_case_headers(true);
    builder.serve_connection(TokioIo::new(stream), service).await
}

/// The single entry point for every request on a listener.
async fn dispatch<H: Handler>(State(bound): State<BoundHandler<H>>, request: Request) -> Response {
    let context = RequestContext::from_request(&request);

    if let Outcome::NotImplemented(method) = classify(request.method()) {
        tracing::debug!(method = %method, path = %context.path, "Intercepted unimplemented method");
    }

    answer(bound, context).await
}

async fn answer<H: Handler>(bound: BoundHandler<H>, context: RequestContext) -> Response {
    let computed = tokio::task::spawn_blocking(move || {
        let envelope = bound.respond(&context);
        let server = bound.server_string(&context);
        (envelope, server)
    })
    .await;

    let (envelope, server) = match computed {
        Ok(values) => values,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            tracing::error!(error = %e, "Handler task cancelled");
            return minimal_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Handler did not complete",
                crate::handler::DEFAULT_SERVER_STRING,
            );
        }
    };

    match encode(envelope, &server) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Handler produced an unsendable response");
            minimal_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", &server)
        }
    }
}
