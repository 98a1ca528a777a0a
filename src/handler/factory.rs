//! Binding a base handler to one listener's options.

use std::sync::Arc;

use crate::handler::options::{HandlerOptions, Options};
use crate::handler::pipeline;
use crate::handler::{Context, Handler, ResponseEnvelope};
use crate::http::request::RequestContext;

/// Produces one [`BoundHandler`] per listener port.
pub struct HandlerFactory<H> {
    base: Arc<H>,
    shared: Options,
}

impl<H: Handler> HandlerFactory<H> {
    pub fn new(base: H, shared: Options) -> Self {
        Self {
            base: Arc::new(base),
            shared,
        }
    }

    /// Bind the base handler to `port`. Each call gets its own options copy.
    pub fn bind(&self, port: u16) -> BoundHandler<H> {
        BoundHandler {
            handler: Arc::clone(&self.base),
            options: Arc::new(HandlerOptions::for_port(&self.shared, port)),
        }
    }
}

/// A handler paired with the options of the listener that owns it.
///
/// Cloning is cheap; every connection of a listener holds a clone.
pub struct BoundHandler<H> {
    handler: Arc<H>,
    options: Arc<HandlerOptions>,
}

impl<H> Clone for BoundHandler<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            options: Arc::clone(&self.options),
        }
    }
}

impl<H: Handler> BoundHandler<H> {
    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    pub fn port(&self) -> u16 {
        self.options.port()
    }

    /// Run the hook pipeline for one request.
    pub fn respond(&self, request: &RequestContext) -> ResponseEnvelope {
        let cx = Context::new(request, &self.options);
        pipeline::run(self.handler.as_ref(), &cx)
    }

    /// Value for the `Server` header of a response to `request`.
    pub fn server_string(&self, request: &RequestContext) -> String {
        self.handler
            .server_string(&Context::new(request, &self.options))
    }

    #[cfg(test)]
    pub(crate) fn shares_options_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.options, &other.options)
    }
}
