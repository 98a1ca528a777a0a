//! Responder whose body, status and identity come from options.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::handler::{Context, Handler, DEFAULT_SERVER_STRING, DEFAULT_STATUS};

pub const ABOUT: &str = "HTTP server defined by command line arguments.";

/// Arguments of the `fake-server` binary.
#[derive(Debug, Clone, Args, Serialize)]
pub struct FakeServerArgs {
    /// File whose contents are sent as the response body.
    #[arg(long, value_name = "FILE")]
    pub content_file: Option<PathBuf>,

    /// Status code of every response.
    #[arg(long, default_value_t = 555)]
    pub status: u16,

    /// Value of the Server header.
    #[arg(long, default_value = "Funtime Server!")]
    pub server: String,
}

/// Answers with the `content`, `status` and `server` options.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeServer;

impl Handler for FakeServer {
    fn content(&self, cx: &Context<'_>) -> String {
        cx.options.get_str("content").unwrap_or_default().to_string()
    }

    fn status_code(&self, cx: &Context<'_>) -> u16 {
        cx.options
            .get_u64("status")
            .and_then(|status| u16::try_from(status).ok())
            .unwrap_or(DEFAULT_STATUS)
    }

    fn server_string(&self, cx: &Context<'_>) -> String {
        cx.options
            .get_str("server")
            .unwrap_or(DEFAULT_SERVER_STRING)
            .to_string()
    }
}
