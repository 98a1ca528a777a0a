//! Responder that records every request it sees.
//!
//! # Design Decisions
//! - Fields are cut to fixed lengths before recording; hostile clients
//!   control their size
//! - Recording failures are logged and never change the response

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use crate::handler::{Context, Handler};
use crate::http::truncate;

pub const ABOUT: &str = "Record HTTP request information. Not for production use.";

pub const MAX_METHOD_CHARS: usize = 50;
pub const MAX_PATH_CHARS: usize = 3000;
pub const MAX_VERSION_CHARS: usize = 50;

/// Arguments of the `request-logger` binary.
#[derive(Debug, Clone, Args, Serialize)]
pub struct RequestLoggerArgs {
    /// Append records as JSON lines to this file instead of the log.
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// One observed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestRecord {
    pub id: Uuid,
    /// Seconds since the Unix epoch.
    pub received_at: u64,
    /// e.g. HTTP/1.1
    pub version: String,
    pub version_trunc: bool,
    /// e.g. /
    pub path: String,
    pub path_trunc: bool,
    /// e.g. GET
    pub method: String,
    pub method_trunc: bool,
    /// Listening port the request arrived on.
    pub port: u16,
    pub peer: Option<String>,
}

impl RequestRecord {
    pub fn from_context(cx: &Context<'_>) -> Self {
        let request = cx.request;
        let version = truncate(&request.version, MAX_VERSION_CHARS);
        let path = truncate(&request.path, MAX_PATH_CHARS);
        let method = truncate(&request.method, MAX_METHOD_CHARS);

        Self {
            id: Uuid::new_v4(),
            received_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            version: version.value,
            version_trunc: version.truncated,
            path: path.value,
            path_trunc: path.truncated,
            method: method.value,
            method_trunc: method.truncated,
            port: cx.options.port(),
            peer: request.peer.map(|addr| addr.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where request records go.
pub trait RecordSink: Send + Sync + 'static {
    fn record(&self, record: &RequestRecord) -> Result<(), SinkError>;
}

/// Emits each record as a tracing event.
#[derive(Debug, Default)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn record(&self, record: &RequestRecord) -> Result<(), SinkError> {
        tracing::info!(
            target: "hypertoy::requests",
            id = %record.id,
            method = %record.method,
            method_trunc = record.method_trunc,
            path = %record.path,
            path_trunc = record.path_trunc,
            version = %record.version,
            version_trunc = record.version_trunc,
            port = record.port,
            peer = record.peer.as_deref().unwrap_or("-"),
            "Request observed"
        );
        Ok(())
    }
}

/// Appends each record as one JSON line.
#[derive(Debug)]
pub struct JsonLinesSink {
    file: Mutex<File>,
}

impl JsonLinesSink {
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl RecordSink for JsonLinesSink {
    fn record(&self, record: &RequestRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(record)?;
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{line}")?;
        Ok(())
    }
}

/// Records every request, answers with the framework defaults.
pub struct RequestLogger {
    sink: Box<dyn RecordSink>,
}

impl RequestLogger {
    pub fn new(sink: impl RecordSink) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Sink for `args`: the JSON lines file when given, the log otherwise.
    pub fn from_args(args: &RequestLoggerArgs) -> Result<Self, SinkError> {
        Ok(match &args.output {
            Some(path) => Self::new(JsonLinesSink::open(path)?),
            None => Self::new(TracingSink),
        })
    }
}

impl Handler for RequestLogger {
    fn on_request(&self, cx: &Context<'_>) {
        let record = RequestRecord::from_context(cx);
        if let Err(e) = self.sink.record(&record) {
            tracing::error!(id = %record.id, error = %e, "Failed to record request");
        }
    }
}
