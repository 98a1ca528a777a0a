//! Command line surface shared by every toy binary.
//!
//! Each binary flattens its own arguments next to [`ServerArgs`]. Every
//! parsed argument is also copied into the handler options under its field
//! name, so handlers can read `status`, `server`, `host` and the like.
//!
//! Options precedence, highest first: values passed to [`App::run`], the
//! `--options` file, command line arguments.

use std::path::PathBuf;

use clap::{Args, CommandFactory, FromArgMatches, Parser};
use serde::Serialize;

use crate::config::loader::load_options;
use crate::config::{validate_config, ConfigError, ServerConfiguration};
use crate::handler::{Handler, Options};
use crate::lifecycle::{Supervisor, SupervisorError};
use crate::observability::logging::{self, LogFormat};

/// Arguments every binary accepts.
#[derive(Debug, Clone, Args, Serialize)]
pub struct ServerArgs {
    /// The host to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// The ports to listen on.
    #[arg(long, num_args = 1.., default_values_t = [8080])]
    pub ports: Vec<u16>,

    /// TOML file merged into the handler options.
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Maximum concurrent connections per port.
    #[arg(long, default_value_t = 10_000)]
    pub max_connections: usize,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Placeholder for binaries without arguments of their own.
#[derive(Debug, Clone, Default, Args, Serialize)]
pub struct NoArgs {}

#[derive(Debug, Parser)]
pub struct Cli<A: Args> {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub extra: A,
}

impl<A: Args> Cli<A> {
    /// Parse the process arguments, with `about` as the `--help` description.
    ///
    /// Exits the process on `--help` or invalid arguments.
    pub fn parse_with_about(about: &str) -> Self {
        let mut command = Self::command().about(about.to_string());
        let matches = command.get_matches_mut();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.format(&mut command).exit())
    }
}

impl<A: Args + Serialize> Cli<A> {
    /// Final options mapping for `explicit` values given by the program.
    pub fn merged_options(&self, explicit: Options) -> Result<Options, ConfigError> {
        let mut options = explicit;
        if let Some(path) = &self.server.options {
            fill(&mut options, load_options(path)?);
        }
        fill(&mut options, to_options(&self.server)?);
        fill(&mut options, to_options(&self.extra)?);
        Ok(options)
    }

    /// Validated server configuration for these arguments.
    pub fn configuration(&self, explicit: Options) -> Result<ServerConfiguration, ConfigError> {
        let config = ServerConfiguration {
            host: self.server.host.clone(),
            ports: self.server.ports.clone(),
            options: self.merged_options(explicit)?,
            max_connections: self.server.max_connections,
        };
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

/// Insert every entry of `source` whose key `target` does not have yet.
fn fill(target: &mut Options, source: Options) {
    for (key, value) in source {
        target.entry(key).or_insert(value);
    }
}

fn to_options<T: Serialize>(args: &T) -> Result<Options, ConfigError> {
    match serde_json::to_value(args)? {
        serde_json::Value::Object(options) => Ok(options),
        _ => Ok(Options::new()),
    }
}

/// A handler plus the description shown by `--help`.
pub struct App<H> {
    handler: H,
    about: String,
}

impl<H: Handler> App<H> {
    pub fn new(handler: H, about: impl Into<String>) -> Self {
        Self {
            handler,
            about: about.into(),
        }
    }

    /// Parse the process arguments for this app.
    pub fn parse_args<A: Args>(&self) -> Cli<A> {
        Cli::parse_with_about(&self.about)
    }

    /// Start every listener and serve until the process is killed.
    pub async fn run<A: Args + Serialize>(self, cli: &Cli<A>, options: Options) -> Result<(), SupervisorError> {
        logging::init(cli.server.log_format);

        let config = cli.configuration(options)?;
        let line = listening_line(&config);

        let running = Supervisor::new(config, self.handler).start().await?;
        println!("{line}");

        running.wait().await;
        Ok(())
    }
}

/// Startup line printed once every listener is bound.
pub fn listening_line(config: &ServerConfiguration) -> String {
    let ports = config
        .unique_ports()
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!("Listening on {}:{}", config.host, ports)
}

/// Run `handler` with only the common arguments.
pub async fn main<H: Handler>(handler: H, about: &str) -> Result<(), SupervisorError> {
    let app = App::new(handler, about);
    let cli: Cli<NoArgs> = app.parse_args();
    app.run(&cli, Options::new()).await
}
