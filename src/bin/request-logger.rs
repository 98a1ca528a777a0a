use hypertoy::cli::Cli;
use hypertoy::toys::request_logger::{RequestLoggerArgs, ABOUT};
use hypertoy::toys::RequestLogger;
use hypertoy::Options;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::<RequestLoggerArgs>::parse_with_about(ABOUT);
    let handler = RequestLogger::from_args(&cli.extra)?;

    hypertoy::cli::App::new(handler, ABOUT)
        .run(&cli, Options::new())
        .await?;
    Ok(())
}
