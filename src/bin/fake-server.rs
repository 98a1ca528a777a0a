use std::fs;

use hypertoy::cli::App;
use hypertoy::toys::fake_server::{FakeServerArgs, ABOUT};
use hypertoy::toys::FakeServer;
use hypertoy::Options;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::new(FakeServer, ABOUT);
    let cli = app.parse_args::<FakeServerArgs>();

    let content = match &cli.extra.content_file {
        Some(path) => fs::read_to_string(path)?,
        None => String::new(),
    };

    let mut options = Options::new();
    options.insert("content".to_string(), content.into());

    app.run(&cli, options).await?;
    Ok(())
}
