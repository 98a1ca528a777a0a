use hypertoy::toys::tarpit::ABOUT;
use hypertoy::toys::Tarpit;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    hypertoy::cli::main(Tarpit, ABOUT).await?;
    Ok(())
}
