use tracing_subscriber::EnvFilter;
use utilboard::commands::Cli;
use utilboard::libs::messages::macros::DEBUG_ENV;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let default_level = if std::env::var(DEBUG_ENV).is_ok() { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    Cli::menu().await
}
