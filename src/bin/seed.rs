//! Fills the configured store with demo data. Existing rows are deleted.

use jobboard_backend::{config::Config, database, seed, utils::token::TokenIssuer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let store = database::connect(&config).await?;
    let tokens = TokenIssuer::new(
        &config.jwt_secret,
        chrono::Duration::seconds(config.token_ttl_secs),
    );

    let result = seed::seed_demo_data(store.clone(), tokens).await;
    store.close().await;
    let report = result?;
    info!(?report, "seed finished");
    Ok(())
}
