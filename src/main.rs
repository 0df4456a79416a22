use anyhow::{Context, Result};
use portfolio_server::{config::Config, server};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_server=info".parse()?),
        )
        .init();

    info!("Starting portfolio server");

    // Load configuration from environment
    let config = Config::from_env()?;
    if let Err(e) = config.discord_credentials() {
        warn!("Contact notifications disabled until configured: {}", e);
    }
    info!("Language redirect policy: {:?}", config.redirect_policy);

    let addr = format!("0.0.0.0:{}", config.port);
    let app = server::app_router(server::AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
