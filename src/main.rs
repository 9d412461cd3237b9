use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_rec_api::{
    api::{create_router, AppState},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_rec_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let state = AppState::from_config(&config).context("Failed to build API clients")?;

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
