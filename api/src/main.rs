use anyhow::Result;
use dotenv::dotenv;

use tour_api::config::ApiConfig;
use tour_api::observability::Observability;
use tour_api::routes;
use tour_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = ApiConfig::from_env()?;
    let obs = Observability::init(config.log_format)?;

    tracing::info!(
        "API configuration loaded: bind={}, origins={}, max_body_bytes={}",
        config.bind_addr,
        config.allowed_origins.join(","),
        config.max_body_bytes
    );

    let addr = config.bind_addr;
    let state = AppState::new(config, obs.registry);
    let app = routes::build_router(state);

    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
