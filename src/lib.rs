pub mod api;
pub mod config;
pub mod core_state;
pub mod models;
pub mod prediction;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::server::start_api_server;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;
use crate::prediction::{GeminiClient, RiskModel};

/// Run the service: initialize tracing, build the prediction client from
/// the environment, and serve the API until interrupted.
pub async fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let model = GeminiClient::from_env();
    if !model.is_configured() {
        // Not fatal: a missing credential surfaces as a prediction
        // failure at call time, not at startup.
        tracing::warn!(
            "{} not set; predictions will fail until it is provided",
            config::API_KEY_ENV
        );
    }

    let ctx = ApiContext::new(Arc::new(CoreState::new()), Arc::new(model));
    let mut server = start_api_server(ctx, config::bind_addr()).await?;
    tracing::info!(addr = %server.addr, "ready — serving the assessment API");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for shutdown signal: {e}"))?;
    tracing::info!("interrupt received, shutting down");
    server.shutdown();

    Ok(())
}
