mod analysis;
mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod state;
mod structured;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, ModelInvoker};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting fit-analysis API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the model invoker (production: Anthropic-backed LlmClient)
    let invoker: Arc<dyn ModelInvoker> =
        Arc::new(LlmClient::new(config.anthropic_api_key.clone()));
    info!("Model invoker initialized (model: {})", llm_client::MODEL);

    info!(
        "Scoring policy: keyword_weight={}, strength_threshold={}, degraded_score={}, timeout={}s",
        config.policy.keyword_weight,
        config.policy.strength_threshold,
        config.policy.degraded_score,
        config.policy.analysis_timeout.as_secs()
    );

    // Build app state
    let state = AppState {
        invoker,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
