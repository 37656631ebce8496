mod authenticity;
mod config;
mod documents;
mod errors;
mod matching;
mod nlp;
mod parsing;
mod routes;
mod staging;
mod state;
mod vocabulary;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::nlp::RuleBasedModel;
use crate::routes::build_router;
use crate::state::AppState;
use crate::vocabulary::Vocabulary;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    tokio::fs::create_dir_all(&config.staging_dir)
        .await
        .with_context(|| format!("creating staging dir {}", config.staging_dir.display()))?;

    // Local language model shared by parser, matcher and checker
    let model = Arc::new(RuleBasedModel::new());
    let vocabulary = Vocabulary::default();

    let state = AppState::new(config.clone(), model, &vocabulary);
    info!(
        "Pipeline ready (threshold: {}, strategy: {}, detector: {}, staging: {})",
        state.engine.threshold(),
        state.engine.strategy(),
        state.checker.detector_backend(),
        state.staging.root().display()
    );

    // Build router
    let app = build_router(state)
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
