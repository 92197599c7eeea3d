mod config;
mod errors;
mod gap;
mod llm_client;
mod models;
mod plan;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::gap::analyzer::GapThresholds;
use crate::gap::extractor::{LlmExtractor, SkillExtractor, TaxonomyExtractor};
use crate::gap::pipeline::{EngineSettings, SkillGapEngine};
use crate::gap::similarity::CatalogSimilarity;
use crate::llm_client::LlmClient;
use crate::plan::learning_time::LearningTimeCatalog;
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting skill-gap API v{}", env!("CARGO_PKG_VERSION"));

    let extractor = build_extractor(&config)?;
    info!("Skill extractor initialized (backend: {})", extractor.backend());

    let settings = EngineSettings {
        thresholds: GapThresholds {
            similarity: config.similarity_threshold,
            relatedness: config.relatedness_threshold,
        },
        critical_threshold: config.critical_importance_threshold,
    };
    info!(
        similarity = settings.thresholds.similarity,
        relatedness = settings.thresholds.relatedness,
        critical = settings.critical_threshold,
        default_timeframe_weeks = config.default_timeframe_weeks,
        "Engine thresholds"
    );

    let engine = SkillGapEngine::new(
        extractor,
        Arc::new(CatalogSimilarity),
        Arc::new(LearningTimeCatalog),
        settings,
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        engine,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// LLM extraction when enabled, otherwise the local taxonomy scan.
fn build_extractor(config: &Config) -> Result<Arc<dyn SkillExtractor>> {
    match (&config.anthropic_api_key, config.enable_llm_extraction) {
        (Some(api_key), true) => {
            let llm = LlmClient::new(api_key.clone()).context("Failed to build LLM client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Ok(Arc::new(LlmExtractor(llm)))
        }
        _ => Ok(Arc::new(TaxonomyExtractor)),
    }
}
