mod catalog;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod recommend;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::postgres::PgCatalogRepository;
use crate::config::{Config, PlannerBackend};
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::recommend::LlmRecommender;
use crate::routes::build_router;
use crate::search::planner::{LlmQueryPlanner, QueryPlanner, RuleBasedPlanner};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.db_max_connections).await?;
    let repository = Arc::new(PgCatalogRepository::new(db));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let planner: Arc<dyn QueryPlanner> = match config.planner_backend {
        PlannerBackend::Rule => Arc::new(RuleBasedPlanner),
        PlannerBackend::Llm => Arc::new(LlmQueryPlanner(llm.clone())),
    };
    info!("Query planner: {}", config.planner_backend.as_str());

    let state = AppState {
        repository,
        planner,
        recommender: Arc::new(LlmRecommender(llm)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
