use std::sync::Arc;

use crate::catalog::CatalogRepository;
use crate::config::Config;
use crate::recommend::Recommender;
use crate::search::planner::QueryPlanner;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn CatalogRepository>,
    /// Rule-based by default; swap via PLANNER_BACKEND.
    pub planner: Arc<dyn QueryPlanner>,
    pub recommender: Arc<dyn Recommender>,
    pub config: Config,
}
