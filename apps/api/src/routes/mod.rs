pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::recommend::handlers as recommend;
use crate::search::handlers as search;
use crate::state::AppState;

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat search
        .route("/api/prompt", post(search::handle_prompt))
        .route("/api/data/details", get(search::handle_details))
        // Utilization recommendations
        .route("/api/data/utilization", get(recommend::handle_utilization))
        .route(
            "/api/data/utilization/single",
            post(recommend::handle_single_utilization),
        )
        .route(
            "/api/data/utilization/full",
            post(recommend::handle_full_utilization),
        )
        .fallback(route_not_found)
        .with_state(state)
}
