//! Axum route handlers for the utilization recommendation API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::recommend::service::{full_recommendation, single_recommendation, utilization_text};
use crate::search::handlers::FileNameQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataInfo {
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationRequest {
    pub data_info: DataInfo,
    /// Free-text analysis goal; for the single route this is the user's prompt.
    #[serde(default)]
    pub analysis_type: String,
}

#[derive(Debug, Serialize)]
pub struct TextRecommendationResponse {
    pub recommendations: String,
}

#[derive(Debug, Serialize)]
pub struct ListRecommendationResponse {
    pub recommendations: Vec<String>,
}

fn require_file_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("fileName must not be empty".to_string()));
    }
    Ok(name)
}

/// GET /api/data/utilization?fileName=
pub async fn handle_utilization(
    State(state): State<AppState>,
    Query(params): Query<FileNameQuery>,
) -> Result<Json<TextRecommendationResponse>, AppError> {
    let file_name = require_file_name(&params.file_name)?;
    let recommendations = utilization_text(
        state.repository.as_ref(),
        state.recommender.as_ref(),
        file_name,
    )
    .await?;
    Ok(Json(TextRecommendationResponse { recommendations }))
}

/// POST /api/data/utilization/single
pub async fn handle_single_utilization(
    State(state): State<AppState>,
    Json(req): Json<UtilizationRequest>,
) -> Result<Json<ListRecommendationResponse>, AppError> {
    let file_name = require_file_name(&req.data_info.file_name)?;
    let recommendations = single_recommendation(
        state.repository.as_ref(),
        state.recommender.as_ref(),
        file_name,
        req.analysis_type.trim(),
    )
    .await?;
    Ok(Json(ListRecommendationResponse { recommendations }))
}

/// POST /api/data/utilization/full
pub async fn handle_full_utilization(
    State(state): State<AppState>,
    Json(req): Json<UtilizationRequest>,
) -> Result<Json<Value>, AppError> {
    let file_name = require_file_name(&req.data_info.file_name)?;
    let analysis = Some(req.analysis_type.trim()).filter(|a| !a.is_empty());
    let report = full_recommendation(
        state.repository.as_ref(),
        state.recommender.as_ref(),
        file_name,
        analysis,
    )
    .await?;
    Ok(Json(report))
}
