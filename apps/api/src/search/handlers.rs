//! Axum route handlers for the chat prompt and dataset detail API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::search::detail::lookup_details_for_input;
use crate::search::pipeline::process_prompt;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub results: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNameQuery {
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub details: String,
}

/// POST /api/prompt
pub async fn handle_prompt(
    State(state): State<AppState>,
    Json(req): Json<PromptRequest>,
) -> Result<Json<PromptResponse>, AppError> {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::Validation("prompt must not be empty".to_string()));
    }

    let results = process_prompt(prompt, state.repository.as_ref(), state.planner.as_ref()).await;
    Ok(Json(PromptResponse { results }))
}

/// GET /api/data/details?fileName=
pub async fn handle_details(
    State(state): State<AppState>,
    Query(params): Query<FileNameQuery>,
) -> Result<Json<DetailsResponse>, AppError> {
    let file_name = params.file_name.trim();
    if file_name.is_empty() {
        return Err(AppError::Validation("fileName must not be empty".to_string()));
    }

    let details = lookup_details_for_input(state.repository.as_ref(), file_name).await?;
    Ok(Json(DetailsResponse { details }))
}
