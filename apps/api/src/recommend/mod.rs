// Utilization recommendations: how a dataset could be used for business,
// research and policy work.

pub mod handlers;
pub mod prompts;
pub mod service;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, KOREAN_OUTPUT_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::models::dataset::{Dataset, MISSING};
use crate::recommend::prompts::{RECOMMEND_SYSTEM, REPORT_PROMPT_TEMPLATE, SINGLE_PROMPT_TEMPLATE};

/// Structured recommendation report. Absent lists deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UtilizationReport {
    pub business_applications: Vec<String>,
    pub research_applications: Vec<String>,
    pub policy_applications: Vec<String>,
    pub combination_suggestions: Vec<String>,
    pub analysis_tools: Vec<String>,
}

/// Recommendation backend. Carried in `AppState` as `Arc<dyn Recommender>`.
#[async_trait]
pub trait Recommender: Send + Sync {
    /// Full report, optionally focused on one kind of analysis.
    async fn recommend(
        &self,
        dataset: &Dataset,
        analysis: Option<&str>,
    ) -> Result<UtilizationReport, AppError>;

    /// Short list answering one free-text user request.
    async fn recommend_single(
        &self,
        dataset: &Dataset,
        user_prompt: &str,
    ) -> Result<Vec<String>, AppError>;
}

/// Generative-AI recommender.
pub struct LlmRecommender(pub LlmClient);

#[async_trait]
impl Recommender for LlmRecommender {
    async fn recommend(
        &self,
        dataset: &Dataset,
        analysis: Option<&str>,
    ) -> Result<UtilizationReport, AppError> {
        let focus = analysis
            .map(|a| format!("- Focus every list on this kind of analysis: {a}"))
            .unwrap_or_default();
        let request = REPORT_PROMPT_TEMPLATE
            .replace("{focus}", &focus)
            .replace("{dataset}", &describe_dataset(dataset));

        let report: UtilizationReport = self
            .0
            .call_json(&request, &system_prompt())
            .await
            .map_err(|e| AppError::Llm(format!("utilization report failed: {e}")))?;
        info!(
            "Utilization report for {:?}: {} business, {} research, {} policy",
            dataset.name(),
            report.business_applications.len(),
            report.research_applications.len(),
            report.policy_applications.len()
        );
        Ok(report)
    }

    async fn recommend_single(
        &self,
        dataset: &Dataset,
        user_prompt: &str,
    ) -> Result<Vec<String>, AppError> {
        let request = SINGLE_PROMPT_TEMPLATE
            .replace("{request}", user_prompt)
            .replace("{dataset}", &describe_dataset(dataset));

        let items: Vec<String> = self
            .0
            .call_json(&request, &system_prompt())
            .await
            .map_err(|e| AppError::Llm(format!("single recommendation failed: {e}")))?;

        let items: Vec<String> = items
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();
        if items.is_empty() {
            return Err(AppError::Llm("single recommendation was empty".to_string()));
        }
        Ok(items)
    }
}

fn system_prompt() -> String {
    format!("{RECOMMEND_SYSTEM} {KOREAN_OUTPUT_INSTRUCTION} {JSON_ONLY_SYSTEM}")
}

/// Dataset metadata block embedded in recommendation prompts.
fn describe_dataset(dataset: &Dataset) -> String {
    let field = |value: &Option<String>| value.as_deref().unwrap_or(MISSING).to_string();
    format!(
        "파일명: {}\n제목: {}\n분류체계: {}\n제공기관: {}\n키워드: {}\n설명: {}",
        field(&dataset.file_data_name),
        field(&dataset.title),
        field(&dataset.classification_system),
        field(&dataset.provider_agency),
        field(&dataset.keywords),
        field(&dataset.description),
    )
}
