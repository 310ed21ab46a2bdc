//! Prompt pipeline: classify, then run the detail flow or the search flow.
//!
//! Flow: is_detail_request → extract_file_name → lookup_details
//!   or: planner.plan → collect_candidates → rank → assemble_results.
//!
//! Local failures (one keyword, one record) are absorbed further down. Anything
//! that still escapes here becomes `PIPELINE_ERROR_MESSAGE`.

use chrono::{Local, NaiveDateTime};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::catalog::CatalogRepository;
use crate::errors::AppError;
use crate::search::assembly::assemble_results;
use crate::search::classifier::is_detail_request;
use crate::search::detail::lookup_details;
use crate::search::executor::collect_candidates;
use crate::search::filename::extract_file_name;
use crate::search::planner::{resolve_limit, QueryPlanner};
use crate::search::scoring::{rank, ScoringContext};

pub const PIPELINE_ERROR_MESSAGE: &str = "데이터를 조회하는 중 오류가 발생했습니다.";
pub const MISSING_FILE_NAME_MESSAGE: &str =
    "❌ 파일명을 찾을 수 없습니다. 정확한 파일명을 입력해주세요.";

const LOGGED_TOP_RESULTS: usize = 5;

/// Answers one chat prompt against the catalog using the wall clock.
pub async fn process_prompt(
    prompt: &str,
    repo: &dyn CatalogRepository,
    planner: &dyn QueryPlanner,
) -> Vec<String> {
    process_prompt_at(prompt, repo, planner, Local::now().naive_local()).await
}

/// Same as `process_prompt` with an explicit clock for the recency bonus.
pub async fn process_prompt_at(
    prompt: &str,
    repo: &dyn CatalogRepository,
    planner: &dyn QueryPlanner,
    now: NaiveDateTime,
) -> Vec<String> {
    let span = info_span!("prompt", request_id = %Uuid::new_v4());
    async move {
        info!("Processing prompt: '{prompt}'");

        let outcome = if is_detail_request(prompt) {
            info!("Classified as detail request");
            run_detail(prompt, repo).await
        } else {
            info!("Classified as search request");
            run_search(prompt, repo, planner, now).await
        };

        outcome.unwrap_or_else(|e| {
            warn!("Prompt pipeline failed: {e}");
            vec![PIPELINE_ERROR_MESSAGE.to_string()]
        })
    }
    .instrument(span)
    .await
}

async fn run_detail(prompt: &str, repo: &dyn CatalogRepository) -> Result<Vec<String>, AppError> {
    let file_name = extract_file_name(prompt);
    if file_name.is_empty() {
        return Ok(vec![MISSING_FILE_NAME_MESSAGE.to_string()]);
    }

    let details = lookup_details(repo, &file_name).await?;
    info!("Detail report: {} chars", details.chars().count());
    Ok(vec![details])
}

async fn run_search(
    prompt: &str,
    repo: &dyn CatalogRepository,
    planner: &dyn QueryPlanner,
    now: NaiveDateTime,
) -> Result<Vec<String>, AppError> {
    let plan = planner.plan(prompt).await?;
    let limit = resolve_limit(prompt, plan.limit);
    info!(
        "Plan: category={:?} keywords={:?} primary={:?} limit={limit}",
        plan.major_category,
        plan.keywords,
        plan.primary_keyword()
    );

    let candidates = collect_candidates(repo, &plan).await;
    let ctx = ScoringContext::new(&plan.keywords, prompt, now);
    let ranked = rank(candidates, &ctx);

    for candidate in ranked.iter().take(LOGGED_TOP_RESULTS) {
        info!(
            "Top result: {:?} (score {})",
            candidate.dataset.name(),
            candidate.score
        );
    }

    Ok(assemble_results(&ranked, &plan, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::catalog::memory::{dataset, InMemoryCatalog};
    use crate::models::dataset::Dataset;
    use crate::search::assembly::DETAIL_HINT_LINES;
    use crate::search::planner::{QueryPlan, RuleBasedPlanner};

    struct FixedPlanner(QueryPlan);

    #[async_trait]
    impl QueryPlanner for FixedPlanner {
        async fn plan(&self, _prompt: &str) -> Result<QueryPlan, AppError> {
            Ok(self.0.clone())
        }
    }

    struct FailingPlanner;

    #[async_trait]
    impl QueryPlanner for FailingPlanner {
        async fn plan(&self, _prompt: &str) -> Result<QueryPlan, AppError> {
            Err(AppError::Llm("planner unavailable".to_string()))
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn traffic(id: i64, name: &str, provider: &str) -> Dataset {
        Dataset {
            provider_agency: Some(provider.to_string()),
            classification_system: Some("교통및물류".to_string()),
            title: Some("교통 현황".to_string()),
            ..dataset(id, name)
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            traffic(1, "부산 교통량_20230101", "부산광역시"),
            traffic(2, "교통사고 통계_20230101", "한국도로교통공단"),
            traffic(3, "서울 교통량_20230101", "서울특별시"),
            traffic(4, "서울 버스노선_20230101", "서울특별시"),
            traffic(5, "대전 교통_20230101", "대전광역시"),
            traffic(6, "인천 교통_20230101", "인천광역시"),
        ])
    }

    #[tokio::test]
    async fn test_seoul_traffic_search_ranks_seoul_first() {
        let repo = catalog();
        let planner = FixedPlanner(QueryPlan::new(
            Some("교통".into()),
            vec!["서울".into(), "교통".into()],
            None,
        ));

        let results = process_prompt_at("서울 교통 데이터 5개", &repo, &planner, now()).await;

        assert_eq!(results.len(), 5 + DETAIL_HINT_LINES.len());
        assert!(results[0].starts_with("서울"));
        assert!(results[1].starts_with("서울"));
        assert!(results[2].starts_with("교통사고"));
        assert!(!results.iter().any(|r| r.starts_with("인천")));
    }

    #[tokio::test]
    async fn test_plan_limit_caps_prompt_count() {
        let repo = catalog();
        let planner = FixedPlanner(QueryPlan::new(None, vec!["교통".into()], Some(2)));

        let results = process_prompt_at("교통 데이터 5개", &repo, &planner, now()).await;

        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_detail_prompt_returns_report() {
        let repo = InMemoryCatalog::new(vec![dataset(1, "XYZ_20230101")]);
        let results = process_prompt_at("XYZ_20230101 상세정보", &repo, &FailingPlanner, now()).await;

        assert_eq!(results.len(), 1);
        assert!(results[0].contains("📄 파일명: XYZ_20230101"));
        assert!(results[0].contains("🏢 제공기관: 정보 없음"));
    }

    #[tokio::test]
    async fn test_detail_prompt_without_name() {
        let repo = InMemoryCatalog::new(vec![]);
        let results = process_prompt_at("상세정보", &repo, &FailingPlanner, now()).await;
        assert_eq!(results, vec![MISSING_FILE_NAME_MESSAGE]);
    }

    #[tokio::test]
    async fn test_empty_region_search() {
        let repo = InMemoryCatalog::new(vec![]);
        let planner = FixedPlanner(QueryPlan::new(
            Some("문화".into()),
            vec!["제주".into(), "관광".into()],
            None,
        ));

        let results = process_prompt_at("제주 관광", &repo, &planner, now()).await;

        assert_eq!(results.len(), 3);
        assert!(results[0].contains("제주"));
    }

    #[tokio::test]
    async fn test_planner_failure_returns_fixed_message() {
        let repo = catalog();
        let results = process_prompt_at("서울 교통", &repo, &FailingPlanner, now()).await;
        assert_eq!(results, vec![PIPELINE_ERROR_MESSAGE]);
    }

    #[tokio::test]
    async fn test_farming_prompt_keeps_matching_classification() {
        let repo = InMemoryCatalog::new(vec![Dataset {
            title: Some("농업 생산 통계".to_string()),
            classification_system: Some("농축수산 - 농업·농촌".to_string()),
            ..dataset(1, "경북 농업 통계_20240101")
        }]);

        let results = process_prompt_at("농업 통계", &repo, &RuleBasedPlanner, now()).await;

        assert_eq!(results, vec!["경북 농업 통계_20240101"]);
    }

    #[tokio::test]
    async fn test_search_is_idempotent() {
        let repo = catalog();
        let first = process_prompt_at("서울 교통 데이터", &repo, &RuleBasedPlanner, now()).await;
        let second = process_prompt_at("서울 교통 데이터", &repo, &RuleBasedPlanner, now()).await;
        assert_eq!(first, second);
        assert!(first[0].starts_with("서울"));
    }
}
