//! Recommendation flows behind the utilization routes.
//!
//! The AI backend is optional at runtime: a failing recommender degrades to a
//! static report instead of failing the request. Repository errors still
//! propagate.

use serde_json::{json, Value};
use tracing::{error, info};

use crate::catalog::CatalogRepository;
use crate::errors::AppError;
use crate::models::dataset::Dataset;
use crate::recommend::{Recommender, UtilizationReport};
use crate::search::detail::{find_dataset, not_found_message};

pub const SINGLE_FAILURE_MESSAGE: &str = "단일 활용 방안을 가져오는 데 실패했습니다.";
const EMPTY_SECTION_ITEM: &str = "관련 데이터 없음";
const HEADER_RULE_WIDTH: usize = 50;

const BUSINESS_TITLE: &str = "🏢 비즈니스 활용 방안";
const RESEARCH_TITLE: &str = "🔬 연구 활용 방안";
const POLICY_TITLE: &str = "🏛️ 정책 활용 방안";
const COMBINATION_TITLE: &str = "🔗 데이터 결합 제안";
const TOOLS_TITLE: &str = "🛠️ 추천 분석 도구";

const ENVIRONMENT_BUSINESS: [&str; 3] = [
    "환경 컨설팅 서비스 개발",
    "환경 모니터링 솔루션 구축",
    "친환경 제품 개발 근거 자료",
];
const TRAFFIC_BUSINESS: [&str; 3] = [
    "교통 최적화 서비스 개발",
    "스마트 시티 솔루션 구축",
    "교통 안전 컨설팅 서비스",
];
const GENERAL_BUSINESS: [&str; 3] = [
    "데이터 기반 서비스 개발",
    "관련 분야 컨설팅 서비스",
    "정부 사업 입찰 시 활용",
];
const FALLBACK_RESEARCH: [&str; 3] = [
    "현황 분석 및 트렌드 연구",
    "정책 효과성 분석 연구",
    "지역별 비교 연구",
];
const FALLBACK_POLICY: [&str; 3] = [
    "정책 수립 근거 자료로 활용",
    "예산 배분 참고 자료",
    "성과 평가 지표 개발",
];
const FALLBACK_COMBINATION: [&str; 3] = [
    "인구 통계 데이터와 결합",
    "경제 지표와 상관관계 분석",
    "지리 정보와 공간 분석",
];
const FALLBACK_TOOLS: [&str; 3] = [
    "Excel 및 Google Sheets",
    "Python pandas 및 matplotlib",
    "R 통계 분석 및 시각화",
];

/// Text report for `file_name`: exact match, else the closest partial match.
pub async fn utilization_text(
    repo: &dyn CatalogRepository,
    recommender: &dyn Recommender,
    file_name: &str,
) -> Result<String, AppError> {
    info!("Utilization report requested for '{file_name}'");
    let Some(dataset) = find_dataset(repo, file_name).await? else {
        return Ok(not_found_message(file_name));
    };

    Ok(match recommender.recommend(&dataset, None).await {
        Ok(report) => render_report(&report),
        Err(e) => {
            error!("Utilization report failed for {:?}: {e}", dataset.name());
            fallback_report_text(&dataset)
        }
    })
}

/// Answers one free-text request about an exactly named dataset.
pub async fn single_recommendation(
    repo: &dyn CatalogRepository,
    recommender: &dyn Recommender,
    file_name: &str,
    user_prompt: &str,
) -> Result<Vec<String>, AppError> {
    info!("Single recommendation for '{file_name}': '{user_prompt}'");
    let Some(dataset) = repo.find_by_file_data_name(file_name).await? else {
        return Ok(vec![not_found_message(file_name)]);
    };

    Ok(match recommender.recommend_single(&dataset, user_prompt).await {
        Ok(items) => items,
        Err(e) => {
            error!("Single recommendation failed for '{file_name}': {e}");
            vec![SINGLE_FAILURE_MESSAGE.to_string()]
        }
    })
}

/// Structured report as `{"success": true, "data": {...}}`, or
/// `{"error": ...}` when the dataset does not exist.
pub async fn full_recommendation(
    repo: &dyn CatalogRepository,
    recommender: &dyn Recommender,
    file_name: &str,
    analysis: Option<&str>,
) -> Result<Value, AppError> {
    info!("Full recommendation for '{file_name}'");
    let Some(dataset) = repo.find_by_file_data_name(file_name).await? else {
        return Ok(json!({ "error": format!("파일을 찾을 수 없습니다: {file_name}") }));
    };

    let report = match recommender.recommend(&dataset, analysis).await {
        Ok(report) => report,
        Err(e) => {
            error!("Full recommendation failed for '{file_name}': {e}");
            default_full_report()
        }
    };
    Ok(json!({ "success": true, "data": report }))
}

/// Business, research and policy sections of an AI report.
pub fn render_report(report: &UtilizationReport) -> String {
    let mut out = report_header();
    push_section(&mut out, BUSINESS_TITLE, &report.business_applications);
    push_section(&mut out, RESEARCH_TITLE, &report.research_applications);
    push_section(&mut out, POLICY_TITLE, &report.policy_applications);
    out
}

/// Static report used when the recommender is unavailable. Business ideas
/// depend on the dataset's classification.
pub fn fallback_report_text(dataset: &Dataset) -> String {
    let classification = Dataset::lowered(&dataset.classification_system);
    let business = if classification.contains("환경") {
        ENVIRONMENT_BUSINESS
    } else if classification.contains("교통") {
        TRAFFIC_BUSINESS
    } else {
        GENERAL_BUSINESS
    };

    let mut out = report_header();
    push_section(&mut out, BUSINESS_TITLE, &business);
    push_section(&mut out, RESEARCH_TITLE, &FALLBACK_RESEARCH);
    push_section(&mut out, POLICY_TITLE, &FALLBACK_POLICY);
    push_section(&mut out, COMBINATION_TITLE, &FALLBACK_COMBINATION);
    push_section(&mut out, TOOLS_TITLE, &FALLBACK_TOOLS);
    // last section carries no blank separator
    out.truncate(out.trim_end_matches('\n').len() + 1);
    out
}

/// Structured counterpart of the fallback text for the JSON route.
pub fn default_full_report() -> UtilizationReport {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    UtilizationReport {
        business_applications: owned(&[
            "데이터 기반 비즈니스 서비스 개발",
            "관련 분야 컨설팅 사업",
            "정부 사업 입찰 참여",
        ]),
        research_applications: owned(&[
            "현황 분석 및 트렌드 연구",
            "정책 효과성 분석",
            "지역별 비교 연구",
        ]),
        policy_applications: owned(&["정책 수립 근거 자료", "예산 배분 참고", "성과 평가 지표"]),
        combination_suggestions: owned(&["인구 통계 데이터", "경제 지표 데이터", "지리 정보 데이터"]),
        analysis_tools: owned(&["Excel/Google Sheets", "Python pandas", "R 통계 분석"]),
    }
}

fn report_header() -> String {
    format!("💡 데이터 활용 추천\n{}\n\n", "═".repeat(HEADER_RULE_WIDTH))
}

fn push_section<S: AsRef<str>>(out: &mut String, title: &str, items: &[S]) {
    out.push_str(title);
    out.push_str(":\n");
    if items.is_empty() {
        out.push_str(&format!("  • {EMPTY_SECTION_ITEM}\n"));
    }
    for item in items {
        out.push_str(&format!("  • {}\n", item.as_ref()));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::catalog::memory::{dataset, InMemoryCatalog};

    /// Returns canned answers, or fails every call when `fail` is set.
    #[derive(Default)]
    struct FakeRecommender {
        fail: bool,
        report: UtilizationReport,
        analyses: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl Recommender for FakeRecommender {
        async fn recommend(
            &self,
            _dataset: &Dataset,
            analysis: Option<&str>,
        ) -> Result<UtilizationReport, AppError> {
            self.analyses
                .lock()
                .unwrap()
                .push(analysis.map(str::to_string));
            if self.fail {
                return Err(AppError::Llm("down".to_string()));
            }
            Ok(self.report.clone())
        }

        async fn recommend_single(
            &self,
            dataset: &Dataset,
            user_prompt: &str,
        ) -> Result<Vec<String>, AppError> {
            if self.fail {
                return Err(AppError::Llm("down".to_string()));
            }
            Ok(vec![format!("{:?}: {user_prompt}", dataset.name())])
        }
    }

    fn failing() -> FakeRecommender {
        FakeRecommender {
            fail: true,
            ..Default::default()
        }
    }

    fn classified(id: i64, name: &str, classification: &str) -> Dataset {
        Dataset {
            classification_system: Some(classification.to_string()),
            ..dataset(id, name)
        }
    }

    #[tokio::test]
    async fn test_utilization_text_renders_ai_report() {
        let repo = InMemoryCatalog::new(vec![dataset(1, "버스_20240101")]);
        let recommender = FakeRecommender {
            report: UtilizationReport {
                business_applications: vec!["노선 추천 앱".to_string()],
                research_applications: vec!["통행 패턴 분석".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };

        let text = utilization_text(&repo, &recommender, "버스_20240101").await.unwrap();

        assert!(text.starts_with("💡 데이터 활용 추천\n"));
        assert!(text.contains("🏢 비즈니스 활용 방안:\n  • 노선 추천 앱\n"));
        assert!(text.contains("🔬 연구 활용 방안:\n  • 통행 패턴 분석\n"));
        assert!(text.contains("🏛️ 정책 활용 방안:\n  • 관련 데이터 없음\n"));
        assert!(!text.contains(COMBINATION_TITLE));
    }

    #[tokio::test]
    async fn test_utilization_text_falls_back_by_category() {
        let repo = InMemoryCatalog::new(vec![
            classified(1, "대기질_20240101", "환경 - 대기"),
            classified(2, "버스_20240101", "교통및물류"),
            classified(3, "인구_20240101", "일반공공행정"),
        ]);
        let recommender = failing();

        let env = utilization_text(&repo, &recommender, "대기질_20240101").await.unwrap();
        let traffic = utilization_text(&repo, &recommender, "버스_20240101").await.unwrap();
        let general = utilization_text(&repo, &recommender, "인구_20240101").await.unwrap();

        assert!(env.contains("  • 환경 컨설팅 서비스 개발\n"));
        assert!(traffic.contains("  • 교통 최적화 서비스 개발\n"));
        assert!(general.contains("  • 데이터 기반 서비스 개발\n"));
        for text in [&env, &traffic, &general] {
            assert!(text.contains("🛠️ 추천 분석 도구:\n"));
            assert!(text.ends_with("  • R 통계 분석 및 시각화\n"));
        }
    }

    #[tokio::test]
    async fn test_utilization_text_uses_closest_partial_match() {
        let repo = InMemoryCatalog::new(vec![classified(1, "서울 버스노선_20240101", "교통및물류")]);
        let text = utilization_text(&repo, &failing(), "버스노선").await.unwrap();
        assert!(text.contains("교통 최적화 서비스 개발"));
    }

    #[tokio::test]
    async fn test_utilization_text_not_found() {
        let repo = InMemoryCatalog::new(vec![]);
        let text = utilization_text(&repo, &failing(), "없음").await.unwrap();
        assert_eq!(text, "❌ 해당 파일명을 찾을 수 없습니다: 없음");
    }

    #[tokio::test]
    async fn test_single_recommendation_paths() {
        let repo = InMemoryCatalog::new(vec![dataset(1, "버스_20240101")]);

        let ok = single_recommendation(&repo, &FakeRecommender::default(), "버스_20240101", "창업")
            .await
            .unwrap();
        assert_eq!(ok, vec!["Some(\"버스_20240101\"): 창업"]);

        let failed = single_recommendation(&repo, &failing(), "버스_20240101", "창업")
            .await
            .unwrap();
        assert_eq!(failed, vec![SINGLE_FAILURE_MESSAGE]);

        let missing = single_recommendation(&repo, &failing(), "버스", "창업")
            .await
            .unwrap();
        assert_eq!(missing, vec!["❌ 해당 파일명을 찾을 수 없습니다: 버스"]);
    }

    #[tokio::test]
    async fn test_full_recommendation_wraps_report() {
        let repo = InMemoryCatalog::new(vec![dataset(1, "버스_20240101")]);
        let recommender = FakeRecommender::default();

        let value = full_recommendation(&repo, &recommender, "버스_20240101", Some("수요 예측"))
            .await
            .unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["analysisTools"], json!([]));
        assert_eq!(
            *recommender.analyses.lock().unwrap(),
            vec![Some("수요 예측".to_string())]
        );
    }

    #[tokio::test]
    async fn test_full_recommendation_fallback_and_missing() {
        let repo = InMemoryCatalog::new(vec![dataset(1, "버스_20240101")]);

        let fallback = full_recommendation(&repo, &failing(), "버스_20240101", None)
            .await
            .unwrap();
        assert_eq!(fallback["success"], json!(true));
        assert_eq!(fallback["data"]["analysisTools"][0], json!("Excel/Google Sheets"));

        let missing = full_recommendation(&repo, &failing(), "버스", None).await.unwrap();
        assert_eq!(missing, json!({ "error": "파일을 찾을 수 없습니다: 버스" }));
    }
}
