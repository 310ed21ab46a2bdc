//! Turns ranked candidates into the chat response lines.

use crate::search::planner::QueryPlan;
use crate::search::scoring::ScoredCandidate;
use crate::search::vocabulary::{first_region, GENERAL_CATEGORY};

pub const NO_MATCH_MESSAGE: &str = "해당 조건에 맞는 데이터를 찾을 수 없습니다.";

/// Appended when the list is long enough that the user may want one item's details.
pub const DETAIL_HINT_LINES: [&str; 2] = [
    "💡 특정 데이터에 대한 자세한 정보가 필요하시면",
    "'[파일명] 상세정보' 또는 '[파일명] 자세히'라고 말씀하세요.",
];
const MIN_RESULTS_FOR_HINT: usize = 3;

/// Three-line answer for a region with no matching data.
pub fn insufficient_region_message(region: &str, category: &str) -> Vec<String> {
    vec![
        format!("해당 지역({region})의 데이터가 부족합니다."),
        "다른 지역의 유사한 데이터를 참고하거나".to_string(),
        format!("상위 카테고리({category})로 검색해보세요."),
    ]
}

pub fn assemble_results(ranked: &[ScoredCandidate], plan: &QueryPlan, limit: usize) -> Vec<String> {
    if ranked.is_empty() {
        return match first_region(&plan.keywords) {
            Some(region) => insufficient_region_message(
                region,
                plan.major_category.as_deref().unwrap_or(GENERAL_CATEGORY),
            ),
            None => vec![NO_MATCH_MESSAGE.to_string()],
        };
    }

    let mut results: Vec<String> = ranked
        .iter()
        .filter_map(|c| c.dataset.name())
        .take(limit)
        .map(str::to_string)
        .collect();

    if results.len() >= MIN_RESULTS_FOR_HINT {
        results.extend(DETAIL_HINT_LINES.iter().map(|s| s.to_string()));
    }
    results
}
