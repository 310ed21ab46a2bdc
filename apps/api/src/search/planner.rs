//! Query Planner: turns a search prompt into `{major category, keywords, limit}`.
//!
//! Default: `RuleBasedPlanner` (local, deterministic).
//! Alternative: `LlmQueryPlanner` (generative AI through `LlmClient`).
//!
//! `AppState` holds an `Arc<dyn QueryPlanner>`, chosen at startup via `PLANNER_BACKEND`.
//! Both backends put region keywords first; the scorer treats `keywords[0]` as the
//! primary keyword.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, KOREAN_OUTPUT_INSTRUCTION};
use crate::llm_client::LlmClient;
use crate::search::prompts::{PLAN_PROMPT_TEMPLATE, PLAN_SYSTEM};
use crate::search::vocabulary::{
    fold_region_alias, is_region_keyword, COUNT_RE, GENERAL_CATEGORY, REGIONS,
};

pub const DEFAULT_LIMIT: usize = 12;
pub const MAX_LIMIT: usize = 30;

// ────────────────────────────────────────────────────────────────────────────
// Query plan
// ────────────────────────────────────────────────────────────────────────────

/// Structured search request. Built once per prompt and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPlan {
    #[serde(default)]
    pub major_category: Option<String>,
    /// Ordered; the first keyword is the primary keyword.
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl QueryPlan {
    /// Trims keywords, drops blanks and later duplicates, and blanks out an
    /// empty category.
    pub fn new(major_category: Option<String>, keywords: Vec<String>, limit: Option<usize>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let keywords = keywords
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .filter(|k| seen.insert(k.clone()))
            .collect();

        Self {
            major_category: major_category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            keywords,
            limit,
        }
    }

    /// The category to filter by, or `None` when filtering is disabled.
    pub fn category_filter(&self) -> Option<&str> {
        self.major_category
            .as_deref()
            .filter(|c| *c != GENERAL_CATEGORY)
    }

    pub fn primary_keyword(&self) -> Option<&str> {
        self.keywords.first().map(String::as_str)
    }

    /// Stable partition moving region keywords ahead of the rest.
    fn regions_first(mut self) -> Self {
        let (mut regions, rest): (Vec<String>, Vec<String>) = self
            .keywords
            .into_iter()
            .partition(|k| is_region_keyword(k));
        regions.extend(rest);
        self.keywords = regions;
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Limit resolution
// ────────────────────────────────────────────────────────────────────────────

/// The count the prompt asks for (`"5개"` → 5), capped at `MAX_LIMIT`.
pub fn explicit_count(prompt: &str) -> Option<usize> {
    let caps = COUNT_RE.captures(prompt)?;
    // digits only, so a parse failure means overflow
    let count = caps[1].parse::<usize>().unwrap_or(MAX_LIMIT);
    Some(count.min(MAX_LIMIT))
}

/// `explicit_count`, or `DEFAULT_LIMIT` when the prompt has no count.
pub fn extract_count_from_prompt(prompt: &str) -> usize {
    explicit_count(prompt).unwrap_or(DEFAULT_LIMIT)
}

/// Combines the prompt's own count with the planner's suggestion: the smaller
/// wins when both exist. A zero plan limit counts as absent.
pub fn resolve_limit(prompt: &str, plan_limit: Option<usize>) -> usize {
    match plan_limit.filter(|l| *l > 0).map(|l| l.min(MAX_LIMIT)) {
        Some(plan) => explicit_count(prompt).map_or(plan, |count| count.min(plan)),
        None => extract_count_from_prompt(prompt),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait QueryPlanner: Send + Sync {
    async fn plan(&self, prompt: &str) -> Result<QueryPlan, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedPlanner
// ────────────────────────────────────────────────────────────────────────────

/// Category triggers, checked in order against each keyword. Each label is a
/// substring of a catalog classification name (`교통물류`, `농축수산`,
/// `정보통신`, ...).
const CATEGORY_TRIGGERS: &[(&str, &[&str])] = &[
    ("교통", &["교통", "버스", "지하철", "도로", "주차", "철도", "택시"]),
    ("환경", &["환경", "대기", "수질", "폐기물", "오염", "미세먼지"]),
    ("교육", &["교육", "학교", "학습", "대학", "도서관"]),
    ("문화", &["문화", "관광", "축제", "공연", "예술", "체육"]),
    ("복지", &["복지", "노인", "장애인", "아동", "보육"]),
    ("보건", &["보건", "의료", "병원", "건강", "약국"]),
    ("국토", &["국토", "도시", "토지", "건축", "주택", "재개발"]),
    ("안전", &["안전", "재난", "재해", "소방", "범죄"]),
    ("농축수산", &["농업", "농림", "농산", "축산", "수산", "임업", "어업"]),
    ("산업", &["산업", "경제", "기업", "고용", "일자리"]),
    ("재정", &["재정", "세금", "예산", "금융"]),
    ("정보통신", &["통신", "인터넷", "와이파이", "방송"]),
    ("과학", &["과학", "기술"]),
];

/// Filler tokens that never become keywords.
const STOP_WORDS: &[&str] = &[
    "데이터", "자료", "정보", "관련", "관련된", "목록", "리스트", "파일", "공공데이터", "좀", "대한",
    "대해", "있는", "주세요", "해줘", "싶어", "개",
];

/// Request verbs; any token starting with one is dropped.
const VERB_STEMS: &[&str] = &["보여", "찾아", "알려", "제공", "검색", "추천", "원해"];

/// Trailing particles, longest first. Endings that also close common nouns
/// (`도`, `이`, `가`, `로`, `과`, ...) are left alone.
const PARTICLES: &[&str] = &["에서", "으로", "에게", "은", "는", "을", "를", "의"];

/// Local planner: tokenizes the prompt, drops filler, folds region aliases and
/// maps trigger words to a category.
pub struct RuleBasedPlanner;

#[async_trait]
impl QueryPlanner for RuleBasedPlanner {
    async fn plan(&self, prompt: &str) -> Result<QueryPlan, AppError> {
        Ok(plan_locally(prompt))
    }
}

fn plan_locally(prompt: &str) -> QueryPlan {
    let mut keywords: Vec<String> = prompt
        .split(|c: char| c.is_whitespace() || (c.is_ascii_punctuation() && c != '_'))
        .filter(|t| !t.is_empty())
        .filter(|t| !COUNT_RE.is_match(t))
        .filter_map(normalize_token)
        .collect();

    if keywords.is_empty() && !prompt.trim().is_empty() {
        keywords.push(prompt.trim().to_string());
    }

    let major_category = detect_category(&keywords).map(str::to_string);
    let plan = QueryPlan::new(major_category, keywords, explicit_count(prompt)).regions_first();
    info!(
        "Rule-based plan: category={:?} keywords={:?} limit={:?}",
        plan.major_category, plan.keywords, plan.limit
    );
    plan
}

/// Folds region aliases, strips one trailing particle, and rejects filler.
fn normalize_token(token: &str) -> Option<String> {
    if let Some(region) = fold_region_alias(token) {
        return Some(region.to_string());
    }

    let token = strip_particle(token);
    if let Some(region) = fold_region_alias(token) {
        return Some(region.to_string());
    }

    if STOP_WORDS.contains(&token) || VERB_STEMS.iter().any(|v| token.starts_with(v)) {
        return None;
    }
    Some(token.to_string())
}

/// Strips one particle, keeping at least two characters.
fn strip_particle(token: &str) -> &str {
    if token.chars().count() <= 2 {
        return token;
    }
    PARTICLES
        .iter()
        .find_map(|p| token.strip_suffix(p))
        .filter(|stem| stem.chars().count() >= 2)
        .unwrap_or(token)
}

fn detect_category(keywords: &[String]) -> Option<&'static str> {
    keywords
        .iter()
        .filter(|k| !is_region_keyword(k))
        .find_map(|keyword| {
            CATEGORY_TRIGGERS
                .iter()
                .find(|(_, triggers)| triggers.iter().any(|t| keyword.contains(t)))
                .map(|(category, _)| *category)
        })
}

// ────────────────────────────────────────────────────────────────────────────
// LlmQueryPlanner
// ────────────────────────────────────────────────────────────────────────────

/// Generative-AI planner. The model's plan is normalized the same way as the
/// local one.
pub struct LlmQueryPlanner(pub LlmClient);

#[async_trait]
impl QueryPlanner for LlmQueryPlanner {
    async fn plan(&self, prompt: &str) -> Result<QueryPlan, AppError> {
        let categories: Vec<&str> = CATEGORY_TRIGGERS.iter().map(|(c, _)| *c).collect();
        let request = PLAN_PROMPT_TEMPLATE
            .replace("{regions}", &REGIONS.join(", "))
            .replace("{categories}", &categories.join(", "))
            .replace("{prompt}", prompt);
        let system = format!("{PLAN_SYSTEM} {KOREAN_OUTPUT_INSTRUCTION} {JSON_ONLY_SYSTEM}");

        let raw = self
            .0
            .call_json::<QueryPlan>(&request, &system)
            .await
            .map_err(|e| AppError::Llm(format!("query planning failed: {e}")))?;

        let keywords = raw
            .keywords
            .into_iter()
            .map(|k| match fold_region_alias(k.trim()) {
                Some(region) => region.to_string(),
                None => k,
            })
            .collect();
        let plan = QueryPlan::new(raw.major_category, keywords, raw.limit).regions_first();
        if plan.keywords.is_empty() {
            return Err(AppError::Llm("query planner returned no keywords".to_string()));
        }

        info!(
            "LLM plan: category={:?} keywords={:?} limit={:?}",
            plan.major_category, plan.keywords, plan.limit
        );
        Ok(plan)
    }
}
