//! Relevance scoring: additive integer score of one dataset against the
//! planned keywords.
//!
//! Every signal is a case-insensitive substring test over one field. The
//! primary keyword (`keywords[0]`) earns an extra bonus that is larger when it
//! names a region, because regional queries are mostly answered by the
//! provider agency.

use std::cmp::Reverse;

use chrono::{Months, NaiveDateTime};
use tracing::debug;

use crate::models::dataset::Dataset;
use crate::search::vocabulary::{is_region_keyword, SPECIAL_TERMS};

// Per-keyword signals.
const PROVIDER_MATCH: i64 = 200;
const NAME_PREFIX: i64 = 150;
const TAG_EXACT: i64 = 100;
const TAG_SUBSTRING: i64 = 60;
const NAME_MATCH: i64 = 40;
const TITLE_MATCH: i64 = 25;
const DESCRIPTION_MATCH: i64 = 30;
const CLASSIFICATION_MATCH: i64 = 20;

// Whole-keyword-list signals.
const PHRASE_IN_DESCRIPTION: i64 = 50;
const SPECIAL_TERM: i64 = 25;
const KEYWORD_DENSITY: i64 = 20;
const DENSITY_THRESHOLD: usize = 2;
const RECENT_UPDATE: i64 = 20;

/// Primary-keyword bonuses: (provider, name prefix, name contains, description).
const PRIMARY_REGION: PrimaryBonus = PrimaryBonus {
    provider: 100,
    name_prefix: 80,
    name: 50,
    description: 40,
};
const PRIMARY_OTHER: PrimaryBonus = PrimaryBonus {
    provider: 30,
    name_prefix: 0,
    name: 20,
    description: 25,
};

struct PrimaryBonus {
    provider: i64,
    name_prefix: i64,
    name: i64,
    description: i64,
}

/// Keyword-derived values shared by every candidate of one request.
pub struct ScoringContext<'a> {
    keywords: Vec<String>,
    phrase: Option<String>,
    primary: Option<(String, bool)>,
    recency_cutoff: Option<NaiveDateTime>,
    prompt: &'a str,
}

impl<'a> ScoringContext<'a> {
    /// `now` is the clock used for the recency bonus.
    pub fn new(keywords: &[String], prompt: &'a str, now: NaiveDateTime) -> Self {
        let lowered: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let phrase = (keywords.len() >= 2).then(|| lowered.join(" "));
        let primary = keywords
            .first()
            .map(|k| (k.to_lowercase(), is_region_keyword(k)));

        Self {
            keywords: lowered,
            phrase,
            primary,
            recency_cutoff: now.checked_sub_months(Months::new(12)),
            prompt,
        }
    }
}

/// A dataset paired with its score for one request.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub dataset: Dataset,
    pub score: u32,
}

/// Scores every candidate once, then orders by descending score. Equal scores
/// keep their incoming order.
pub fn rank(candidates: Vec<Dataset>, ctx: &ScoringContext<'_>) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|dataset| {
            let score = relevance_score(&dataset, ctx);
            ScoredCandidate { dataset, score }
        })
        .collect();

    // sort_by_key is stable
    scored.sort_by_key(|c| Reverse(c.score));
    debug!("Ranked {} candidates for prompt '{}'", scored.len(), ctx.prompt);
    scored
}

pub fn relevance_score(dataset: &Dataset, ctx: &ScoringContext<'_>) -> u32 {
    let name = Dataset::lowered(&dataset.file_data_name);
    let tags = Dataset::lowered(&dataset.keywords);
    let title = Dataset::lowered(&dataset.title);
    let provider = Dataset::lowered(&dataset.provider_agency);
    let description = Dataset::lowered(&dataset.description);
    let classification = Dataset::lowered(&dataset.classification_system);

    let mut score: i64 = 0;

    for keyword in &ctx.keywords {
        if provider.contains(keyword.as_str()) {
            score += PROVIDER_MATCH;
        }
        if name.starts_with(keyword.as_str()) {
            score += NAME_PREFIX;
        }
        if is_exact_tag(&tags, keyword) {
            score += TAG_EXACT;
        } else if tags.contains(keyword.as_str()) {
            score += TAG_SUBSTRING;
        }
        if name.contains(keyword.as_str()) {
            score += NAME_MATCH;
        }
        if title.contains(keyword.as_str()) {
            score += TITLE_MATCH;
        }
        if description.contains(keyword.as_str()) {
            score += DESCRIPTION_MATCH;
        }
        if classification.contains(keyword.as_str()) {
            score += CLASSIFICATION_MATCH;
        }
    }

    if let Some(phrase) = &ctx.phrase {
        if description.contains(phrase.as_str()) {
            score += PHRASE_IN_DESCRIPTION;
        }
    }

    if let Some((primary, is_region)) = &ctx.primary {
        let bonus = if *is_region {
            &PRIMARY_REGION
        } else {
            &PRIMARY_OTHER
        };
        if provider.contains(primary.as_str()) {
            score += bonus.provider;
        }
        if name.starts_with(primary.as_str()) {
            score += bonus.name_prefix;
        }
        if name.contains(primary.as_str()) {
            score += bonus.name;
        }
        if description.contains(primary.as_str()) {
            score += bonus.description;
        }
    }

    score += description_bonus(&description, &ctx.keywords);

    if let (Some(modified), Some(cutoff)) = (dataset.modified_date, ctx.recency_cutoff) {
        if modified > cutoff {
            score += RECENT_UPDATE;
        }
    }

    u32::try_from(score.max(0)).unwrap_or(u32::MAX)
}

/// True when one comma-separated tag equals the keyword.
fn is_exact_tag(tags: &str, keyword: &str) -> bool {
    tags.split(',').any(|tag| tag.trim() == keyword)
}

/// Glossary terms plus the keyword-density bonus. Expects lower-cased input.
fn description_bonus(description: &str, keywords: &[String]) -> i64 {
    if description.is_empty() {
        return 0;
    }

    let terms = SPECIAL_TERMS
        .iter()
        .filter(|term| description.contains(*term))
        .count() as i64;

    let occurrences: usize = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .map(|k| description.matches(k.as_str()).count())
        .sum();

    let density = if occurrences > DENSITY_THRESHOLD {
        KEYWORD_DENSITY
    } else {
        0
    };

    terms * SPECIAL_TERM + density
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::dataset;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn score(ds: &Dataset, kws: &[&str]) -> u32 {
        let kws = keywords(kws);
        relevance_score(ds, &ScoringContext::new(&kws, "", now()))
    }

    #[test]
    fn test_empty_record_scores_zero() {
        assert_eq!(score(&dataset(1, "무관_20200101"), &["서울"]), 0);
        assert_eq!(score(&dataset(1, "무관_20200101"), &[]), 0);
    }

    #[test]
    fn test_region_primary_provider_match() {
        let mut ds = dataset(1, "X_20200101");
        ds.provider_agency = Some("서울특별시".to_string());
        // per-keyword provider 200 + primary region provider 100
        assert_eq!(score(&ds, &["서울"]), 300);
    }

    #[test]
    fn test_non_region_primary_provider_match() {
        let mut ds = dataset(1, "X_20200101");
        ds.provider_agency = Some("한국교통공단".to_string());
        assert_eq!(score(&ds, &["교통"]), 230);
    }

    #[test]
    fn test_name_prefix_and_contains_for_region() {
        let ds = dataset(1, "서울 버스_20200101");
        // prefix 150 + contains 40 + primary prefix 80 + primary contains 50
        assert_eq!(score(&ds, &["서울"]), 320);
    }

    #[test]
    fn test_exact_tag_beats_substring_tag() {
        let mut exact = dataset(1, "A_20200101");
        exact.keywords = Some("버스, 교통".to_string());
        let mut partial = dataset(2, "B_20200101");
        partial.keywords = Some("버스정류장, 노선".to_string());

        assert_eq!(score(&exact, &["버스"]), 100);
        assert_eq!(score(&partial, &["버스"]), 60);
    }

    #[test]
    fn test_title_and_classification_matches() {
        let mut ds = dataset(1, "A_20200101");
        ds.title = Some("버스 노선 현황".to_string());
        ds.classification_system = Some("교통및물류 - 버스".to_string());
        assert_eq!(score(&ds, &["버스"]), 25 + 20);
    }

    #[test]
    fn test_description_signals() {
        let mut ds = dataset(1, "A_20200101");
        ds.description = Some("서울 교통 혼잡 지역의 교통량 자료".to_string());
        // per keyword: 서울 30, 교통 30; phrase "서울 교통" 50;
        // primary region description 40; glossary "교통량" 25;
        // occurrences 서울 1 + 교통 2 = 3 > 2 → 20
        assert_eq!(score(&ds, &["서울", "교통"]), 30 + 30 + 50 + 40 + 25 + 20);
    }

    #[test]
    fn test_recency_bonus_within_one_year() {
        let mut recent = dataset(1, "A_20200101");
        recent.modified_date = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0);
        let mut stale = dataset(2, "B_20200101");
        stale.modified_date = NaiveDate::from_ymd_opt(2022, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0);

        assert_eq!(score(&recent, &["없음"]), 20);
        assert_eq!(score(&stale, &["없음"]), 0);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let mut ds = dataset(1, "X_20200101");
        ds.title = Some("Seoul BUS stops".to_string());
        assert_eq!(score(&ds, &["bus"]), 25);
    }

    #[test]
    fn test_extra_provider_match_never_lowers_score() {
        let mut base = dataset(1, "A_20200101");
        base.provider_agency = Some("부산광역시".to_string());
        let mut richer = base.clone();
        richer.provider_agency = Some("부산광역시 교통국".to_string());

        let kws = ["부산", "교통"];
        assert!(score(&richer, &kws) >= score(&base, &kws));
        assert!(score(&richer, &kws) > score(&base, &kws));
    }

    #[test]
    fn test_rank_orders_descending_and_is_stable() {
        let mut seoul = dataset(3, "S_20200101");
        seoul.provider_agency = Some("서울특별시".to_string());
        let tie_a = dataset(1, "TA_20200101");
        let tie_b = dataset(2, "TB_20200101");

        let kws = keywords(&["서울"]);
        let ctx = ScoringContext::new(&kws, "서울", now());
        let ranked = rank(vec![tie_a, tie_b, seoul], &ctx);

        let ids: Vec<i64> = ranked.iter().map(|c| c.dataset.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(ranked[1].score, 0);
    }

    #[test]
    fn test_description_bonus_ignores_empty_keywords() {
        assert_eq!(description_bonus("abc", &["".to_string()]), 0);
        assert_eq!(description_bonus("", &["a".to_string()]), 0);
    }
}
