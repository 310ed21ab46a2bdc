//! Read-only word lists and patterns shared by the classifier, planner and scorer.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// The 17 first-level administrative divisions, in their short form.
pub const REGIONS: [&str; 17] = [
    "서울", "부산", "대구", "인천", "광주", "대전", "울산", "세종", "경기", "강원", "충북", "충남",
    "전북", "전남", "경북", "경남", "제주",
];

/// Category that means "no filter" when a planner returns it.
pub const GENERAL_CATEGORY: &str = "일반공공행정";

/// Domain terms that earn a description bonus in ranking.
pub const SPECIAL_TERMS: &[&str] = &[
    // urban development
    "도시개발", "토지구획", "재개발", "재정비", "환지", "감보율", "시행인가",
    // environment
    "대기오염", "수질오염", "폐기물", "배출시설", "환경영향", "오염물질",
    // transport
    "교통사고", "교통위반", "교통체계", "대중교통", "교통량", "신호체계",
    // education
    "교육과정", "학습", "연구", "교육시설", "교육프로그램",
    // culture
    "문화재", "관광지", "문화시설", "예술", "공연", "축제",
];

/// Administrative suffixes that may follow a short region name.
const REGION_SUFFIXES: &[&str] = &["특별자치시", "특별자치도", "특별시", "광역시", "시", "도"];

/// Long province names that don't start with their short form.
const REGION_LONG_FORMS: &[(&str, &str)] = &[
    ("충청북도", "충북"),
    ("충청남도", "충남"),
    ("전라북도", "전북"),
    ("전라남도", "전남"),
    ("경상북도", "경북"),
    ("경상남도", "경남"),
];

static REGION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| REGIONS.iter().copied().collect());

/// "N개" (N items). ASCII digits only so the capture always parses.
pub static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)개").expect("count regex is valid"));

pub fn is_region_keyword(keyword: &str) -> bool {
    REGION_SET.contains(keyword.trim())
}

/// First keyword that names a region, in keyword order.
pub fn first_region(keywords: &[String]) -> Option<&str> {
    keywords
        .iter()
        .map(|k| k.trim())
        .find(|k| is_region_keyword(k))
}

/// Folds `서울특별시`, `부산시`, `경기도`, `충청북도` … to the short region name.
pub fn fold_region_alias(token: &str) -> Option<&'static str> {
    if let Some((_, short)) = REGION_LONG_FORMS.iter().find(|(long, _)| *long == token) {
        return Some(short);
    }
    REGIONS.iter().copied().find(|region| {
        token
            .strip_prefix(region)
            .map(|rest| rest.is_empty() || REGION_SUFFIXES.contains(&rest))
            .unwrap_or(false)
    })
}
