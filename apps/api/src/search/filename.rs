//! Dataset filename extraction from free text.
//!
//! Catalog names follow `<기관>_<설명>_<YYYYMMDD>`; metro-city datasets start
//! with `<시>광역시 <구>`. The cascade prefers structural matches and only
//! falls back to stripping known request phrases.

use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

static FULL_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([가-힣a-zA-Z0-9]+광역시\s[가-구]+_[가-힣a-zA-Z0-9\s]+_[0-9]{8})")
        .expect("full filename regex is valid")
});

static DATED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([가-힣a-zA-Z0-9_\s]+_[0-9]{8})").expect("dated filename regex is valid")
});

static REQUEST_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(상세정보|자세히|더 알고|상세|에 대해|에 대한|의|을|를)")
        .expect("request phrase regex is valid")
});

/// Best-effort filename from a prompt. Never fails; may return an empty string.
pub fn extract_file_name(prompt: &str) -> String {
    if let Some(m) = FULL_NAME_RE.find(prompt) {
        let name = m.as_str().trim().to_string();
        info!("Filename from full pattern: '{name}'");
        return name;
    }

    if let Some(m) = DATED_NAME_RE.find(prompt) {
        let name = m.as_str().trim().to_string();
        info!("Filename from dated pattern: '{name}'");
        return name;
    }

    let name = REQUEST_PHRASE_RE.replace_all(prompt, "").trim().to_string();
    info!("Filename from phrase stripping: '{name}'");
    name
}
