//! Detail-vs-search prompt classification.
//!
//! Detail requests are rare and name one dataset; any general-search phrasing
//! overrides a detail marker.

use crate::search::vocabulary::COUNT_RE;

/// Phrases that on their own mark a detail request.
const DETAIL_MARKERS: &[&str] = &["상세정보", "자세히", "더 알고"];

/// Generic detail marker; ignored when the prompt also says "데이터"
/// ("상세 데이터" is search phrasing).
const GENERIC_DETAIL_MARKER: &str = "상세";
const DATA_MARKER: &str = "데이터";

/// Search phrasings that veto a detail classification.
const VETO_MARKERS: &[&str] = &["제공", "보여", "검색", "찾아"];

/// Returns true when the prompt asks for one dataset's full metadata.
pub fn is_detail_request(prompt: &str) -> bool {
    let lower = prompt.trim().to_lowercase();

    let has_detail_marker = DETAIL_MARKERS.iter().any(|m| lower.contains(m))
        || (lower.contains(GENERIC_DETAIL_MARKER) && !lower.contains(DATA_MARKER));

    has_detail_marker
        && !COUNT_RE.is_match(&lower)
        && !VETO_MARKERS.iter().any(|m| lower.contains(m))
}
