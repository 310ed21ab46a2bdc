// LLM prompt constants for query planning.

/// System prompt for the query planner.
pub const PLAN_SYSTEM: &str = "You are a search planner for a Korean public-data catalog. \
    Turn a user's request into a structured catalog query.";

/// Query plan prompt template. Replace `{regions}`, `{categories}` and `{prompt}`.
pub const PLAN_PROMPT_TEMPLATE: &str = r#"Build a search plan for the request below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "majorCategory": "교통",
  "keywords": ["서울", "교통량"],
  "limit": 5
}

Rules:
- majorCategory: one of [{categories}], or "일반공공행정" when no category fits.
- keywords: 1 to 4 short search terms taken from the request, most specific first.
  If the request names a region from [{regions}], put that region first in its
  short form (e.g. "서울특별시" → "서울").
- Drop filler words such as "데이터", "자료", "보여줘", "찾아줘".
- limit: the number of results the user asked for ("5개" → 5), otherwise null.

REQUEST:
{prompt}"#;
