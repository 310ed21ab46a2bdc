// LLM prompt constants for utilization recommendations.

/// System prompt for both recommendation calls.
pub const RECOMMEND_SYSTEM: &str = "You are a public-data consultant. \
    You suggest concrete, realistic ways to use one Korean public dataset.";

/// Full report prompt. Replace `{dataset}` and `{focus}`.
pub const REPORT_PROMPT_TEMPLATE: &str = r#"Suggest how the dataset below can be used.

Return a JSON object with this EXACT schema (no extra fields):
{
  "businessApplications": ["..."],
  "researchApplications": ["..."],
  "policyApplications": ["..."],
  "combinationSuggestions": ["..."],
  "analysisTools": ["..."]
}

Rules:
- 3 to 5 short items per list, one idea per item.
- combinationSuggestions: other public datasets worth joining with this one.
- analysisTools: concrete tools or libraries.
{focus}

DATASET:
{dataset}"#;

/// Single-answer prompt. Replace `{dataset}` and `{request}`.
pub const SINGLE_PROMPT_TEMPLATE: &str = r#"A user wants to use the dataset below for a specific purpose.

Return a JSON array of 1 to 5 strings. Each string is one concrete way to
use this dataset for the user's purpose.

USER REQUEST:
{request}

DATASET:
{dataset}"#;
