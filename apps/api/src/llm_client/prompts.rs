// Cross-cutting prompt fragments. Each feature keeps its own prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every prompt that names catalog fields.
pub const KOREAN_OUTPUT_INSTRUCTION: &str = "\
    The catalog is Korean public data. Keep dataset names, regions and category \
    names exactly as written in Korean; write every free-text value in Korean.";
