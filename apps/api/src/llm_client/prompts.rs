// Shared prompt fragments.
// Each report call site defines its own prompt text in reports/prompts.rs.

/// System prompt fragment that asks for JSON-only output. Models still wrap
/// replies in fences or prose often enough that the normalizer never trusts it.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Common instruction appended to all report prompts.
pub const ACTIONABLE_INSTRUCTION: &str = "\
    Focus on actionable insights and current market conditions. \
    Be specific and data-driven. Base every recommendation on the profile provided; \
    do not invent employers, degrees or skills the candidate does not have.";
