// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it and composes these where useful.

/// Closing instruction that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY valid JSON data. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
