// Prompt constants for LLM-backed skill extraction.

/// System prompt for skill extraction. Append `llm_client::prompts::JSON_ONLY_SYSTEM`.
pub const SKILL_EXTRACTION_SYSTEM: &str =
    "You are an expert technical recruiter who identifies concrete, learnable skills \
    in resumes and job descriptions.";

/// Skill extraction prompt template. Replace `{domains}` and `{text}` before sending.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = r#"List every distinct professional skill demonstrated or requested in the text below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": [
    {"name": "Kubernetes", "domain": "cloud"}
  ]
}

Rules:
- One entry per skill; merge spelling variants ("k8s" -> "Kubernetes").
- Use the conventional capitalization of the skill name.
- `domain` must be one of: {domains}. Use null when none fits.
- Do NOT include job titles, company names, degrees, or years of experience.
- Return {"skills": []} when the text names no skills.

TEXT:
{text}"#;
