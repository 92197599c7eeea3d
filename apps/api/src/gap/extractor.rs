//! Skill Extractor: turns free text (resume or job description) into skill names.
//!
//! Default: `TaxonomyExtractor` (pure-Rust, deterministic, fully testable).
//! Optional: `LlmExtractor` (open vocabulary via Claude), enabled with
//! `ENABLE_LLM_EXTRACTION`.
//!
//! `SkillGapEngine` holds an `Arc<dyn SkillExtractor>`, chosen at startup.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::gap::prompts::{SKILL_EXTRACTION_PROMPT_TEMPLATE, SKILL_EXTRACTION_SYSTEM};
use crate::gap::taxonomy::{self, mentions, taxonomy_entries, SKILL_TAXONOMY};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::models::skill::normalize_skill_name;

/// A skill name pulled out of free text, before any weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkill {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
}

impl ExtractedSkill {
    pub fn new(name: impl Into<String>, domain: Option<&str>) -> Self {
        Self {
            name: name.into(),
            domain: domain.map(str::to_string),
        }
    }
}

/// The extractor trait. Implement this to swap text understanding backends
/// without touching the analyzer, scheduler or handlers.
#[async_trait]
pub trait SkillExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedSkill>, AppError>;

    /// Backend label reported by `/health`.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// TaxonomyExtractor
// ────────────────────────────────────────────────────────────────────────────

/// Scans text for whole-term mentions of taxonomy skills.
///
/// On top of literal mentions, three inference rules fire:
/// - "data analysis" / "analytics" → Data Analysis
/// - "machine learning" / "ml" / "ai" → Machine Learning
/// - "team" together with "lead" → Leadership
pub struct TaxonomyExtractor;

impl TaxonomyExtractor {
    pub fn extract_from(text: &str) -> Vec<ExtractedSkill> {
        let text_lower = text.to_lowercase();

        let mut skills: Vec<ExtractedSkill> = taxonomy_entries()
            .filter(|(_, skill)| mentions(&text_lower, &skill.to_lowercase()))
            .map(|(domain, skill)| ExtractedSkill::new(skill, Some(domain)))
            .collect();

        if mentions(&text_lower, "data analysis") || mentions(&text_lower, "analytics") {
            skills.push(ExtractedSkill::new("Data Analysis", Some("business")));
        }
        if ["machine learning", "ml", "ai"]
            .iter()
            .any(|term| mentions(&text_lower, term))
        {
            skills.push(ExtractedSkill::new("Machine Learning", Some("data_science")));
        }
        if text_lower.contains("team") && text_lower.contains("lead") {
            skills.push(ExtractedSkill::new("Leadership", Some("soft_skills")));
        }

        dedup_skills(skills)
    }
}

#[async_trait]
impl SkillExtractor for TaxonomyExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedSkill>, AppError> {
        Ok(Self::extract_from(text))
    }

    fn backend(&self) -> &'static str {
        "taxonomy"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmExtractor
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ExtractionPayload {
    skills: Vec<ExtractedSkill>,
}

/// Open-vocabulary extraction via Claude. Domains the model leaves empty, or
/// labels outside the taxonomy, are resolved from the taxonomy when possible.
pub struct LlmExtractor(pub LlmClient);

#[async_trait]
impl SkillExtractor for LlmExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<ExtractedSkill>, AppError> {
        let domains: Vec<&str> = SKILL_TAXONOMY.iter().map(|(domain, _)| *domain).collect();
        let prompt = SKILL_EXTRACTION_PROMPT_TEMPLATE
            .replace("{domains}", &domains.join(", "))
            .replace("{text}", text);
        let system = format!("{SKILL_EXTRACTION_SYSTEM} {JSON_ONLY_SYSTEM}");

        let payload: ExtractionPayload = self
            .0
            .call_json(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("skill extraction failed: {e}")))?;

        Ok(normalize_llm_skills(payload.skills))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn normalize_llm_skills(skills: Vec<ExtractedSkill>) -> Vec<ExtractedSkill> {
    let known_domain = |d: &str| SKILL_TAXONOMY.iter().any(|(domain, _)| *domain == d);

    let skills = skills
        .into_iter()
        .filter(|s| !s.name.trim().is_empty())
        .map(|s| {
            let name = taxonomy::canonical_name(&s.name)
                .map(str::to_string)
                .unwrap_or_else(|| s.name.trim().to_string());
            let domain = taxonomy::domain_of(&name)
                .map(str::to_string)
                .or_else(|| s.domain.filter(|d| known_domain(d.as_str())));
            ExtractedSkill { name, domain }
        })
        .collect();

    dedup_skills(skills)
}

/// Drops repeats by normalized name, keeping the first occurrence.
pub fn dedup_skills(skills: Vec<ExtractedSkill>) -> Vec<ExtractedSkill> {
    let mut seen = HashSet::new();
    skills
        .into_iter()
        .filter(|s| seen.insert(normalize_skill_name(&s.name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(skills: &[ExtractedSkill]) -> Vec<&str> {
        skills.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_taxonomy_extracts_mentions_with_domains() {
        let skills =
            TaxonomyExtractor::extract_from("Built services in Rust and Go, deployed on Kubernetes");
        assert_eq!(names(&skills), vec!["Go", "Rust", "Kubernetes"]);
        assert_eq!(skills[2].domain.as_deref(), Some("cloud"));
    }

    #[test]
    fn test_taxonomy_does_not_match_inside_words() {
        let skills = TaxonomyExtractor::extract_from("JavaScript developer");
        assert!(names(&skills).contains(&"JavaScript"));
        assert!(!names(&skills).contains(&"Java"));
    }

    #[test]
    fn test_inference_rules() {
        let skills = TaxonomyExtractor::extract_from("I lead a team doing analytics and ML");
        let found = names(&skills);
        assert!(found.contains(&"Data Analysis"));
        assert!(found.contains(&"Machine Learning"));
        assert!(found.contains(&"Leadership"));
    }

    #[test]
    fn test_inferred_skill_not_duplicated() {
        let skills = TaxonomyExtractor::extract_from("Machine Learning and ML pipelines");
        let count = skills.iter().filter(|s| s.name == "Machine Learning").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(TaxonomyExtractor::extract_from("").is_empty());
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let extractor: Box<dyn SkillExtractor> = Box::new(TaxonomyExtractor);
        let skills = extractor.extract("Docker").await.unwrap();
        assert_eq!(names(&skills), vec!["Docker"]);
        assert_eq!(extractor.backend(), "taxonomy");
    }

    #[test]
    fn test_llm_payload_normalization() {
        let json = r#"{"skills": [
            {"name": "kubernetes", "domain": "devops"},
            {"name": "GraphQL", "domain": "programming"},
            {"name": "Kubernetes"},
            {"name": "  "},
            {"name": "Storytelling", "domain": "made_up"}
        ]}"#;
        let payload: ExtractionPayload = serde_json::from_str(json).unwrap();
        let skills = normalize_llm_skills(payload.skills);

        assert_eq!(names(&skills), vec!["Kubernetes", "GraphQL", "Storytelling"]);
        assert_eq!(skills[0].domain.as_deref(), Some("cloud"));
        assert_eq!(skills[1].domain.as_deref(), Some("programming"));
        assert_eq!(skills[2].domain, None);
    }
}
