use serde::Serialize;
use thiserror::Error;

/// Rejections raised when a skill record is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkillError {
    #[error("skill name cannot be empty")]
    EmptyName,

    #[error("importance for '{name}' must be within [0, 1], got {value}")]
    ImportanceOutOfRange { name: String, value: f64 },

    #[error("estimated weeks for '{name}' must be a finite, non-negative number, got {value}")]
    InvalidEstimate { name: String, value: f64 },
}

/// A single skill, either demonstrated by a candidate or required by a role.
///
/// Identity is the normalized name (see [`normalize_skill_name`]), so
/// "Machine  Learning" and "machine learning" are the same skill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub name: String,
    /// 0.0 – 1.0, how strongly the role emphasizes this skill.
    pub importance: f64,
    pub is_critical: bool,
    /// Expected learning time in weeks. Zero when unknown.
    pub estimated_weeks: f64,
    /// Taxonomy domain ("programming", "cloud", ...) used by the per-domain rollup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Skill {
    pub fn new(
        name: impl Into<String>,
        importance: f64,
        is_critical: bool,
        estimated_weeks: f64,
    ) -> Result<Self, SkillError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(SkillError::EmptyName);
        }
        if !importance.is_finite() || !(0.0..=1.0).contains(&importance) {
            return Err(SkillError::ImportanceOutOfRange {
                name,
                value: importance,
            });
        }
        if !estimated_weeks.is_finite() || estimated_weeks < 0.0 {
            return Err(SkillError::InvalidEstimate {
                name,
                value: estimated_weeks,
            });
        }

        Ok(Self {
            name,
            importance,
            is_critical,
            estimated_weeks,
            domain: None,
        })
    }

    pub fn with_domain(mut self, domain: Option<String>) -> Self {
        self.domain = domain;
        self
    }

    /// Normalized identity key.
    pub fn key(&self) -> String {
        normalize_skill_name(&self.name)
    }
}

/// Lowercases and collapses internal whitespace.
pub fn normalize_skill_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_name() {
        let skill = Skill::new("  Docker ", 0.8, true, 2.0).unwrap();
        assert_eq!(skill.name, "Docker");
        assert!(skill.domain.is_none());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(Skill::new("   ", 0.5, false, 1.0), Err(SkillError::EmptyName));
    }

    #[test]
    fn test_importance_out_of_range_rejected() {
        let err = Skill::new("Rust", 1.2, false, 1.0).unwrap_err();
        assert!(matches!(err, SkillError::ImportanceOutOfRange { .. }));
        assert!(Skill::new("Rust", f64::NAN, false, 1.0).is_err());
        assert!(Skill::new("Rust", -0.1, false, 1.0).is_err());
    }

    #[test]
    fn test_negative_estimate_rejected() {
        let err = Skill::new("Rust", 0.5, false, -3.0).unwrap_err();
        assert!(err.to_string().contains("Rust"));
        assert!(Skill::new("Rust", 0.5, false, f64::INFINITY).is_err());
    }

    #[test]
    fn test_key_is_case_and_space_insensitive() {
        let a = Skill::new("Machine  Learning", 0.5, false, 0.0).unwrap();
        let b = Skill::new("machine learning", 0.5, false, 0.0).unwrap();
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_with_domain() {
        let skill = Skill::new("AWS", 0.7, false, 8.0)
            .unwrap()
            .with_domain(Some("cloud".to_string()));
        assert_eq!(skill.domain.as_deref(), Some("cloud"));
    }
}
