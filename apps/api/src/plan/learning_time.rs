//! Learning-time estimation: how many weeks a skill takes to learn.
//!
//! The scheduler only sees the `LearningTimeEstimator` trait, so tests can
//! inject a closure and the service can swap the catalog for a remote
//! knowledge base without touching the scheduling code.

use crate::models::skill::{normalize_skill_name, Skill};

/// Fallback for skills missing from the catalog.
pub const DEFAULT_LEARNING_WEEKS: f64 = 6.0;

const BASE_LEARNING_WEEKS: &[(&str, f64)] = &[
    // Programming
    ("Python", 6.0),
    ("JavaScript", 8.0),
    ("Java", 10.0),
    ("C++", 12.0),
    ("C#", 8.0),
    ("Ruby", 6.0),
    ("PHP", 6.0),
    ("Swift", 8.0),
    ("Kotlin", 8.0),
    ("TypeScript", 4.0),
    ("Go", 6.0),
    ("Rust", 10.0),
    ("Scala", 8.0),
    ("R", 6.0),
    ("SQL", 4.0),
    ("NoSQL", 4.0),
    ("HTML", 2.0),
    ("CSS", 4.0),
    // Data science
    ("Machine Learning", 12.0),
    ("Deep Learning", 10.0),
    ("NLP", 8.0),
    ("Computer Vision", 10.0),
    ("Data Mining", 8.0),
    ("Statistical Analysis", 6.0),
    ("Data Visualization", 4.0),
    ("Big Data", 8.0),
    ("TensorFlow", 6.0),
    ("PyTorch", 6.0),
    ("Keras", 4.0),
    ("scikit-learn", 4.0),
    ("pandas", 3.0),
    ("NumPy", 3.0),
    // Cloud
    ("AWS", 8.0),
    ("Azure", 8.0),
    ("Google Cloud", 8.0),
    ("Docker", 4.0),
    ("Kubernetes", 6.0),
    ("Serverless", 4.0),
    ("Microservices", 6.0),
    ("DevOps", 10.0),
    ("CI/CD", 6.0),
    // Soft skills
    ("Communication", 6.0),
    ("Leadership", 10.0),
    ("Teamwork", 4.0),
    ("Problem Solving", 8.0),
    ("Critical Thinking", 8.0),
    ("Time Management", 4.0),
    ("Adaptability", 6.0),
    ("Creativity", 8.0),
    ("Emotional Intelligence", 10.0),
    // Business
    ("Marketing", 8.0),
    ("Sales", 8.0),
    ("Finance", 10.0),
    ("Accounting", 12.0),
    ("HR", 8.0),
    ("Operations", 10.0),
    ("Strategy", 12.0),
    ("Business Development", 10.0),
    ("Product Management", 10.0),
    ("UX/UI Design", 8.0),
];

/// Estimates learning time for a skill, in (possibly fractional) weeks.
pub trait LearningTimeEstimator: Send + Sync {
    fn estimate_weeks(&self, skill: &Skill) -> f64;
}

impl<F> LearningTimeEstimator for F
where
    F: Fn(&Skill) -> f64 + Send + Sync,
{
    fn estimate_weeks(&self, skill: &Skill) -> f64 {
        self(skill)
    }
}

/// Trusts the `estimated_weeks` already carried on the skill.
pub struct StatedEstimate;

impl LearningTimeEstimator for StatedEstimate {
    fn estimate_weeks(&self, skill: &Skill) -> f64 {
        skill.estimated_weeks
    }
}

/// Static catalog of base learning times, stretched by importance:
/// `base * (0.8 + 0.4 * importance)`. A skill the role leans on heavily
/// needs deeper study than one it merely mentions.
pub struct LearningTimeCatalog;

impl LearningTimeCatalog {
    pub fn base_weeks(skill_name: &str) -> f64 {
        let key = normalize_skill_name(skill_name);
        BASE_LEARNING_WEEKS
            .iter()
            .find(|(name, _)| name.to_lowercase() == key)
            .map(|(_, weeks)| *weeks)
            .unwrap_or(DEFAULT_LEARNING_WEEKS)
    }
}

impl LearningTimeEstimator for LearningTimeCatalog {
    fn estimate_weeks(&self, skill: &Skill) -> f64 {
        Self::base_weeks(&skill.name) * (0.8 + 0.4 * skill.importance)
    }
}

/// Human-readable estimate, e.g. "~5 weeks".
pub fn estimated_time_label(weeks: f64) -> String {
    let whole = if weeks.is_finite() { weeks.ceil().max(1.0) } else { 1.0 };
    if whole <= 1.0 {
        "~1 week".to_string()
    } else {
        format!("~{whole:.0} weeks")
    }
}
