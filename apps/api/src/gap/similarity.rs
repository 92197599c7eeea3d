//! Skill similarity: how close two skill names are, on a 0.0 – 1.0 scale.

use strsim::sorensen_dice;

use crate::models::skill::normalize_skill_name;

/// Pluggable similarity strategy used by the gap analyzer.
/// Any `Fn(&str, &str) -> f64` works, which keeps the analyzer testable
/// without an embedding model.
pub trait SkillSimilarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

impl<F> SkillSimilarity for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Curated related-skill pairs (symmetric).
const RELATED_SKILLS: &[(&str, &str, f64)] = &[
    ("python", "programming", 0.85),
    ("java", "programming", 0.82),
    ("javascript", "programming", 0.80),
    ("typescript", "javascript", 0.80),
    ("machine learning", "data science", 0.90),
    ("deep learning", "machine learning", 0.88),
    ("tensorflow", "deep learning", 0.85),
    ("pytorch", "deep learning", 0.84),
    ("keras", "tensorflow", 0.80),
    ("aws", "cloud", 0.87),
    ("azure", "cloud", 0.86),
    ("google cloud", "cloud", 0.86),
    ("docker", "devops", 0.83),
    ("kubernetes", "devops", 0.82),
    ("terraform", "infrastructure as code", 0.85),
    ("communication", "soft skills", 0.88),
    ("leadership", "management", 0.86),
    ("teamwork", "collaboration", 0.90),
    ("sql", "database", 0.85),
    ("nosql", "database", 0.82),
    ("marketing", "business", 0.84),
    ("sales", "business", 0.83),
    ("finance", "business", 0.82),
];

/// Lexical resemblance alone never reaches the default match threshold:
/// "SQL" and "NoSQL" look alike but are different skills.
const LEXICAL_CEILING: f64 = 0.55;

/// Exact (normalized) match → 1.0, curated pair → its score, otherwise a
/// capped Sørensen–Dice bigram similarity of the normalized names.
pub struct CatalogSimilarity;

impl SkillSimilarity for CatalogSimilarity {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let a = normalize_skill_name(a);
        let b = normalize_skill_name(b);

        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }

        RELATED_SKILLS
            .iter()
            .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
            .map(|(_, _, score)| *score)
            .unwrap_or_else(|| (sorensen_dice(&a, &b) * LEXICAL_CEILING).clamp(0.0, LEXICAL_CEILING))
    }
}
