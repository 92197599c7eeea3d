//! Skill taxonomy: the closed vocabulary the local extractor recognizes, grouped by domain.

use crate::models::skill::normalize_skill_name;

/// Domain label used for skills that fall outside the taxonomy.
pub const OTHER_DOMAIN: &str = "other";

pub const SKILL_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "programming",
        &[
            "Python", "JavaScript", "Java", "C++", "C#", "Ruby", "PHP", "Swift", "Kotlin",
            "TypeScript", "Go", "Rust", "Scala", "R", "MATLAB", "SQL", "NoSQL", "HTML", "CSS",
        ],
    ),
    (
        "data_science",
        &[
            "Machine Learning", "Deep Learning", "NLP", "Computer Vision", "Data Mining",
            "Statistical Analysis", "Data Visualization", "Big Data", "A/B Testing",
            "Predictive Modeling", "Feature Engineering", "TensorFlow", "PyTorch", "Keras",
            "scikit-learn", "pandas", "NumPy", "SciPy",
        ],
    ),
    (
        "cloud",
        &[
            "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Serverless",
            "Microservices", "DevOps", "CI/CD", "Infrastructure as Code", "Terraform",
            "CloudFormation", "Ansible", "Chef", "Puppet",
        ],
    ),
    (
        "soft_skills",
        &[
            "Communication", "Leadership", "Teamwork", "Problem Solving", "Critical Thinking",
            "Time Management", "Adaptability", "Creativity", "Emotional Intelligence",
            "Conflict Resolution", "Negotiation", "Presentation Skills", "Project Management",
        ],
    ),
    (
        "business",
        &[
            "Marketing", "Sales", "Finance", "Accounting", "HR", "Operations", "Strategy",
            "Business Development", "Product Management", "Customer Success", "UX/UI Design",
            "Market Research", "Data Analysis", "SEO", "SEM", "Content Marketing", "CRM",
        ],
    ),
];

/// Iterates `(domain, skill)` pairs in taxonomy order.
pub fn taxonomy_entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    SKILL_TAXONOMY
        .iter()
        .flat_map(|(domain, skills)| skills.iter().map(move |skill| (*domain, *skill)))
}

/// Returns the taxonomy domain for a skill name, if it is catalogued.
pub fn domain_of(skill_name: &str) -> Option<&'static str> {
    let key = normalize_skill_name(skill_name);
    taxonomy_entries()
        .find(|(_, skill)| skill.to_lowercase() == key)
        .map(|(domain, _)| domain)
}

/// Returns the canonical taxonomy spelling of a skill name, if catalogued.
pub fn canonical_name(skill_name: &str) -> Option<&'static str> {
    let key = normalize_skill_name(skill_name);
    taxonomy_entries()
        .find(|(_, skill)| skill.to_lowercase() == key)
        .map(|(_, skill)| skill)
}

/// Counts whole-term occurrences of `term_lower` in `text_lower`.
///
/// Both inputs must already be lowercase. A match must not be glued to an
/// alphanumeric character on either side, so "java" does not count inside
/// "javascript" and "r" does not count inside "rust".
pub fn count_mentions(text_lower: &str, term_lower: &str) -> usize {
    if term_lower.is_empty() {
        return 0;
    }

    text_lower
        .match_indices(term_lower)
        .filter(|(start, _)| {
            let before = text_lower[..*start].chars().next_back();
            let after = text_lower[start + term_lower.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        })
        .count()
}

pub fn mentions(text_lower: &str, term_lower: &str) -> bool {
    count_mentions(text_lower, term_lower) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_lookup_is_case_insensitive() {
        assert_eq!(domain_of("kubernetes"), Some("cloud"));
        assert_eq!(domain_of("  Machine   Learning "), Some("data_science"));
        assert_eq!(domain_of("Underwater Basket Weaving"), None);
    }

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("pytorch"), Some("PyTorch"));
        assert_eq!(canonical_name("GraphQL"), None);
    }

    #[test]
    fn test_count_mentions_respects_word_boundaries() {
        let text = "java and javascript, more java.";
        assert_eq!(count_mentions(text, "java"), 2);
        assert_eq!(count_mentions(text, "javascript"), 1);
        assert_eq!(count_mentions("rust and r", "r"), 1);
    }

    #[test]
    fn test_count_mentions_symbols() {
        assert_eq!(count_mentions("c++ and c#, ci/cd pipelines", "c++"), 1);
        assert_eq!(count_mentions("c++ and c#, ci/cd pipelines", "c#"), 1);
        assert_eq!(count_mentions("c++ and c#, ci/cd pipelines", "ci/cd"), 1);
    }

    #[test]
    fn test_count_mentions_empty_term() {
        assert_eq!(count_mentions("anything", ""), 0);
        assert!(!mentions("", "rust"));
    }

    #[test]
    fn test_taxonomy_has_no_duplicate_names() {
        let mut seen = std::collections::HashSet::new();
        for (_, skill) in taxonomy_entries() {
            assert!(seen.insert(skill.to_lowercase()), "duplicate: {skill}");
        }
    }
}
