//! Gap Analyzer: compares candidate skills against a role's required skills.
//!
//! Algorithm:
//! 1. For each job skill, find the candidate skill with the highest similarity.
//!    At or above `similarity` threshold → matched, otherwise → missing.
//! 2. Candidate skills that are not the best match of any matched job skill are
//!    `additional`, annotated with their most related job skill when that
//!    similarity reaches the `relatedness` threshold.
//! 3. overall_match_score = 100 × Σ(matched importance) / Σ(job importance),
//!    or 100 when the role weighs nothing.
//! 4. gap_score = 100 − overall_match_score
//!
//! Pure and synchronous: identical inputs always produce identical reports.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::gap::similarity::SkillSimilarity;
use crate::gap::taxonomy::OTHER_DOMAIN;
use crate::models::skill::Skill;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;
pub const DEFAULT_RELATEDNESS_THRESHOLD: f64 = 0.3;

/// Relevance weight for additional skills with no related job skill.
const UNRELATED_RELEVANCE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapThresholds {
    pub similarity: f64,
    pub relatedness: f64,
}

impl Default for GapThresholds {
    fn default() -> Self {
        Self {
            similarity: DEFAULT_SIMILARITY_THRESHOLD,
            relatedness: DEFAULT_RELATEDNESS_THRESHOLD,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedSkill {
    pub job_skill: Skill,
    pub candidate_skill_name: String,
    pub similarity: f64,
}

/// A candidate skill the role did not ask for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditionalSkill {
    pub skill: Skill,
    /// Display-only hint; `None` when nothing clears the relatedness threshold.
    pub best_related_job_skill: Option<String>,
    pub similarity: f64,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapReport {
    pub matched: Vec<MatchedSkill>,
    pub missing: Vec<Skill>,
    pub additional: Vec<AdditionalSkill>,
    pub overall_match_score: f64,
    pub gap_score: f64,
}

impl GapReport {
    pub fn matched_importance(&self) -> f64 {
        self.matched.iter().map(|m| m.job_skill.importance).sum()
    }

    pub fn total_importance(&self) -> f64 {
        self.matched_importance() + self.missing.iter().map(|s| s.importance).sum::<f64>()
    }

    /// Critical job skills, matched or not, in job order of each list.
    pub fn critical_skill_names(&self) -> Vec<String> {
        self.matched
            .iter()
            .map(|m| &m.job_skill)
            .chain(self.missing.iter())
            .filter(|s| s.is_critical)
            .map(|s| s.name.clone())
            .collect()
    }

    pub fn missing_critical_count(&self) -> usize {
        self.missing.iter().filter(|s| s.is_critical).count()
    }
}

/// Weighted match/gap for one skill domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainScore {
    pub required: usize,
    pub matched: usize,
    pub match_score: f64,
    pub gap_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// `100 × credited / total`, clamped to [0, 100]. A role with no weight is
/// vacuously fully matched.
pub fn weighted_match_score(credited_importance: f64, total_importance: f64) -> f64 {
    if total_importance <= 0.0 {
        return 100.0;
    }
    (100.0 * credited_importance / total_importance).clamp(0.0, 100.0)
}

pub fn analyze_gap(
    candidate_skills: &[Skill],
    job_skills: &[Skill],
    similarity: &dyn SkillSimilarity,
    thresholds: &GapThresholds,
) -> GapReport {
    let sim = |a: &str, b: &str| {
        let score = similarity.similarity(a, b);
        if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        }
    };

    let mut matched = Vec::new();
    let mut missing = Vec::new();
    let mut used_candidates = HashSet::new();

    for job_skill in job_skills {
        let best = best_by_similarity(candidate_skills.iter().map(|c| c.name.as_str()), |c| {
            sim(&job_skill.name, c)
        });

        match best {
            Some((index, score)) if score >= thresholds.similarity => {
                used_candidates.insert(index);
                matched.push(MatchedSkill {
                    job_skill: job_skill.clone(),
                    candidate_skill_name: candidate_skills[index].name.clone(),
                    similarity: score,
                });
            }
            _ => missing.push(job_skill.clone()),
        }
    }

    let additional = candidate_skills
        .iter()
        .enumerate()
        .filter(|(index, _)| !used_candidates.contains(index))
        .map(|(_, candidate)| {
            let best = best_by_similarity(job_skills.iter().map(|j| j.name.as_str()), |j| {
                sim(&candidate.name, j)
            });
            let (related, score) = match best {
                Some((index, score)) if score >= thresholds.relatedness => {
                    (Some(&job_skills[index]), score)
                }
                Some((_, score)) => (None, score),
                None => (None, 0.0),
            };
            AdditionalSkill {
                skill: candidate.clone(),
                best_related_job_skill: related.map(|j| j.name.clone()),
                similarity: score,
                relevance: score * related.map_or(UNRELATED_RELEVANCE_WEIGHT, |j| j.importance),
            }
        })
        .collect();

    let total_importance: f64 = job_skills.iter().map(|s| s.importance).sum();
    let matched_importance: f64 = matched.iter().map(|m| m.job_skill.importance).sum();
    let overall_match_score = weighted_match_score(matched_importance, total_importance);

    GapReport {
        matched,
        missing,
        additional,
        overall_match_score,
        gap_score: 100.0 - overall_match_score,
    }
}

/// Index and score of the highest-scoring item; the first one wins ties.
/// `None` only when `items` is empty, so a zero threshold still matches.
fn best_by_similarity<'a>(
    items: impl Iterator<Item = &'a str>,
    score: impl Fn(&str) -> f64,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, item) in items.enumerate() {
        let s = score(item);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((index, s));
        }
    }
    best
}

/// Per-domain rollup of the weighted match formula, keyed by domain label.
/// Skills without a domain are grouped under `"other"`. Only domains the role
/// requires appear.
pub fn domain_rollup(report: &GapReport) -> BTreeMap<String, DomainScore> {
    #[derive(Default)]
    struct Tally {
        required: usize,
        matched: usize,
        total_importance: f64,
        matched_importance: f64,
    }

    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    let domain_key = |s: &Skill| s.domain.clone().unwrap_or_else(|| OTHER_DOMAIN.to_string());

    for m in &report.matched {
        let tally = tallies.entry(domain_key(&m.job_skill)).or_default();
        tally.required += 1;
        tally.matched += 1;
        tally.total_importance += m.job_skill.importance;
        tally.matched_importance += m.job_skill.importance;
    }
    for s in &report.missing {
        let tally = tallies.entry(domain_key(s)).or_default();
        tally.required += 1;
        tally.total_importance += s.importance;
    }

    tallies
        .into_iter()
        .map(|(domain, t)| {
            let match_score = weighted_match_score(t.matched_importance, t.total_importance);
            (
                domain,
                DomainScore {
                    required: t.required,
                    matched: t.matched,
                    match_score,
                    gap_score: 100.0 - match_score,
                },
            )
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::gap::similarity::CatalogSimilarity;
    use proptest::prelude::*;

    const NAMES: &[&str] = &[
        "Python",
        "Java",
        "JavaScript",
        "TypeScript",
        "SQL",
        "NoSQL",
        "Docker",
        "Kubernetes",
        "AWS",
        "Machine Learning",
        "Deep Learning",
        "Communication",
        "Cooking",
    ];

    fn arb_skill() -> impl Strategy<Value = Skill> {
        (
            prop::sample::select(NAMES),
            0.0..=1.0f64,
            any::<bool>(),
        )
            .prop_map(|(name, importance, critical)| {
                Skill::new(name, importance, critical, 4.0).unwrap()
            })
    }

    proptest! {
        /// Every job skill lands in exactly one of matched or missing, every
        /// unused candidate is additional, and the scores stay complementary.
        #[test]
        fn gap_report_partitions_and_bounds(
            candidates in prop::collection::vec(arb_skill(), 0..8),
            jobs in prop::collection::vec(arb_skill(), 0..8),
        ) {
            let report = analyze_gap(&candidates, &jobs, &CatalogSimilarity, &GapThresholds::default());

            prop_assert_eq!(report.matched.len() + report.missing.len(), jobs.len());
            prop_assert!(report.additional.len() <= candidates.len());
            prop_assert!(report.additional.len() + report.matched.len() >= candidates.len());
            prop_assert!((0.0..=100.0).contains(&report.overall_match_score));
            prop_assert!((report.gap_score - (100.0 - report.overall_match_score)).abs() < 1e-9);
            for m in &report.matched {
                prop_assert!(m.similarity >= DEFAULT_SIMILARITY_THRESHOLD);
                prop_assert!(m.similarity <= 1.0);
            }
            for a in &report.additional {
                prop_assert!((0.0..=1.0).contains(&a.similarity));
                prop_assert!(a.relevance >= 0.0);
            }
            if jobs.iter().all(|s| s.importance == 0.0) {
                prop_assert_eq!(report.overall_match_score, 100.0);
            }
        }
    }
}
