//! Placeholder skill sets for degraded extraction.
//!
//! When the configured extractor is unavailable, the pipeline still runs the
//! analyzer and scheduler on a stand-in profile drawn from the taxonomy. The
//! generator is seeded from the request text, so the same request always
//! produces the same placeholder and responses stay reproducible.

use sha2::{Digest, Sha256};

use crate::gap::taxonomy::taxonomy_entries;
use crate::models::skill::{normalize_skill_name, Skill, SkillError};
use crate::plan::learning_time::LearningTimeEstimator;

pub const PLACEHOLDER_JOB_SKILLS: usize = 6;
const PLACEHOLDER_EXTRA_CANDIDATE_SKILLS: usize = 2;

/// Deterministic pseudo-random stream: block `n` is `SHA-256(seed ‖ n)`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: [u8; 32],
    counter: u64,
}

impl SeededRng {
    pub fn new(seed: [u8; 32]) -> Self {
        Self { seed, counter: 0 }
    }

    /// Seeds from text parts. Parts are length-prefixed so ("ab", "c") and
    /// ("a", "bc") seed differently.
    pub fn from_text(parts: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&hasher.finalize());
        Self::new(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(self.counter.to_le_bytes());
        self.counter += 1;

        let block = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&block[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[0, bound)`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    /// Partial Fisher–Yates: the first `count` items of `items` become a random sample.
    pub fn sample<T>(&mut self, items: &mut [T], count: usize) {
        let count = count.min(items.len());
        for i in 0..count {
            let j = i + self.below(items.len() - i);
            items.swap(i, j);
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaceholderProfile {
    pub candidate_skills: Vec<Skill>,
    pub job_skills: Vec<Skill>,
}

/// Job skills: a random taxonomy sample with importance in [0.5, 1.0).
pub fn placeholder_job_skills(
    rng: &mut SeededRng,
    critical_threshold: f64,
    estimator: &dyn LearningTimeEstimator,
) -> Result<Vec<Skill>, SkillError> {
    let mut pool: Vec<(&str, &str)> = taxonomy_entries().collect();
    rng.sample(&mut pool, PLACEHOLDER_JOB_SKILLS);

    pool.into_iter()
        .take(PLACEHOLDER_JOB_SKILLS)
        .map(|(domain, name)| -> Result<Skill, SkillError> {
            let importance = 0.5 + rng.next_f64() * 0.5;
            let draft = Skill::new(name, importance, importance >= critical_threshold, 0.0)?;
            let weeks = estimator.estimate_weeks(&draft);
            Ok(Skill::new(name, importance, draft.is_critical, weeks)?
                .with_domain(Some(domain.to_string())))
        })
        .collect()
}

/// Candidate skills: roughly half of the job skills plus a couple of unrelated extras.
pub fn placeholder_candidate_skills(
    rng: &mut SeededRng,
    job_skills: &[Skill],
    estimator: &dyn LearningTimeEstimator,
) -> Result<Vec<Skill>, SkillError> {
    let mut overlap: Vec<&Skill> = job_skills.iter().collect();
    let keep = job_skills.len().div_ceil(2);
    rng.sample(&mut overlap, keep);

    let mut extras: Vec<(&str, &str)> = taxonomy_entries()
        .filter(|(_, name)| {
            let key = normalize_skill_name(name);
            !job_skills.iter().any(|j| j.key() == key)
        })
        .collect();
    rng.sample(&mut extras, PLACEHOLDER_EXTRA_CANDIDATE_SKILLS);

    let picked = overlap
        .into_iter()
        .take(keep)
        .map(|s| (s.domain.clone(), s.name.clone()))
        .chain(
            extras
                .into_iter()
                .take(PLACEHOLDER_EXTRA_CANDIDATE_SKILLS)
                .map(|(domain, name)| (Some(domain.to_string()), name.to_string())),
        );

    picked
        .map(|(domain, name)| -> Result<Skill, SkillError> {
            let draft = Skill::new(&name, 0.5, false, 0.0)?;
            let weeks = estimator.estimate_weeks(&draft);
            Ok(Skill::new(name, 0.5, false, weeks)?.with_domain(domain))
        })
        .collect()
}

pub fn placeholder_profile(
    rng: &mut SeededRng,
    critical_threshold: f64,
    estimator: &dyn LearningTimeEstimator,
) -> Result<PlaceholderProfile, SkillError> {
    let job_skills = placeholder_job_skills(rng, critical_threshold, estimator)?;
    let candidate_skills = placeholder_candidate_skills(rng, &job_skills, estimator)?;
    Ok(PlaceholderProfile {
        candidate_skills,
        job_skills,
    })
}
