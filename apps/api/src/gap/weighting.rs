//! Job-skill weighting: importance and criticality from how the job description
//! talks about each skill.

use crate::gap::extractor::ExtractedSkill;
use crate::gap::taxonomy::count_mentions;
use crate::models::skill::{Skill, SkillError};
use crate::plan::learning_time::LearningTimeEstimator;

/// Importance assigned to skills the JD never spells out (inferred or LLM-only).
pub const UNMENTIONED_IMPORTANCE: f64 = 0.3;
/// Candidate skills carry no role emphasis; they get a neutral weight.
pub const CANDIDATE_SKILL_IMPORTANCE: f64 = 0.5;

const BASE_MENTIONED_IMPORTANCE: f64 = 0.5;
const PER_MENTION_BONUS: f64 = 0.1;
const REQUIRED_BONUS: f64 = 0.3;

/// Importance of a skill for a role, from the lowercase job description.
///
/// `min(0.5 + 0.1 × mentions + 0.3 if flagged as required, 1.0)`, or 0.3 when
/// the skill is never mentioned.
pub fn skill_importance(skill_name: &str, jd_lower: &str) -> f64 {
    let skill_lower = skill_name.to_lowercase();
    let mention_count = count_mentions(jd_lower, &skill_lower);
    if mention_count == 0 {
        return UNMENTIONED_IMPORTANCE;
    }

    let bonus = if is_flagged_required(&skill_lower, jd_lower) {
        REQUIRED_BONUS
    } else {
        0.0
    };

    (BASE_MENTIONED_IMPORTANCE + mention_count as f64 * PER_MENTION_BONUS + bonus).min(1.0)
}

fn is_flagged_required(skill_lower: &str, jd_lower: &str) -> bool {
    [
        format!("required {skill_lower}"),
        format!("{skill_lower} required"),
        format!("mandatory {skill_lower}"),
        format!("{skill_lower} mandatory"),
        format!("must have {skill_lower}"),
        format!("essential {skill_lower}"),
    ]
    .iter()
    .any(|pattern| count_mentions(jd_lower, pattern) > 0)
}

/// Turns extracted job-description skills into weighted `Skill`s.
pub fn weigh_job_skills(
    extracted: &[ExtractedSkill],
    job_description: &str,
    critical_threshold: f64,
    estimator: &dyn LearningTimeEstimator,
) -> Result<Vec<Skill>, SkillError> {
    let jd_lower = job_description.to_lowercase();

    extracted
        .iter()
        .map(|e| {
            let importance = skill_importance(&e.name, &jd_lower);
            let is_critical = importance >= critical_threshold;
            with_estimate(
                Skill::new(&e.name, importance, is_critical, 0.0)?,
                e,
                estimator,
            )
        })
        .collect()
}

/// Turns extracted resume skills into `Skill`s with a neutral weight.
pub fn weigh_candidate_skills(
    extracted: &[ExtractedSkill],
    estimator: &dyn LearningTimeEstimator,
) -> Result<Vec<Skill>, SkillError> {
    extracted
        .iter()
        .map(|e| {
            with_estimate(
                Skill::new(&e.name, CANDIDATE_SKILL_IMPORTANCE, false, 0.0)?,
                e,
                estimator,
            )
        })
        .collect()
}

fn with_estimate(
    skill: Skill,
    extracted: &ExtractedSkill,
    estimator: &dyn LearningTimeEstimator,
) -> Result<Skill, SkillError> {
    let weeks = estimator.estimate_weeks(&skill);
    let mut skill = Skill::new(skill.name, skill.importance, skill.is_critical, weeks)?;
    skill.domain = extracted.domain.clone();
    Ok(skill)
}
