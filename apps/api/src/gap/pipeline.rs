//! Skill-gap pipeline: Extraction → weighting → `analyze_gap`.
//!
//! `SkillGapEngine` is the only stateful piece and it is read-only after
//! startup; every call is an independent, deterministic computation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::gap::analyzer::{analyze_gap, GapReport, GapThresholds};
use crate::gap::extractor::SkillExtractor;
use crate::gap::placeholder::{
    placeholder_candidate_skills, placeholder_job_skills, placeholder_profile, SeededRng,
};
use crate::gap::similarity::SkillSimilarity;
use crate::gap::weighting::{weigh_candidate_skills, weigh_job_skills};
use crate::models::skill::Skill;
use crate::plan::learning_time::LearningTimeEstimator;

pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.85;

const DEGRADED_WARNING: &str =
    "Skill extraction is unavailable; results are based on a generated placeholder profile.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub thresholds: GapThresholds,
    /// Job skills at or above this importance are critical.
    pub critical_threshold: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            thresholds: GapThresholds::default(),
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
        }
    }
}

/// Weighted skills for one (resume, job description) pair.
#[derive(Debug, Clone)]
pub struct SkillProfile {
    pub candidate_skills: Vec<Skill>,
    pub job_skills: Vec<Skill>,
    /// True when extraction failed and a placeholder profile stands in.
    pub generated: bool,
    pub warnings: Vec<String>,
}

/// Job-side skills, shared across candidates when comparing.
#[derive(Debug, Clone)]
pub struct JobProfile {
    pub skills: Vec<Skill>,
    pub generated: bool,
}

#[derive(Clone)]
pub struct SkillGapEngine {
    extractor: Arc<dyn SkillExtractor>,
    similarity: Arc<dyn SkillSimilarity>,
    learning_times: Arc<dyn LearningTimeEstimator>,
    settings: EngineSettings,
}

impl SkillGapEngine {
    pub fn new(
        extractor: Arc<dyn SkillExtractor>,
        similarity: Arc<dyn SkillSimilarity>,
        learning_times: Arc<dyn LearningTimeEstimator>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            extractor,
            similarity,
            learning_times,
            settings,
        }
    }

    pub fn extractor_backend(&self) -> &'static str {
        self.extractor.backend()
    }

    /// Extracts and weighs both sides. Extraction failures degrade to a
    /// placeholder profile seeded from the request text; only malformed skill
    /// records surface as errors.
    pub async fn build_profile(
        &self,
        candidate_resume: &str,
        job_description: &str,
    ) -> Result<SkillProfile, AppError> {
        let extracted = tokio::try_join!(
            self.extractor.extract(candidate_resume),
            self.extractor.extract(job_description)
        );

        match extracted {
            Ok((candidate, job)) => {
                let estimator = self.learning_times.as_ref();
                let profile = SkillProfile {
                    candidate_skills: weigh_candidate_skills(&candidate, estimator)?,
                    job_skills: weigh_job_skills(
                        &job,
                        job_description,
                        self.settings.critical_threshold,
                        estimator,
                    )?,
                    generated: false,
                    warnings: Vec::new(),
                };
                debug!(
                    candidate_skills = profile.candidate_skills.len(),
                    job_skills = profile.job_skills.len(),
                    backend = self.extractor.backend(),
                    "Extracted skill profile"
                );
                Ok(profile)
            }
            Err(e) => {
                warn!("Skill extraction failed, using placeholder profile: {e}");
                let mut rng = SeededRng::from_text(&[candidate_resume, job_description]);
                let placeholder = placeholder_profile(
                    &mut rng,
                    self.settings.critical_threshold,
                    self.learning_times.as_ref(),
                )?;
                Ok(SkillProfile {
                    candidate_skills: placeholder.candidate_skills,
                    job_skills: placeholder.job_skills,
                    generated: true,
                    warnings: vec![DEGRADED_WARNING.to_string()],
                })
            }
        }
    }

    pub async fn job_profile(&self, job_description: &str) -> Result<JobProfile, AppError> {
        match self.extractor.extract(job_description).await {
            Ok(job) => Ok(JobProfile {
                skills: weigh_job_skills(
                    &job,
                    job_description,
                    self.settings.critical_threshold,
                    self.learning_times.as_ref(),
                )?,
                generated: false,
            }),
            Err(e) => {
                warn!("Job skill extraction failed, using placeholder skills: {e}");
                let mut rng = SeededRng::from_text(&[job_description]);
                Ok(JobProfile {
                    skills: placeholder_job_skills(
                        &mut rng,
                        self.settings.critical_threshold,
                        self.learning_times.as_ref(),
                    )?,
                    generated: true,
                })
            }
        }
    }

    /// Candidate skills for one resume. The bool is true when a placeholder was used.
    pub async fn candidate_skills(
        &self,
        candidate_resume: &str,
        job: &JobProfile,
    ) -> Result<(Vec<Skill>, bool), AppError> {
        match self.extractor.extract(candidate_resume).await {
            Ok(extracted) => Ok((
                weigh_candidate_skills(&extracted, self.learning_times.as_ref())?,
                false,
            )),
            Err(e) => {
                warn!("Resume skill extraction failed, using placeholder skills: {e}");
                let mut rng = SeededRng::from_text(&[candidate_resume]);
                let skills = placeholder_candidate_skills(
                    &mut rng,
                    &job.skills,
                    self.learning_times.as_ref(),
                )?;
                Ok((skills, true))
            }
        }
    }

    pub fn analyze(&self, candidate_skills: &[Skill], job_skills: &[Skill]) -> GapReport {
        analyze_gap(
            candidate_skills,
            job_skills,
            self.similarity.as_ref(),
            &self.settings.thresholds,
        )
    }

    pub fn degraded_warning() -> &'static str {
        DEGRADED_WARNING
    }
}
