use std::cmp::Ordering;
use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::gap::analyzer::{domain_rollup, AdditionalSkill, DomainScore, GapReport, MatchedSkill};
use crate::gap::compare::{rank_candidates, CandidateRanking};
use crate::gap::pipeline::SkillGapEngine;
use crate::models::skill::Skill;
use crate::plan::reporter::{training_recommendations, TrainingRecommendation};
use crate::plan::resources::{resources_for, TrainingResources};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapRequest {
    #[serde(default, alias = "candidate_resume")]
    pub candidate_resume: Option<String>,
    #[serde(default, alias = "job_description")]
    pub job_description: Option<String>,
    #[serde(default, alias = "candidate_id")]
    pub candidate_id: Option<String>,
    #[serde(default, alias = "job_id")]
    pub job_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    /// candidate id → resume text
    #[serde(default, alias = "candidate_resumes")]
    pub candidate_resumes: BTreeMap<String, String>,
    #[serde(default, alias = "job_description")]
    pub job_description: Option<String>,
    #[serde(default, alias = "job_id")]
    pub job_id: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// Response-side skill; numbers rounded to 2 decimals.
#[derive(Debug, Clone, Serialize)]
pub struct SkillView {
    pub name: String,
    pub importance: f64,
    pub is_critical: bool,
    pub estimated_weeks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl From<&Skill> for SkillView {
    fn from(s: &Skill) -> Self {
        Self {
            name: s.name.clone(),
            importance: round2(s.importance),
            is_critical: s.is_critical,
            estimated_weeks: round2(s.estimated_weeks),
            domain: s.domain.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchedSkillView {
    pub job_skill: SkillView,
    pub candidate_skill_name: String,
    pub similarity: f64,
}

impl From<&MatchedSkill> for MatchedSkillView {
    fn from(m: &MatchedSkill) -> Self {
        Self {
            job_skill: SkillView::from(&m.job_skill),
            candidate_skill_name: m.candidate_skill_name.clone(),
            similarity: round2(m.similarity),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdditionalSkillView {
    pub skill: SkillView,
    pub best_related_job_skill: Option<String>,
    pub similarity: f64,
    pub relevance: f64,
}

impl From<&AdditionalSkill> for AdditionalSkillView {
    fn from(a: &AdditionalSkill) -> Self {
        Self {
            skill: SkillView::from(&a.skill),
            best_related_job_skill: a.best_related_job_skill.clone(),
            similarity: round2(a.similarity),
            relevance: round2(a.relevance),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SkillGapResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub overall_match_score: f64,
    pub skill_gap_score: f64,
    pub matched_skills: Vec<MatchedSkillView>,
    pub missing_skills: Vec<SkillView>,
    pub additional_skills: Vec<AdditionalSkillView>,
    pub critical_skills: Vec<String>,
    pub skill_gap_by_domain: BTreeMap<String, DomainScore>,
    pub training_recommendations: Vec<TrainingRecommendation>,
    pub candidate_skills_count: usize,
    pub job_skills_count: usize,
    pub matched_skills_count: usize,
    pub missing_skills_count: usize,
    pub additional_skills_count: usize,
    pub critical_skills_count: usize,
    pub missing_critical_skills_count: usize,
    pub generated: bool,
    pub warnings: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    pub job_skills: Vec<SkillView>,
    pub critical_skills: Vec<String>,
    pub candidate_count: usize,
    pub ranked_candidates: Vec<CandidateRanking>,
    /// Full per-candidate report, keyed by candidate id.
    pub detailed_analyses: BTreeMap<String, SkillGapResponse>,
    pub generated: bool,
    pub warnings: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ResourcesResponse {
    pub skill: String,
    pub curated: bool,
    pub resources: TrainingResources,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Returns the trimmed text, or a validation error naming the request field.
pub(crate) fn require_text<'a>(field: &str, value: &'a Option<String>) -> Result<&'a str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(AppError::Validation(format!("{field} must be a non-empty string"))),
    }
}

fn by_importance_desc(a: &Skill, b: &Skill) -> Ordering {
    b.importance
        .partial_cmp(&a.importance)
        .unwrap_or(Ordering::Equal)
}

fn build_skill_gap_response(
    report: &GapReport,
    candidate_skills_count: usize,
    job_skills_count: usize,
    generated: bool,
    warnings: Vec<String>,
) -> SkillGapResponse {
    let mut matched: Vec<&MatchedSkill> = report.matched.iter().collect();
    matched.sort_by(|a, b| by_importance_desc(&a.job_skill, &b.job_skill));

    let mut missing: Vec<&Skill> = report.missing.iter().collect();
    missing.sort_by(|a, b| by_importance_desc(a, b));

    let mut additional: Vec<&AdditionalSkill> = report.additional.iter().collect();
    additional.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
    });

    let skill_gap_by_domain = domain_rollup(report)
        .into_iter()
        .map(|(domain, score)| {
            let rounded = DomainScore {
                match_score: round2(score.match_score),
                gap_score: round2(score.gap_score),
                ..score
            };
            (domain, rounded)
        })
        .collect();

    let training_recommendations = training_recommendations(&report.missing)
        .into_iter()
        .map(|r| TrainingRecommendation {
            importance: round2(r.importance),
            ..r
        })
        .collect();

    let critical_skills = report.critical_skill_names();

    SkillGapResponse {
        candidate_id: None,
        job_id: None,
        overall_match_score: round2(report.overall_match_score),
        skill_gap_score: round2(report.gap_score),
        matched_skills: matched.into_iter().map(MatchedSkillView::from).collect(),
        missing_skills: missing.into_iter().map(SkillView::from).collect(),
        additional_skills: additional.into_iter().map(AdditionalSkillView::from).collect(),
        critical_skills_count: critical_skills.len(),
        critical_skills,
        skill_gap_by_domain,
        training_recommendations,
        candidate_skills_count,
        job_skills_count,
        matched_skills_count: report.matched.len(),
        missing_skills_count: report.missing.len(),
        additional_skills_count: report.additional.len(),
        missing_critical_skills_count: report.missing_critical_count(),
        generated,
        warnings,
        timestamp: Utc::now(),
    }
}

fn warnings_for(generated: bool) -> Vec<String> {
    if generated {
        vec![SkillGapEngine::degraded_warning().to_string()]
    } else {
        Vec::new()
    }
}

struct Comparison {
    job_skills: Vec<Skill>,
    rankings: Vec<CandidateRanking>,
    analyses: BTreeMap<String, SkillGapResponse>,
    generated: bool,
}

async fn compare_candidates(
    engine: &SkillGapEngine,
    job_description: &str,
    job_id: Option<&str>,
    resumes: &BTreeMap<String, String>,
) -> Result<Comparison, AppError> {
    let job = engine.job_profile(job_description).await?;
    let mut generated = job.generated;
    let mut rankings = Vec::with_capacity(resumes.len());
    let mut analyses = BTreeMap::new();

    for (candidate_id, resume) in resumes {
        if resume.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "resume for candidate '{candidate_id}' must be a non-empty string"
            )));
        }
        let (skills, placeholder) = engine.candidate_skills(resume, &job).await?;
        generated |= placeholder;
        let report = engine.analyze(&skills, &job.skills);
        rankings.push(CandidateRanking::from_report(candidate_id.clone(), &report));

        let candidate_generated = job.generated || placeholder;
        let analysis = SkillGapResponse {
            candidate_id: Some(candidate_id.clone()),
            job_id: job_id.map(str::to_string),
            ..build_skill_gap_response(
                &report,
                skills.len(),
                job.skills.len(),
                candidate_generated,
                warnings_for(candidate_generated),
            )
        };
        analyses.insert(candidate_id.clone(), analysis);
    }

    Ok(Comparison {
        job_skills: job.skills,
        rankings: rank_candidates(rankings),
        analyses,
        generated,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /skill-gap
pub async fn handle_skill_gap(
    State(state): State<AppState>,
    Json(req): Json<SkillGapRequest>,
) -> Result<Json<SkillGapResponse>, AppError> {
    let resume = require_text("candidateResume", &req.candidate_resume)?;
    let job_description = require_text("jobDescription", &req.job_description)?;

    let profile = state.engine.build_profile(resume, job_description).await?;
    let report = state
        .engine
        .analyze(&profile.candidate_skills, &profile.job_skills);

    info!(
        match_score = report.overall_match_score,
        matched = report.matched.len(),
        missing = report.missing.len(),
        generated = profile.generated,
        "Skill gap analyzed"
    );

    Ok(Json(SkillGapResponse {
        candidate_id: req.candidate_id,
        job_id: req.job_id,
        ..build_skill_gap_response(
            &report,
            profile.candidate_skills.len(),
            profile.job_skills.len(),
            profile.generated,
            profile.warnings,
        )
    }))
}

/// POST /skill-gap/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(req): Json<CompareRequest>,
) -> Result<Json<CompareResponse>, AppError> {
    if req.candidate_resumes.is_empty() {
        return Err(AppError::Validation(
            "candidateResumes must contain at least one resume".to_string(),
        ));
    }
    let job_description = require_text("jobDescription", &req.job_description)?;

    let Comparison {
        job_skills,
        rankings: ranked_candidates,
        analyses: detailed_analyses,
        generated,
    } = compare_candidates(
        &state.engine,
        job_description,
        req.job_id.as_deref(),
        &req.candidate_resumes,
    )
    .await?;

    info!(
        candidates = ranked_candidates.len(),
        job_skills = job_skills.len(),
        generated,
        "Candidates compared"
    );

    let critical_skills = job_skills
        .iter()
        .filter(|s| s.is_critical)
        .map(|s| s.name.clone())
        .collect();
    Ok(Json(CompareResponse {
        job_id: req.job_id,
        job_skills: job_skills.iter().map(SkillView::from).collect(),
        critical_skills,
        candidate_count: ranked_candidates.len(),
        ranked_candidates: ranked_candidates
            .into_iter()
            .map(|r| CandidateRanking {
                match_score: round2(r.match_score),
                skill_gap_score: round2(r.skill_gap_score),
                ..r
            })
            .collect(),
        detailed_analyses,
        generated,
        warnings: warnings_for(generated),
        timestamp: Utc::now(),
    }))
}

/// GET /skill-gap/resources/:skill
pub async fn handle_resources(Path(skill): Path<String>) -> Result<Json<ResourcesResponse>, AppError> {
    let skill = skill.trim();
    if skill.is_empty() {
        return Err(AppError::Validation("skill must be a non-empty string".to_string()));
    }
    let resources = resources_for(skill);
    Ok(Json(ResourcesResponse {
        skill: skill.to_string(),
        curated: resources.is_curated(),
        resources,
    }))
}
