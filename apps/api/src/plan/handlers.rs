use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::gap::handlers::{require_text, round2, SkillView};
use crate::plan::learning_time::StatedEstimate;
use crate::plan::reporter::{summarize, WeeklyActivity};
use crate::plan::resources::{resources_for, TrainingResources};
use crate::plan::scheduler::{plan_for_report, DevelopmentPlan, ScheduleEntry};
use crate::state::AppState;

/// Ten years; longer horizons are rejected rather than rendered week by week.
pub const MAX_TIMEFRAME_WEEKS: i64 = 520;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentPlanRequest {
    #[serde(default, alias = "candidate_resume")]
    pub candidate_resume: Option<String>,
    #[serde(default, alias = "job_description")]
    pub job_description: Option<String>,
    /// Kept loose so non-integers surface as validation errors, not as
    /// body rejections.
    #[serde(default, alias = "timeframe_weeks")]
    pub timeframe_weeks: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleEntryView {
    pub skill: String,
    pub importance: f64,
    pub is_critical: bool,
    pub start_week: i64,
    pub end_week: i64,
    pub duration_weeks: i64,
    pub desired_weeks: i64,
    pub is_partial_training: bool,
    pub resources: TrainingResources,
}

impl From<&ScheduleEntry> for ScheduleEntryView {
    fn from(e: &ScheduleEntry) -> Self {
        Self {
            skill: e.skill.name.clone(),
            importance: round2(e.skill.importance),
            is_critical: e.skill.is_critical,
            start_week: e.start_week,
            end_week: e.end_week,
            duration_weeks: e.duration_weeks,
            desired_weeks: e.desired_weeks,
            is_partial_training: e.is_partial_training,
            resources: resources_for(&e.skill.name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DevelopmentPlanResponse {
    pub skill_gap_score_before: f64,
    pub estimated_skill_gap_score_after: f64,
    pub skills_covered: usize,
    pub skills_not_covered: usize,
    pub total_missing_skills: usize,
    pub critical_skills_covered: usize,
    pub critical_skills_not_covered: usize,
    pub total_learning_time_required: f64,
    pub timeframe_available: i64,
    pub development_plan: Vec<ScheduleEntryView>,
    pub unscheduled_skills: Vec<SkillView>,
    pub weekly_activity: Vec<WeeklyActivity>,
    pub generated: bool,
    pub warnings: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl DevelopmentPlanResponse {
    fn from_plan(plan: &DevelopmentPlan, generated: bool, warnings: Vec<String>) -> Self {
        Self {
            skill_gap_score_before: round2(plan.gap_score_before),
            estimated_skill_gap_score_after: round2(plan.gap_score_after_estimate),
            skills_covered: plan.skills_covered,
            skills_not_covered: plan.skills_not_covered,
            total_missing_skills: plan.skills_covered + plan.skills_not_covered,
            critical_skills_covered: plan.critical_skills_covered,
            critical_skills_not_covered: plan.critical_skills_not_covered,
            total_learning_time_required: plan.total_learning_weeks_required,
            timeframe_available: plan.horizon_weeks,
            development_plan: plan.entries.iter().map(ScheduleEntryView::from).collect(),
            unscheduled_skills: plan.unscheduled.iter().map(SkillView::from).collect(),
            weekly_activity: summarize(plan),
            generated,
            warnings,
            timestamp: Utc::now(),
        }
    }
}

/// Resolves the requested horizon. Absent or null falls back to `default`;
/// integral floats such as `4.0` are accepted, anything else is rejected.
/// Non-positive horizons are valid and yield an empty plan.
pub fn parse_timeframe(value: Option<&Value>, default: i64) -> Result<i64, AppError> {
    let invalid = || AppError::Validation("timeframeWeeks must be an integer".to_string());

    let weeks = match value {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.is_finite() && f.fract() == 0.0 => {
                if f > MAX_TIMEFRAME_WEEKS as f64 {
                    i64::MAX
                } else {
                    // saturates for large negatives
                    f as i64
                }
            }
            _ => return Err(invalid()),
        },
        Some(_) => return Err(invalid()),
    };

    if weeks > MAX_TIMEFRAME_WEEKS {
        return Err(AppError::Validation(format!(
            "timeframeWeeks must be at most {MAX_TIMEFRAME_WEEKS}"
        )));
    }
    Ok(weeks)
}

/// POST /skill-gap/development-plan
pub async fn handle_development_plan(
    State(state): State<AppState>,
    Json(req): Json<DevelopmentPlanRequest>,
) -> Result<Json<DevelopmentPlanResponse>, AppError> {
    let resume = require_text("candidateResume", &req.candidate_resume)?;
    let job_description = require_text("jobDescription", &req.job_description)?;
    let horizon_weeks = parse_timeframe(
        req.timeframe_weeks.as_ref(),
        state.config.default_timeframe_weeks,
    )?;

    let profile = state.engine.build_profile(resume, job_description).await?;
    let report = state
        .engine
        .analyze(&profile.candidate_skills, &profile.job_skills);
    // Estimates were resolved during weighting; the scheduler reads them back.
    let plan = plan_for_report(&report, horizon_weeks, &StatedEstimate);

    info!(
        horizon_weeks,
        scheduled = plan.skills_covered,
        unscheduled = plan.skills_not_covered,
        gap_before = plan.gap_score_before,
        gap_after = plan.gap_score_after_estimate,
        generated = profile.generated,
        "Development plan generated"
    );

    Ok(Json(DevelopmentPlanResponse::from_plan(
        &plan,
        profile.generated,
        profile.warnings,
    )))
}
