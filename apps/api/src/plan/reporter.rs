//! Plan Reporter: displayable views over a `DevelopmentPlan`.
//!
//! Pure functions of their inputs; recomputed for every response.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::skill::Skill;
use crate::plan::learning_time::estimated_time_label;
use crate::plan::resources::{resources_for, TrainingResources};
use crate::plan::scheduler::DevelopmentPlan;

/// One row of the week-by-week ("Gantt") view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyActivity {
    pub week: i64,
    pub active_skill_names: Vec<String>,
    pub activity_count: usize,
}

/// One row per week in `[1, horizon_weeks]`, listing every entry whose window
/// contains that week. Empty for a non-positive horizon.
pub fn summarize(plan: &DevelopmentPlan) -> Vec<WeeklyActivity> {
    (1..=plan.horizon_weeks.max(0))
        .map(|week| {
            let active_skill_names: Vec<String> = plan
                .entries
                .iter()
                .filter(|e| e.contains_week(week))
                .map(|e| e.skill.name.clone())
                .collect();
            WeeklyActivity {
                week,
                activity_count: active_skill_names.len(),
                active_skill_names,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingRecommendation {
    pub skill: String,
    pub importance: f64,
    pub is_critical: bool,
    pub estimated_time: String,
    pub resources: TrainingResources,
}

/// Recommendations for missing skills, critical first then by importance.
pub fn training_recommendations(missing: &[Skill]) -> Vec<TrainingRecommendation> {
    let mut ordered: Vec<&Skill> = missing.iter().collect();
    ordered.sort_by(|a, b| {
        b.is_critical.cmp(&a.is_critical).then_with(|| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(Ordering::Equal)
        })
    });

    ordered
        .into_iter()
        .map(|s| TrainingRecommendation {
            skill: s.name.clone(),
            importance: s.importance,
            is_critical: s.is_critical,
            estimated_time: estimated_time_label(s.estimated_weeks),
            resources: resources_for(&s.name),
        })
        .collect()
}
