//! Scheduler: fits missing skills into a bounded learning horizon.
//!
//! Algorithm:
//! 1. Stable-sort missing skills by (is_critical desc, importance desc).
//! 2. Walk a single week cursor starting at week 1. Each skill gets
//!    `desired = max(1, ceil(estimate))` weeks, truncated at the horizon
//!    (a truncated window is *partial training*).
//! 3. Once the cursor passes the horizon, every remaining skill is unscheduled.
//!
//! The allocation is strictly sequential: one learner, one track of attention.
//! `DevelopmentPlan` itself does not forbid overlapping windows across skills,
//! which leaves room for parallel tracks later.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use crate::gap::analyzer::{weighted_match_score, GapReport};
use crate::models::skill::Skill;
use crate::plan::learning_time::LearningTimeEstimator;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub skill: Skill,
    pub start_week: i64,
    pub end_week: i64,
    /// `end_week - start_week + 1`
    pub duration_weeks: i64,
    /// Whole weeks the skill needs; `duration_weeks < desired_weeks` iff partial.
    pub desired_weeks: i64,
    pub is_partial_training: bool,
}

impl ScheduleEntry {
    pub fn contains_week(&self, week: i64) -> bool {
        (self.start_week..=self.end_week).contains(&week)
    }

    /// Share of the desired training this window delivers, in (0, 1].
    pub fn completion_ratio(&self) -> f64 {
        if self.desired_weeks <= 0 {
            return 1.0;
        }
        (self.duration_weeks as f64 / self.desired_weeks as f64).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevelopmentPlan {
    pub entries: Vec<ScheduleEntry>,
    /// Skills that did not fit, in priority order.
    pub unscheduled: Vec<Skill>,
    pub skills_covered: usize,
    pub skills_not_covered: usize,
    pub critical_skills_covered: usize,
    pub critical_skills_not_covered: usize,
    /// Demand in whole weeks across *all* missing skills, independent of the horizon.
    pub total_learning_weeks_required: f64,
    pub horizon_weeks: i64,
    pub gap_score_before: f64,
    pub gap_score_after_estimate: f64,
}

/// Importance already credited before training, and the role's total importance.
/// Lets the scheduler project a post-training gap score without the full report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBaseline {
    pub matched_importance: f64,
    pub total_importance: f64,
}

impl ScoreBaseline {
    pub fn from_report(report: &GapReport) -> Self {
        Self {
            matched_importance: report.matched_importance(),
            total_importance: report.total_importance(),
        }
    }

    pub fn gap_score(&self, extra_credit: f64) -> f64 {
        100.0 - weighted_match_score(self.matched_importance + extra_credit, self.total_importance)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Whole weeks a skill needs: `ceil(estimate)`, at least 1. Non-finite
/// estimates count as a single week.
pub fn desired_weeks(estimate: f64) -> i64 {
    if !estimate.is_finite() || estimate <= 1.0 {
        return 1;
    }
    // `as` saturates for huge values
    estimate.ceil() as i64
}

/// Stable priority order: critical first, then higher importance.
pub fn prioritize(missing: &[Skill]) -> Vec<&Skill> {
    let mut ordered: Vec<&Skill> = missing.iter().collect();
    ordered.sort_by(|a, b| {
        b.is_critical.cmp(&a.is_critical).then_with(|| {
            b.importance
                .partial_cmp(&a.importance)
                .unwrap_or(Ordering::Equal)
        })
    });
    ordered
}

pub fn schedule(
    missing: &[Skill],
    horizon_weeks: i64,
    estimator: &dyn LearningTimeEstimator,
    baseline: &ScoreBaseline,
) -> DevelopmentPlan {
    let mut entries = Vec::new();
    let mut unscheduled = Vec::new();
    let mut total_learning_weeks_required = 0.0;
    // `None` once the last representable week has been handed out.
    let mut next_week: Option<i64> = Some(1);

    for skill in prioritize(missing) {
        let desired = desired_weeks(estimator.estimate_weeks(skill));
        total_learning_weeks_required += desired as f64;

        let current_week = match next_week {
            Some(week) if week <= horizon_weeks => week,
            _ => {
                unscheduled.push(skill.clone());
                continue;
            }
        };

        let end_week = horizon_weeks.min(current_week.saturating_add(desired - 1));
        let duration_weeks = end_week - current_week + 1;
        entries.push(ScheduleEntry {
            skill: skill.clone(),
            start_week: current_week,
            end_week,
            duration_weeks,
            desired_weeks: desired,
            is_partial_training: duration_weeks < desired,
        });
        next_week = end_week.checked_add(1);
    }

    let critical_skills_covered = entries.iter().filter(|e| e.skill.is_critical).count();
    let critical_skills_not_covered = unscheduled.iter().filter(|s| s.is_critical).count();

    let training_credit: f64 = entries
        .iter()
        .map(|e| e.skill.importance * e.completion_ratio())
        .sum();

    debug!(
        horizon_weeks,
        scheduled = entries.len(),
        unscheduled = unscheduled.len(),
        "Scheduled development plan"
    );

    DevelopmentPlan {
        skills_covered: entries.len(),
        skills_not_covered: unscheduled.len(),
        critical_skills_covered,
        critical_skills_not_covered,
        total_learning_weeks_required,
        horizon_weeks,
        gap_score_before: baseline.gap_score(0.0),
        gap_score_after_estimate: baseline.gap_score(training_credit),
        entries,
        unscheduled,
    }
}

/// Schedules a report's missing skills, projecting scores against the full role.
pub fn plan_for_report(
    report: &GapReport,
    horizon_weeks: i64,
    estimator: &dyn LearningTimeEstimator,
) -> DevelopmentPlan {
    schedule(
        &report.missing,
        horizon_weeks,
        estimator,
        &ScoreBaseline::from_report(report),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::plan::learning_time::StatedEstimate;
    use proptest::prelude::*;

    fn arb_skill() -> impl Strategy<Value = Skill> {
        (
            0usize..1000,
            any::<bool>(),
            0.0..=1.0f64,
            prop_oneof![Just(0.0), 0.0..60.0f64, Just(1e300)],
        )
            .prop_map(|(id, critical, importance, weeks)| {
                Skill::new(format!("skill-{id}"), importance, critical, weeks).unwrap()
            })
    }

    fn arb_horizon() -> impl Strategy<Value = i64> {
        prop_oneof![
            -20i64..=0,
            1i64..=104,
            Just(i64::MAX - 1),
            Just(i64::MAX),
        ]
    }

    proptest! {
        /// Coverage, horizon bounds, non-overlap, priority order and score bounds
        /// hold for any skill list and horizon.
        #[test]
        fn schedule_is_well_formed(
            missing in prop::collection::vec(arb_skill(), 0..12),
            horizon in arb_horizon(),
            matched in 0.0..5.0f64,
        ) {
            let baseline = ScoreBaseline {
                matched_importance: matched,
                total_importance: matched + missing.iter().map(|s| s.importance).sum::<f64>(),
            };
            let plan = schedule(&missing, horizon, &StatedEstimate, &baseline);

            prop_assert_eq!(plan.skills_covered + plan.skills_not_covered, missing.len());
            prop_assert_eq!(plan.entries.len(), plan.skills_covered);
            prop_assert!(plan.total_learning_weeks_required >= missing.len() as f64);
            if horizon <= 0 {
                prop_assert!(plan.entries.is_empty());
            }

            for e in &plan.entries {
                prop_assert!(1 <= e.start_week);
                prop_assert!(e.start_week <= e.end_week);
                prop_assert!(e.end_week <= horizon);
                prop_assert_eq!(e.duration_weeks, e.end_week - e.start_week + 1);
                prop_assert!(e.duration_weeks <= e.desired_weeks);
                prop_assert_eq!(e.is_partial_training, e.duration_weeks < e.desired_weeks);
            }

            for pair in plan.entries.windows(2) {
                prop_assert!(pair[0].end_week < pair[1].start_week);
                let (a, b) = (&pair[0].skill, &pair[1].skill);
                prop_assert!(a.is_critical || !b.is_critical);
                if a.is_critical == b.is_critical {
                    prop_assert!(a.importance >= b.importance);
                }
            }

            prop_assert!((0.0..=100.0).contains(&plan.gap_score_before));
            prop_assert!((0.0..=100.0).contains(&plan.gap_score_after_estimate));
            prop_assert!(plan.gap_score_after_estimate <= plan.gap_score_before + 1e-9);
            if missing.is_empty() {
                prop_assert_eq!(plan.gap_score_after_estimate, plan.gap_score_before);
            }
        }
    }
}
