//! Candidate comparison: ranks several resumes against one job description.

use std::cmp::Ordering;

use serde::Serialize;

use crate::gap::analyzer::GapReport;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRanking {
    pub candidate_id: String,
    pub match_score: f64,
    pub skill_gap_score: f64,
    pub missing_critical_skills_count: usize,
    pub missing_skills_count: usize,
    pub additional_skills_count: usize,
}

impl CandidateRanking {
    pub fn from_report(candidate_id: impl Into<String>, report: &GapReport) -> Self {
        Self {
            candidate_id: candidate_id.into(),
            match_score: report.overall_match_score,
            skill_gap_score: report.gap_score,
            missing_critical_skills_count: report.missing_critical_count(),
            missing_skills_count: report.missing.len(),
            additional_skills_count: report.additional.len(),
        }
    }
}

/// Best first: higher match score, then fewer missing critical skills, then
/// candidate id so equal candidates keep a stable order.
pub fn rank_candidates(mut rankings: Vec<CandidateRanking>) -> Vec<CandidateRanking> {
    rankings.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
            .then(a.missing_critical_skills_count.cmp(&b.missing_critical_skills_count))
            .then_with(|| a.candidate_id.cmp(&b.candidate_id))
    });
    rankings
}
