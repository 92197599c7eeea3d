use crate::config::Config;
use crate::gap::pipeline::SkillGapEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Extraction, similarity and learning-time seams, wired once at startup.
    pub engine: SkillGapEngine,
}
