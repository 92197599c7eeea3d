use anyhow::{bail, Context, Result};

use crate::gap::analyzer::{DEFAULT_RELATEDNESS_THRESHOLD, DEFAULT_SIMILARITY_THRESHOLD};
use crate::gap::pipeline::DEFAULT_CRITICAL_THRESHOLD;

pub const DEFAULT_TIMEFRAME_WEEKS: i64 = 12;

/// Application configuration loaded from environment variables.
/// Startup fails if a value is malformed or LLM extraction is enabled without a key.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub similarity_threshold: f64,
    pub relatedness_threshold: f64,
    pub critical_importance_threshold: f64,
    pub default_timeframe_weeks: i64,
    pub enable_llm_extraction: bool,
    pub anthropic_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            relatedness_threshold: DEFAULT_RELATEDNESS_THRESHOLD,
            critical_importance_threshold: DEFAULT_CRITICAL_THRESHOLD,
            default_timeframe_weeks: DEFAULT_TIMEFRAME_WEEKS,
            enable_llm_extraction: false,
            anthropic_api_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let config = Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            similarity_threshold: parse_or(
                &lookup,
                "SIMILARITY_THRESHOLD",
                defaults.similarity_threshold,
            )?,
            relatedness_threshold: parse_or(
                &lookup,
                "RELATEDNESS_THRESHOLD",
                defaults.relatedness_threshold,
            )?,
            critical_importance_threshold: parse_or(
                &lookup,
                "CRITICAL_IMPORTANCE_THRESHOLD",
                defaults.critical_importance_threshold,
            )?,
            default_timeframe_weeks: parse_or(
                &lookup,
                "DEFAULT_TIMEFRAME_WEEKS",
                defaults.default_timeframe_weeks,
            )?,
            enable_llm_extraction: parse_flag(&lookup, "ENABLE_LLM_EXTRACTION")?,
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("SIMILARITY_THRESHOLD", self.similarity_threshold),
            ("RELATEDNESS_THRESHOLD", self.relatedness_threshold),
            ("CRITICAL_IMPORTANCE_THRESHOLD", self.critical_importance_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("{key} must be within [0, 1], got {value}");
            }
        }
        if self.default_timeframe_weeks <= 0 {
            bail!(
                "DEFAULT_TIMEFRAME_WEEKS must be positive, got {}",
                self.default_timeframe_weeks
            );
        }
        if self.enable_llm_extraction && self.anthropic_api_key.is_none() {
            bail!("ANTHROPIC_API_KEY is required when ENABLE_LLM_EXTRACTION is set");
        }
        Ok(())
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<bool> {
    match lookup(key).map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some(other) => bail!("{key} must be a boolean, got '{other}'"),
    }
}
