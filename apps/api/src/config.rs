use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::MatchStrategy;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub staging_dir: PathBuf,
    pub match_threshold: f64,
    pub match_strategy: MatchStrategy,
    /// Enables the remote AI-content detector when set.
    pub gptzero_api_key: Option<String>,
    pub detector_timeout_secs: u64,
    pub name_entity_fallback: bool,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            staging_dir: PathBuf::from("./staging"),
            match_threshold: 0.95,
            match_strategy: MatchStrategy::Greedy,
            gptzero_api_key: None,
            detector_timeout_secs: 10,
            name_entity_fallback: false,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let match_threshold = parse_env("MATCH_THRESHOLD", defaults.match_threshold)?;
        if !(0.0..=1.0).contains(&match_threshold) {
            bail!("MATCH_THRESHOLD must be between 0 and 1, got {match_threshold}");
        }

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            staging_dir: std::env::var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.staging_dir),
            match_threshold,
            match_strategy: parse_env("MATCH_STRATEGY", defaults.match_strategy)?,
            gptzero_api_key: optional_env("GPTZERO_API_KEY"),
            detector_timeout_secs: parse_env("DETECTOR_TIMEOUT_SECS", defaults.detector_timeout_secs)?,
            name_entity_fallback: parse_env("NAME_ENTITY_FALLBACK", defaults.name_entity_fallback)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

/// Unset or blank variables are treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.match_threshold, 0.95);
        assert_eq!(config.match_strategy, MatchStrategy::Greedy);
        assert!(config.gptzero_api_key.is_none());
        assert!(!config.name_entity_fallback);
    }

    #[test]
    fn test_parse_env_reads_and_rejects() {
        std::env::set_var("RESUME_ANALYZER_TEST_PORT", "9090");
        assert_eq!(parse_env("RESUME_ANALYZER_TEST_PORT", 8080u16).unwrap(), 9090);

        std::env::set_var("RESUME_ANALYZER_TEST_BAD_PORT", "not-a-port");
        let err = parse_env("RESUME_ANALYZER_TEST_BAD_PORT", 8080u16).unwrap_err();
        assert!(err.to_string().contains("RESUME_ANALYZER_TEST_BAD_PORT"));

        assert_eq!(parse_env("RESUME_ANALYZER_TEST_UNSET", 7u64).unwrap(), 7);
    }

    #[test]
    fn test_blank_optional_env_is_absent() {
        std::env::set_var("RESUME_ANALYZER_TEST_BLANK", "  ");
        assert_eq!(optional_env("RESUME_ANALYZER_TEST_BLANK"), None);
    }
}
