use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_MAX_SKILLS: usize = 30;
const DEFAULT_SEMANTIC_THRESHOLD: f32 = 0.7;
const DEFAULT_SEMANTIC_TIMEOUT_MS: u64 = 3000;
const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Parser configuration loaded from environment variables.
/// Every variable is optional; semantic matching stays off unless
/// `EMBEDDING_API_URL` is set.
#[derive(Debug, Clone)]
pub struct Config {
    pub max_skills: usize,
    pub semantic_threshold: f32,
    pub semantic_timeout: Duration,
    pub embedding_api_url: Option<String>,
    pub embedding_model: String,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_skills: DEFAULT_MAX_SKILLS,
            semantic_threshold: DEFAULT_SEMANTIC_THRESHOLD,
            semantic_timeout: Duration::from_millis(DEFAULT_SEMANTIC_TIMEOUT_MS),
            embedding_api_url: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms: u64 =
            parse_var(&lookup, "SEMANTIC_TIMEOUT_MS")?.unwrap_or(DEFAULT_SEMANTIC_TIMEOUT_MS);

        let semantic_threshold: f32 =
            parse_var(&lookup, "SEMANTIC_THRESHOLD")?.unwrap_or(DEFAULT_SEMANTIC_THRESHOLD);
        anyhow::ensure!(
            (0.0..=1.0).contains(&semantic_threshold),
            "SEMANTIC_THRESHOLD must be between 0.0 and 1.0, got {semantic_threshold}"
        );

        Ok(Config {
            max_skills: parse_var(&lookup, "MAX_SKILLS")?.unwrap_or(DEFAULT_MAX_SKILLS),
            semantic_threshold,
            semantic_timeout: Duration::from_millis(timeout_ms),
            embedding_api_url: lookup("EMBEDDING_API_URL").filter(|v| !v.trim().is_empty()),
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}"))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.max_skills, 30);
        assert_eq!(config.semantic_timeout, Duration::from_millis(3000));
        assert!(config.embedding_api_url.is_none());
        assert_eq!(config.embedding_model, "nomic-embed-text");
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("MAX_SKILLS", "12"),
            ("SEMANTIC_THRESHOLD", "0.85"),
            ("SEMANTIC_TIMEOUT_MS", "500"),
            ("EMBEDDING_API_URL", "http://localhost:11434"),
        ]))
        .unwrap();
        assert_eq!(config.max_skills, 12);
        assert!((config.semantic_threshold - 0.85).abs() < f32::EPSILON);
        assert_eq!(config.semantic_timeout, Duration::from_millis(500));
        assert_eq!(
            config.embedding_api_url.as_deref(),
            Some("http://localhost:11434")
        );
    }

    #[test]
    fn test_invalid_number_names_the_variable() {
        let err = Config::from_lookup(lookup_from(&[("MAX_SKILLS", "lots")])).unwrap_err();
        assert!(err.to_string().contains("MAX_SKILLS"), "got: {err}");
    }

    #[test]
    fn test_threshold_out_of_range_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("SEMANTIC_THRESHOLD", "1.5")])).is_err());
    }

    #[test]
    fn test_blank_embedding_url_disables_semantic_matching() {
        let config = Config::from_lookup(lookup_from(&[("EMBEDDING_API_URL", "  ")])).unwrap();
        assert!(config.embedding_api_url.is_none());
    }
}
