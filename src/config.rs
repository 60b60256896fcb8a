use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_SUMMARY_SENTENCES: usize = 2;
const DEFAULT_CONCURRENCY_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub rules_path: Option<PathBuf>,
    pub summary_sentences: usize,
    pub concurrency_limit: usize,
    pub show_progress: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let rules_path = env::var("MAILTRIAGE_RULES_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let summary_sentences = match env::var("MAILTRIAGE_SUMMARY_SENTENCES") {
            Ok(v) => parse_summary_sentences(&v)?,
            Err(_) => DEFAULT_SUMMARY_SENTENCES,
        };

        let concurrency_limit = match env::var("MAILTRIAGE_CONCURRENCY_LIMIT") {
            Ok(v) => parse_concurrency_limit(&v)?,
            Err(_) => DEFAULT_CONCURRENCY_LIMIT,
        };

        let show_progress = env::var("MAILTRIAGE_SHOW_PROGRESS")
            .ok()
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            rules_path,
            summary_sentences,
            concurrency_limit,
            show_progress,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_path: None,
            summary_sentences: DEFAULT_SUMMARY_SENTENCES,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            show_progress: false,
        }
    }
}

fn parse_summary_sentences(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(Error::Config(format!(
            "MAILTRIAGE_SUMMARY_SENTENCES must be at least 1, got '{}'",
            value
        ))),
    }
}

fn parse_concurrency_limit(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(Error::Config(format!(
            "MAILTRIAGE_CONCURRENCY_LIMIT must be at least 1, got '{}'",
            value
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub summary_sentences: usize,
    pub concurrency_limit: usize,
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            summary_sentences: config.summary_sentences,
            concurrency_limit: config.concurrency_limit,
            show_progress: config.show_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrency_limit_rejects_zero() {
        assert!(matches!(parse_concurrency_limit("0"), Err(Error::Config(_))));
        assert!(matches!(parse_concurrency_limit("many"), Err(Error::Config(_))));
        assert_eq!(parse_concurrency_limit(" 8 ").unwrap(), 8);
    }

    #[test]
    fn test_summary_sentences_rejects_zero() {
        assert!(matches!(parse_summary_sentences("0"), Err(Error::Config(_))));
        assert!(matches!(parse_summary_sentences("-1"), Err(Error::Config(_))));
        assert_eq!(parse_summary_sentences("3").unwrap(), 3);
    }

    #[test]
    fn test_pipeline_config_from_config() {
        let config = Config {
            rules_path: None,
            summary_sentences: 3,
            concurrency_limit: 2,
            show_progress: true,
        };
        let pipeline = PipelineConfig::from(&config);
        assert_eq!(pipeline.summary_sentences, 3);
        assert_eq!(pipeline.concurrency_limit, 2);
        assert!(pipeline.show_progress);
    }

    #[test]
    fn test_default_pipeline_config() {
        let pipeline = PipelineConfig::default();
        assert_eq!(pipeline.summary_sentences, DEFAULT_SUMMARY_SENTENCES);
        assert_eq!(pipeline.concurrency_limit, DEFAULT_CONCURRENCY_LIMIT);
        assert!(!pipeline.show_progress);
    }
}
