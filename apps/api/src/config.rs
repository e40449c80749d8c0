use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::documents::extract::DEFAULT_MAX_UPLOAD_BYTES;
use crate::generation::formatter::SignatureConfig;
use crate::generation::quality::QualityConfig;
use crate::llm_client::{GenerationParams, DEFAULT_MODEL, DEFAULT_OLLAMA_HOST, DEFAULT_TIMEOUT_SECS};
use crate::portfolio::fetcher::DEFAULT_GITHUB_API_BASE;
use crate::research::cache::DEFAULT_CACHE_TTL_SECS;
use crate::research::source::DEFAULT_WIKIPEDIA_API_BASE;

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub ollama_host: String,
    pub model_name: String,
    pub generation: GenerationParams,
    pub llm_timeout_secs: u64,
    pub collaborator_timeout_secs: u64,
    pub research_cache_dir: PathBuf,
    pub research_cache_ttl_secs: i64,
    pub wikipedia_api_base: String,
    pub github_api_base: String,
    pub user_agent: String,
    pub max_upload_bytes: usize,
    pub signature: SignatureConfig,
    pub quality: QualityConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = GenerationParams::default();
        let quality = QualityConfig::default();

        Ok(Config {
            port: parse_or(&var, "PORT", 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            ollama_host: var("OLLAMA_HOST").unwrap_or_else(|| DEFAULT_OLLAMA_HOST.to_string()),
            model_name: var("MODEL_NAME").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            generation: GenerationParams {
                temperature: parse_or(&var, "TEMPERATURE", defaults.temperature)?,
                top_p: parse_or(&var, "TOP_P", defaults.top_p)?,
                top_k: parse_or(&var, "TOP_K", defaults.top_k)?,
                num_ctx: parse_or(&var, "NUM_CTX", defaults.num_ctx)?,
                num_predict: parse_or(&var, "MAX_TOKENS", defaults.num_predict)?,
                stop: defaults.stop,
            },
            llm_timeout_secs: parse_or(&var, "LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            collaborator_timeout_secs: parse_or(&var, "COLLABORATOR_TIMEOUT_SECS", 15)?,
            research_cache_dir: var("RESEARCH_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".cache/research")),
            research_cache_ttl_secs: parse_or(
                &var,
                "RESEARCH_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )?,
            wikipedia_api_base: var("WIKIPEDIA_API_BASE")
                .unwrap_or_else(|| DEFAULT_WIKIPEDIA_API_BASE.to_string()),
            github_api_base: var("GITHUB_API_BASE")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_BASE.to_string()),
            user_agent: var("USER_AGENT").unwrap_or_else(|| {
                format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
            }),
            max_upload_bytes: parse_or(&var, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            signature: SignatureConfig {
                name: var("SIGNATURE_NAME"),
                phone: var("SIGNATURE_PHONE"),
                email: var("SIGNATURE_EMAIL"),
            },
            quality: QualityConfig {
                min_readability: parse_or(&var, "QA_MIN_READABILITY", quality.min_readability)?,
                max_readability: parse_or(&var, "QA_MAX_READABILITY", quality.max_readability)?,
                min_words: parse_or(&var, "QA_MIN_WORDS", quality.min_words)?,
                max_words: parse_or(&var, "QA_MAX_WORDS", quality.max_words)?,
            },
        })
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.model_name, "llama3.2:latest");
        assert_eq!(config.ollama_host, "http://localhost:11434");
        assert_eq!(config.generation, GenerationParams::default());
        assert_eq!(config.llm_timeout_secs, 120);
        assert_eq!(config.collaborator_timeout_secs, 15);
        assert_eq!(config.research_cache_ttl_secs, 86_400);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.signature, SignatureConfig::default());
        assert_eq!(config.quality, QualityConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("MODEL_NAME", "mistral:7b"),
            ("TEMPERATURE", "0.2"),
            ("MAX_TOKENS", "512"),
            ("SIGNATURE_NAME", "Ada Lovelace"),
            ("QA_MAX_WORDS", "500"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.model_name, "mistral:7b");
        assert_eq!(config.generation.temperature, 0.2);
        assert_eq!(config.generation.num_predict, 512);
        assert_eq!(config.signature.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(config.quality.max_words, 500);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[("PORT", "  "), ("SIGNATURE_EMAIL", "")]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.signature.email.is_none());
    }

    #[test]
    fn test_invalid_value_is_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
