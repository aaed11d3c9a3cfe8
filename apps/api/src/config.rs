use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::embedding::http::HttpEmbeddingConfig;
use crate::llm_client::LlmConfig;
use crate::matching::report::DEFAULT_MISSING_KEYWORD_CAP;
use crate::tailoring::DEFAULT_TOP_K;

const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub embedding_base_url: String,
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
    pub embedding_timeout: Duration,
    pub llm_base_url: String,
    pub llm_model: String,
    /// Generation is disabled when unset.
    pub llm_api_key: Option<String>,
    pub missing_keyword_cap: usize,
    pub top_k_fragments: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            embedding_base_url: env_or("EMBEDDING_BASE_URL", DEFAULT_API_BASE_URL),
            embedding_model: require_env("EMBEDDING_MODEL")?,
            embedding_api_key: optional_env("EMBEDDING_API_KEY"),
            embedding_timeout: Duration::from_secs(parse_env("EMBEDDING_TIMEOUT_SECS", 30)?),
            llm_base_url: env_or("LLM_BASE_URL", DEFAULT_API_BASE_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            llm_api_key: optional_env("LLM_API_KEY"),
            missing_keyword_cap: parse_env("MISSING_KEYWORD_CAP", DEFAULT_MISSING_KEYWORD_CAP)?,
            top_k_fragments: parse_env("TOP_K_FRAGMENTS", DEFAULT_TOP_K)?,
        })
    }

    pub fn embedding(&self) -> HttpEmbeddingConfig {
        HttpEmbeddingConfig {
            base_url: self.embedding_base_url.clone(),
            model: self.embedding_model.clone(),
            api_key: self.embedding_api_key.clone(),
            request_timeout: self.embedding_timeout,
        }
    }

    /// `None` when no LLM API key is configured.
    pub fn llm(&self) -> Option<LlmConfig> {
        self.llm_api_key.as_ref().map(|api_key| LlmConfig {
            base_url: self.llm_base_url.clone(),
            model: self.llm_model.clone(),
            api_key: api_key.clone(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
