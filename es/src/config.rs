//! EdSkill configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main EdSkill configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Learning path generation settings
    pub generation: GenerationConfig,

    /// Sign-in settings
    pub session: SessionConfig,

    /// Log level
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

/// LLM provider configuration
///
/// `model`, `api-key-env` and `base-url` fall back to the selected provider's
/// defaults when left unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("gemini" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: Option<String>,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    /// File containing the API key, used when the environment variable is unset
    #[serde(rename = "api-key-file")]
    pub api_key_file: Option<PathBuf>,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,

    /// Output token cap per response
    ///
    /// Unset means Gemini receives no `maxOutputTokens` at all: gemini-2.5
    /// models count thinking tokens against that budget, so a tight cap can
    /// truncate the JSON document. OpenAI requests always carry the
    /// per-request budget, lowered to this cap when set.
    #[serde(rename = "max-tokens")]
    pub max_tokens: Option<u32>,

    /// HTTP transport timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: None,
            api_key_env: None,
            api_key_file: None,
            base_url: None,
            max_tokens: None,
            timeout_ms: 120_000,
        }
    }
}

/// Built-in settings for a provider
struct ProviderDefaults {
    model: &'static str,
    api_key_env: &'static str,
    base_url: &'static str,
}

static GEMINI_DEFAULTS: ProviderDefaults = ProviderDefaults {
    model: "gemini-2.5-flash",
    api_key_env: "GEMINI_API_KEY",
    base_url: "https://generativelanguage.googleapis.com",
};

static OPENAI_DEFAULTS: ProviderDefaults = ProviderDefaults {
    model: "gpt-4o-mini",
    api_key_env: "OPENAI_API_KEY",
    base_url: "https://api.openai.com",
};

impl LlmConfig {
    fn provider_defaults(&self) -> &'static ProviderDefaults {
        match self.provider.as_str() {
            "openai" => &OPENAI_DEFAULTS,
            _ => &GEMINI_DEFAULTS,
        }
    }

    /// Configured model, or the provider's default
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.provider_defaults().model)
    }

    /// Configured key variable, or the provider's default
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(self.provider_defaults().api_key_env)
    }

    /// Configured base URL without a trailing slash, or the provider's default
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(self.provider_defaults().base_url)
            .trim_end_matches('/')
    }

    /// Resolve the provider API key
    ///
    /// The environment variable named by `api-key-env` wins; `api-key-file` is
    /// the fallback. Surrounding whitespace is stripped and empty keys are rejected.
    pub fn get_api_key(&self) -> Result<String> {
        let api_key_env = self.api_key_env();
        debug!(%api_key_env, "get_api_key: called");
        if let Ok(key) = std::env::var(api_key_env) {
            let key = key.trim();
            if !key.is_empty() {
                debug!("get_api_key: found in environment");
                return Ok(key.to_string());
            }
        }

        if let Some(path) = &self.api_key_file {
            debug!(path = %path.display(), "get_api_key: reading key file");
            let content = fs::read_to_string(path)
                .context(format!("Failed to read API key file {}", path.display()))?;
            let key = content.trim();
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }

        Err(eyre::eyre!(
            "LLM API key not found. Set the {} environment variable.",
            api_key_env
        ))
    }
}

/// What to do with a result whose request was superseded by a newer submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaleResultPolicy {
    /// Record every successful result in resolution order
    #[default]
    ApplyAll,
    /// Only the most recently submitted request may mutate the collection
    LatestOnly,
}

/// Learning path generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of steps requested from the provider
    #[serde(rename = "step-count")]
    pub step_count: u32,

    /// Audience named in the instruction
    pub audience: String,

    /// Handling of results from superseded requests
    #[serde(rename = "stale-results")]
    pub stale_results: StaleResultPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            step_count: 5,
            audience: "beginner".to_string(),
            stale_results: StaleResultPolicy::ApplyAll,
        }
    }
}

/// Sign-in settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulated sign-in delay in milliseconds
    #[serde(rename = "login-delay-ms")]
    pub login_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { login_delay_ms: 1200 }
    }
}
