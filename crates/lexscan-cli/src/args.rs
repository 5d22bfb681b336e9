use clap::Args;
use lexscan_core::config::{
    ProviderConfig, DEFAULT_ENDPOINT, DEFAULT_MAX_RETRIES, DEFAULT_MODEL,
    DEFAULT_RETRY_BACKOFF_MS, DEFAULT_TIMEOUT_SECS,
};
use lexscan_core::error::{AnalysisError, LexscanError};
use lexscan_core::provider::ChatCompletionsClient;
use lexscan_core::rules::builtin::{self, DEFAULT_PRESET};
use lexscan_core::rules::schema::RuleSetDef;
use std::path::PathBuf;

/// Completion provider settings, each backed by an environment variable.
#[derive(Args, Debug, Clone)]
pub struct ProviderArgs {
    /// API key for the completion provider (falls back to GROQ_API_KEY)
    #[arg(long, env = "LEXSCAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "LEXSCAN_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model identifier
    #[arg(long, env = "LEXSCAN_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "LEXSCAN_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Retries after a transient provider failure
    #[arg(long, env = "LEXSCAN_MAX_RETRIES", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Initial delay between retries, doubled on each attempt
    #[arg(long, env = "LEXSCAN_RETRY_BACKOFF_MS", default_value_t = DEFAULT_RETRY_BACKOFF_MS)]
    pub retry_backoff_ms: u64,
}

impl ProviderArgs {
    pub fn to_config(&self) -> ProviderConfig {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok());
        ProviderConfig {
            endpoint: self.endpoint.clone(),
            api_key,
            model: self.model.clone(),
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
            retry_backoff_ms: self.retry_backoff_ms,
        }
    }

    pub fn build_client(&self) -> Result<ChatCompletionsClient, LexscanError> {
        let config = self.to_config();
        tracing::debug!(
            endpoint = %config.endpoint,
            model = %config.model,
            timeout_secs = config.timeout_secs,
            max_retries = config.max_retries,
            "configuring completion provider"
        );
        ChatCompletionsClient::new(config).map_err(|e| AnalysisError::Provider(e).into())
    }
}

/// Which rule checklist to put in the prompt.
#[derive(Args, Debug, Clone)]
pub struct RulesArgs {
    /// Custom JSON rule checklist
    #[arg(short, long = "rules", value_name = "FILE", conflicts_with = "preset")]
    pub rules: Option<PathBuf>,

    /// Predefined checklist (see `lexscan rules list`)
    #[arg(short, long = "preset", value_name = "NAME", default_value = DEFAULT_PRESET)]
    pub preset: String,
}

impl RulesArgs {
    pub fn load(&self) -> Result<RuleSetDef, LexscanError> {
        match &self.rules {
            Some(path) => lexscan_core::rules::load_ruleset(path),
            None => builtin::load_preset(&self.preset),
        }
    }
}
