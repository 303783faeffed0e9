/// Anthropic Messages API backend.
pub mod claude;
/// OpenAI-compatible chat completions backend.
pub mod openai;

use crate::config::{LlmProvider, ModelConfig};
use crate::profiles::AgentProfile;
use async_trait::async_trait;
use claude::ClaudeBackend;
use openai::OpenAiBackend;
use sitegen_core::{ApiKey, SitegenError, SitegenResult};

/// Trait for LLM provider backends.
///
/// Each provider implements this trait to handle API communication. Agents
/// only ever see the trait object.
///
/// To add a new provider:
/// 1. Create a new module in `backends/`
/// 2. Implement `LlmBackend` for your struct
/// 3. Add the variant to `LlmProvider` enum in `config.rs`
/// 4. Wire it up in `ProviderBackendFactory::create()`
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Single-turn completion returning the assistant's text.
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> SitegenResult<String>;
}

/// Builds a backend for one agent invocation.
///
/// The key is per run, so backends are created per call rather than held
/// by the agents.
pub trait BackendFactory: Send + Sync {
    /// Backend for one call with `api_key`, tuned by `profile`.
    fn create(&self, api_key: &ApiKey, profile: &AgentProfile) -> Box<dyn LlmBackend>;
}

/// Factory that picks the backend from [`ModelConfig::provider`].
#[derive(Debug, Clone)]
pub struct ProviderBackendFactory {
    config: ModelConfig,
}

impl ProviderBackendFactory {
    /// Factory for the provider and model named in `config`.
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }
}

impl BackendFactory for ProviderBackendFactory {
    fn create(&self, api_key: &ApiKey, profile: &AgentProfile) -> Box<dyn LlmBackend> {
        let mut config = self.config.clone();
        if let Some(temperature) = profile.temperature {
            config.temperature = temperature;
        }
        if let Some(max_tokens) = profile.max_tokens {
            config.max_tokens = max_tokens;
        }

        match config.provider {
            LlmProvider::Claude => Box::new(ClaudeBackend::new(config, api_key.clone())),
            LlmProvider::OpenAi | LlmProvider::OpenRouter | LlmProvider::Groq => {
                Box::new(OpenAiBackend::new(config, api_key.clone()))
            }
        }
    }
}

/// Read a provider response, keeping the status and raw body on failure.
///
/// The body is only parsed as JSON once the status is known to be 2xx, so a
/// plain-text or HTML error page still yields a readable message.
pub(crate) async fn read_json(
    resp: reqwest::Response,
    provider: &str,
) -> SitegenResult<serde_json::Value> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| SitegenError::Http(e.to_string()))?;

    if !status.is_success() {
        return Err(SitegenError::Http(format!(
            "{provider} API error {status}: {}",
            text.trim()
        )));
    }

    Ok(serde_json::from_str(&text)?)
}
