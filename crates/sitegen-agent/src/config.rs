use serde::{Deserialize, Serialize};

/// Which provider API a [`ModelConfig`] talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Anthropic Messages API.
    Claude,
    /// OpenAI chat completions.
    OpenAi,
    /// OpenRouter, OpenAI-compatible API.
    OpenRouter,
    /// Groq cloud inference, OpenAI-compatible API.
    Groq,
}

/// Model selection shared by all agents of a run.
///
/// Holds no credential; the key is supplied per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider API to call.
    pub provider: LlmProvider,
    /// Model name as the provider spells it.
    pub model_id: String,
    /// Endpoint override; the provider's public URL when unset.
    pub api_base_url: Option<String>,
    /// Sampling temperature unless an agent profile overrides it.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Completion length unless an agent profile overrides it.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

impl ModelConfig {
    /// Config for `provider` with default sampling settings.
    pub fn new(provider: LlmProvider, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            api_base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }

    /// Endpoint root requests are sent to.
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.api_base_url {
            url
        } else {
            match self.provider {
                LlmProvider::Claude => "https://api.anthropic.com",
                LlmProvider::OpenAi => "https://api.openai.com",
                LlmProvider::OpenRouter => "https://openrouter.ai/api",
                LlmProvider::Groq => "https://api.groq.com/openai",
            }
        }
    }
}
