use super::{read_json, LlmBackend};
use crate::config::{LlmProvider, ModelConfig};
use async_trait::async_trait;
use sitegen_core::{ApiKey, SitegenError, SitegenResult};

/// OpenAI-compatible API backend.
///
/// Works with OpenAI, OpenRouter, Groq, and any other provider that
/// implements the OpenAI chat completions API.
pub struct OpenAiBackend {
    config: ModelConfig,
    api_key: ApiKey,
    http: reqwest::Client,
}

impl OpenAiBackend {
    /// Backend calling `config`'s endpoint with `api_key`.
    pub fn new(config: ModelConfig, api_key: ApiKey) -> Self {
        Self {
            config,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    fn add_provider_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json");

        // OpenRouter requires extra headers
        if matches!(self.config.provider, LlmProvider::OpenRouter) {
            request.header("X-Title", "sitegen")
        } else {
            request
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> SitegenResult<String> {
        let url = format!("{}/v1/chat/completions", self.config.base_url());

        let body = serde_json::json!({
            "model": self.config.model_id,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt},
            ],
        });

        let request = self.add_provider_headers(self.http.post(&url));

        let resp = request
            .json(&body)
            .send()
            .await
            .map_err(|e| SitegenError::Http(e.to_string()))?;

        let resp_body = read_json(resp, "OpenAI").await?;

        parse_openai_response(&resp_body)
    }
}

/// Extract the first choice's message content.
pub fn parse_openai_response(body: &serde_json::Value) -> SitegenResult<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SitegenError::Agent("Missing message content in OpenAI response".into()))
}
