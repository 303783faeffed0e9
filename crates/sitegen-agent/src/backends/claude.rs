use super::{read_json, LlmBackend};
use crate::config::ModelConfig;
use async_trait::async_trait;
use serde::Serialize;
use sitegen_core::{ApiKey, SitegenError, SitegenResult};

/// Claude (Anthropic) API backend.
pub struct ClaudeBackend {
    config: ModelConfig,
    api_key: ApiKey,
    http: reqwest::Client,
}

impl ClaudeBackend {
    /// Backend calling `config`'s endpoint with `api_key`.
    pub fn new(config: ModelConfig, api_key: ApiKey) -> Self {
        Self {
            config,
            api_key,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LlmBackend for ClaudeBackend {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> SitegenResult<String> {
        let url = format!("{}/v1/messages", self.config.base_url());

        let body = serde_json::json!({
            "model": self.config.model_id,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "system": system_prompt,
            "messages": [ClaudeMessage {
                role: "user",
                content: user_prompt,
            }],
        });

        let resp = self
            .http
            .post(&url)
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| SitegenError::Http(e.to_string()))?;

        let resp_body = read_json(resp, "Claude").await?;

        parse_claude_response(&resp_body)
    }
}

// -- Claude wire types --

#[derive(Serialize)]
struct ClaudeMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Join the text blocks of a Messages API response.
pub fn parse_claude_response(body: &serde_json::Value) -> SitegenResult<String> {
    let content = body["content"]
        .as_array()
        .ok_or_else(|| SitegenError::Agent("Missing content in Claude response".into()))?;

    let text_parts: Vec<&str> = content
        .iter()
        .filter(|block| block["type"].as_str() == Some("text"))
        .filter_map(|block| block["text"].as_str())
        .collect();

    if text_parts.is_empty() {
        return Err(SitegenError::Agent(
            "Claude response contained no text blocks".into(),
        ));
    }

    Ok(text_parts.join("\n"))
}
