//! HTTP-level tests for the provider backends against a mock server.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use sitegen_agent::{
    AgentCapability, BackendFactory, ContentAgent, LlmProvider, ModelConfig,
    ProviderBackendFactory,
};
use sitegen_core::{AgentFailure, AgentKind, ApiKey, BusinessContext, GenerationContext};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::Request;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(provider: LlmProvider, server: &MockServer) -> ModelConfig {
    let mut config = ModelConfig::new(provider, "test-model");
    config.api_base_url = Some(server.uri());
    config
}

const CONTENT_JSON: &str = r##"{"headline":"Fresh bread","tagline":"Daily","sections":[{"id":"about","kind":"about","title":"About","body":"We bake."}],"callToAction":{"label":"Visit","target":"#contact"}}"##;

#[tokio::test]
async fn test_claude_backend_sends_key_and_parses_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-claude"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(serde_json::json!({"model": "test-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": "hello"}],
            "stop_reason": "end_turn"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let factory = ProviderBackendFactory::new(config(LlmProvider::Claude, &server));
    let profile = sitegen_agent::profile_for(AgentKind::Content);
    let backend = factory.create(&ApiKey::new("sk-claude"), &profile);

    let text = backend.complete("system", "user").await.unwrap();
    assert_eq!(text, "hello");
}

#[tokio::test]
async fn test_openai_backend_uses_bearer_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-openai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "hi"}, "finish_reason": "stop"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let factory = ProviderBackendFactory::new(config(LlmProvider::OpenAi, &server));
    let profile = sitegen_agent::profile_for(AgentKind::Seo);
    let backend = factory.create(&ApiKey::new("sk-openai"), &profile);

    assert_eq!(backend.complete("system", "user").await.unwrap(), "hi");
}

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(429)
                .set_body_json(serde_json::json!({"error": {"message": "rate limited"}})),
        )
        .mount(&server)
        .await;

    let factory = ProviderBackendFactory::new(config(LlmProvider::Claude, &server));
    let profile = sitegen_agent::profile_for(AgentKind::Content);
    let backend = factory.create(&ApiKey::new("k"), &profile);

    let err = backend.complete("system", "user").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("429"), "unexpected error: {msg}");
    assert!(msg.contains("rate limited"));
}

#[tokio::test]
async fn test_non_json_error_body_keeps_status_and_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let factory = ProviderBackendFactory::new(config(LlmProvider::OpenAi, &server));
    let profile = sitegen_agent::profile_for(AgentKind::Content);
    let backend = factory.create(&ApiKey::new("k"), &profile);

    let msg = backend.complete("system", "user").await.unwrap_err().to_string();
    assert!(msg.contains("OpenAI API error 429"), "unexpected error: {msg}");
    assert!(msg.ends_with("rate limited"), "unexpected error: {msg}");
}

#[tokio::test]
async fn test_html_gateway_error_on_claude_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(502).set_body_string("<html><body>Bad Gateway</body></html>"),
        )
        .mount(&server)
        .await;

    let factory = ProviderBackendFactory::new(config(LlmProvider::Claude, &server));
    let profile = sitegen_agent::profile_for(AgentKind::Design);
    let backend = factory.create(&ApiKey::new("k"), &profile);

    let msg = backend.complete("system", "user").await.unwrap_err().to_string();
    assert!(msg.contains("Claude API error 502"), "unexpected error: {msg}");
    assert!(msg.contains("Bad Gateway"));
}

/// Sampling settings the mock server saw in the single request it received.
async fn sent_sampling(server: &MockServer) -> (u64, f64) {
    let requests: Vec<Request> = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    (
        body["max_tokens"].as_u64().unwrap(),
        body["temperature"].as_f64().unwrap(),
    )
}

#[tokio::test]
async fn test_model_config_sampling_reaches_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({"max_tokens": 256})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cfg = config(LlmProvider::OpenAi, &server);
    cfg.temperature = 0.1;
    cfg.max_tokens = 256;
    let factory = ProviderBackendFactory::new(cfg);
    let profile = sitegen_agent::profile_for(AgentKind::Content);
    let backend = factory.create(&ApiKey::new("k"), &profile);
    assert_eq!(backend.complete("s", "u").await.unwrap(), "ok");

    let (max_tokens, temperature) = sent_sampling(&server).await;
    assert_eq!(max_tokens, 256);
    assert!((temperature - 0.1).abs() < 1e-6);
}

#[tokio::test]
async fn test_profile_override_wins_over_model_config() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut cfg = config(LlmProvider::Groq, &server);
    cfg.max_tokens = 256;
    let factory = ProviderBackendFactory::new(cfg);
    let profile = sitegen_agent::profile_for(AgentKind::Seo).with_max_tokens(1024);
    let backend = factory.create(&ApiKey::new("k"), &profile);
    assert_eq!(backend.complete("s", "u").await.unwrap(), "ok");

    let (max_tokens, temperature) = sent_sampling(&server).await;
    assert_eq!(max_tokens, 1024);
    assert!((temperature - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_content_agent_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [{"type": "text", "text": format!("```json\n{CONTENT_JSON}\n```")}]
        })))
        .mount(&server)
        .await;

    let factory = Arc::new(ProviderBackendFactory::new(config(
        LlmProvider::Claude,
        &server,
    )));
    let agent = ContentAgent::new(factory);
    let business = BusinessContext::new("Sweet Crumbs", "food");
    let key = ApiKey::new("k");
    let ctx = GenerationContext {
        prompt: "Build a bakery site",
        business: &business,
        api_key: &key,
    };

    let content = agent.invoke(ctx, &()).await.unwrap();
    assert_eq!(content.headline, "Fresh bread");
    assert_eq!(agent.kind(), AgentKind::Content);
}

#[tokio::test]
async fn test_success_with_non_json_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("upstream warming up"))
        .mount(&server)
        .await;

    let factory = Arc::new(ProviderBackendFactory::new(config(
        LlmProvider::Claude,
        &server,
    )));
    let agent = ContentAgent::new(factory);
    let business = BusinessContext::new("Sweet Crumbs", "food");
    let key = ApiKey::new("k");
    let ctx = GenerationContext {
        prompt: "Build a bakery site",
        business: &business,
        api_key: &key,
    };

    let err = agent.invoke(ctx, &()).await.unwrap_err();
    assert!(matches!(err, AgentFailure::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_is_backend_failure() {
    let mut config = ModelConfig::new(LlmProvider::Claude, "test-model");
    // Non-routable port so the client fails fast.
    config.api_base_url = Some("http://127.0.0.1:1".to_string());
    let agent = ContentAgent::new(Arc::new(ProviderBackendFactory::new(config)));

    let business = BusinessContext::new("Sweet Crumbs", "food");
    let key = ApiKey::new("k");
    let ctx = GenerationContext {
        prompt: "Build a bakery site",
        business: &business,
        api_key: &key,
    };

    let err = agent.invoke(ctx, &()).await.unwrap_err();
    assert!(matches!(err, AgentFailure::Backend(_)));
}
