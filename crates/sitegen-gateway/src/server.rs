use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use sitegen_core::ApiKey;
use sitegen_orchestrator::{OrchestrationRequest, OrchestrationResult, Orchestrator};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared application state.
pub struct AppState {
    /// Runs one orchestration per request.
    pub orchestrator: Arc<Orchestrator>,
    /// Backend key forwarded into every run.
    pub api_key: ApiKey,
}

/// The HTTP gateway.
pub struct GatewayServer;

impl GatewayServer {
    /// Build the router: `POST /api/generate` and `GET /health`.
    pub fn build(orchestrator: Arc<Orchestrator>, api_key: ApiKey) -> Router {
        let state = Arc::new(AppState {
            orchestrator,
            api_key,
        });

        Router::new()
            .route("/api/generate", post(generate_handler))
            .route("/health", get(health_handler))
            .with_state(state)
    }
}

/// Status code for a finished run: 200 on success, 400 when the request was
/// rejected before any agent ran, 502 when an agent failed.
pub fn status_for(result: &OrchestrationResult) -> StatusCode {
    if result.success {
        StatusCode::OK
    } else if result.is_validation_failure() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": "sitegen"}))
}

async fn generate_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OrchestrationRequest>, JsonRejection>,
) -> impl IntoResponse {
    let result = match body {
        Ok(Json(request)) => {
            state
                .orchestrator
                .run_request(&request, &state.api_key)
                .await
        }
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected generate request body");
            OrchestrationResult::rejected(
                state.orchestrator.default_mode(),
                rejection.body_text(),
            )
        }
    };

    let status = status_for(&result);
    info!(
        run_id = %result.run_id,
        status = status.as_u16(),
        agents = result.agent_results.len(),
        total_duration_ms = result.total_duration_ms,
        "Generate request handled"
    );

    (status, Json(result))
}
