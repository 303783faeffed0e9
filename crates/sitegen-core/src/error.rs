use thiserror::Error;

/// A convenience `Result` alias using [`SitegenError`].
pub type SitegenResult<T> = Result<T, SitegenError>;

/// Top-level error type shared by every sitegen crate.
#[derive(Error, Debug)]
pub enum SitegenError {
    /// An error from an agent adapter outside the backend call itself.
    #[error("Agent error: {0}")]
    Agent(String),

    /// An error from an outbound HTTP request (e.g. LLM API call).
    #[error("HTTP error: {0}")]
    Http(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// Caller input rejected before any agent ran.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A composite field was set twice.
    #[error("Merge error: {0}")]
    Merge(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reported by one agent capability.
///
/// `Display` renders only the human-readable message so it can be surfaced
/// to callers verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentFailure {
    /// Network or provider error from the generation backend.
    #[error("{0}")]
    Backend(String),
    /// The backend answered, but the payload was malformed or empty.
    #[error("{0}")]
    InvalidResponse(String),
    /// The invocation exceeded its time bound.
    #[error("{0}")]
    Timeout(String),
    /// The capability panicked while producing its output.
    #[error("{0}")]
    Panicked(String),
}

impl AgentFailure {
    /// Short machine-readable label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            AgentFailure::Backend(_) => "backend",
            AgentFailure::InvalidResponse(_) => "invalid_response",
            AgentFailure::Timeout(_) => "timeout",
            AgentFailure::Panicked(_) => "panicked",
        }
    }
}

impl From<SitegenError> for AgentFailure {
    fn from(err: SitegenError) -> Self {
        match err {
            SitegenError::Json(e) => AgentFailure::InvalidResponse(e.to_string()),
            SitegenError::Http(msg) => AgentFailure::Backend(msg),
            other => AgentFailure::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_failure_displays_bare_message() {
        let failure = AgentFailure::Backend("rate limited".to_string());
        assert_eq!(failure.to_string(), "rate limited");
        assert_eq!(failure.label(), "backend");
    }

    #[test]
    fn test_http_error_maps_to_backend_failure() {
        let failure: AgentFailure = SitegenError::Http("connection refused".into()).into();
        assert_eq!(failure, AgentFailure::Backend("connection refused".into()));
    }

    #[test]
    fn test_json_error_maps_to_invalid_response() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let failure: AgentFailure = SitegenError::from(err).into();
        assert_eq!(failure.label(), "invalid_response");
    }

    #[test]
    fn test_sitegen_error_display() {
        let err = SitegenError::Validation("prompt is required".into());
        assert_eq!(err.to_string(), "Validation error: prompt is required");
    }
}
