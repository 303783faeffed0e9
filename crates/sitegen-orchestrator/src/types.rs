use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitegen_core::{
    AgentFailure, AgentKind, BusinessContext, CompositeConfiguration, SitegenError,
};
use uuid::Uuid;

/// How the agent chain is scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Content, then Design, then SEO; each sees every earlier output.
    #[default]
    Sequential,
    /// Content first, then Design and SEO concurrently. SEO does not see
    /// the design tokens.
    Parallel,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Sequential => write!(f, "sequential"),
            ExecutionMode::Parallel => write!(f, "parallel"),
        }
    }
}

/// Lifecycle of one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Created, not yet validated.
    Pending,
    /// Agents are being invoked.
    Running,
    /// Every agent succeeded and the composite is complete.
    Succeeded,
    /// Validation or at least one agent failed.
    Failed,
}

impl RunStatus {
    /// Whether `self -> next` is a legal step.
    pub fn can_transition_to(self, next: RunStatus) -> bool {
        matches!(
            (self, next),
            (RunStatus::Pending, RunStatus::Running)
                | (RunStatus::Running, RunStatus::Succeeded)
                | (RunStatus::Running, RunStatus::Failed)
        )
    }

    /// Whether the run has settled.
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Succeeded | RunStatus::Failed)
    }
}

/// Outcome of one agent invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInvocationResult {
    /// Which agent this record is for.
    pub agent: AgentKind,
    /// Whether the agent produced a valid output.
    pub success: bool,
    /// The agent's payload as JSON, when it succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    /// Failure message, when it did not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock milliseconds from call start to settle.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    /// False when the agent was skipped because a prerequisite failed.
    #[serde(default = "default_attempted")]
    pub attempted: bool,
}

fn default_attempted() -> bool {
    true
}

impl AgentInvocationResult {
    /// Record for an agent that returned `output`.
    pub fn succeeded(agent: AgentKind, output: serde_json::Value, duration_ms: u64) -> Self {
        Self {
            agent,
            success: true,
            output: Some(output),
            error: None,
            duration_ms,
            attempted: true,
        }
    }

    /// Record for an agent that failed, timed out or panicked.
    pub fn failed(agent: AgentKind, failure: &AgentFailure, duration_ms: u64) -> Self {
        Self {
            agent,
            success: false,
            output: None,
            error: Some(failure.to_string()),
            duration_ms,
            attempted: true,
        }
    }

    /// A dependent agent that never ran because `blocked_by` failed.
    pub fn skipped(agent: AgentKind, blocked_by: AgentKind) -> Self {
        Self {
            agent,
            success: false,
            output: None,
            error: Some(format!(
                "skipped: {} agent failed",
                blocked_by.label()
            )),
            duration_ms: 0,
            attempted: false,
        }
    }
}

/// Aggregate outcome of one orchestration run.
///
/// `success` is true iff every agent succeeded, and `output` is present iff
/// `success` is true; the orchestrator only builds it through constructors
/// that keep the two in step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationResult {
    /// Identifier of this run, for correlating logs.
    pub run_id: Uuid,
    /// True iff every agent succeeded.
    pub success: bool,
    /// Terminal status of the run.
    pub status: RunStatus,
    /// Mode the run executed in.
    pub mode: ExecutionMode,
    /// The merged configuration, present iff `success`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<CompositeConfiguration>,
    /// First failure encountered, when the run failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Every invocation in declared order, including failures.
    pub agent_results: Vec<AgentInvocationResult>,
    /// Wall-clock milliseconds from run start to the last settled agent.
    #[serde(rename = "totalDuration")]
    pub total_duration_ms: u64,
    /// When the run began.
    pub started_at: DateTime<Utc>,
}

/// Fields shared by every result of one run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RunHeader {
    pub run_id: Uuid,
    pub mode: ExecutionMode,
    pub started_at: DateTime<Utc>,
}

impl OrchestrationResult {
    pub(crate) fn succeeded(
        header: RunHeader,
        output: CompositeConfiguration,
        agent_results: Vec<AgentInvocationResult>,
        total_duration_ms: u64,
    ) -> Self {
        Self {
            run_id: header.run_id,
            success: true,
            status: RunStatus::Succeeded,
            mode: header.mode,
            output: Some(output),
            error: None,
            agent_results,
            total_duration_ms,
            started_at: header.started_at,
        }
    }

    pub(crate) fn failed(
        header: RunHeader,
        error: String,
        agent_results: Vec<AgentInvocationResult>,
        total_duration_ms: u64,
    ) -> Self {
        Self {
            run_id: header.run_id,
            success: false,
            status: RunStatus::Failed,
            mode: header.mode,
            output: None,
            error: Some(error),
            agent_results,
            total_duration_ms,
            started_at: header.started_at,
        }
    }

    /// Result for a request rejected before it reached the orchestrator,
    /// e.g. a body that does not parse. Reported like any other validation
    /// failure: no agents ran and the trace is empty.
    pub fn rejected(mode: ExecutionMode, reason: impl std::fmt::Display) -> Self {
        let header = RunHeader {
            run_id: Uuid::new_v4(),
            mode,
            started_at: Utc::now(),
        };
        let error = SitegenError::Validation(reason.to_string()).to_string();
        Self::failed(header, error, Vec::new(), 0)
    }

    /// Whether the run failed before any agent ran.
    pub fn is_validation_failure(&self) -> bool {
        !self.success && self.agent_results.is_empty()
    }
}

/// Inbound request body, as sent by the request-handling layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationRequest {
    /// What the site should be.
    #[serde(default)]
    pub prompt: String,
    /// The business the site is for.
    #[serde(default)]
    pub business_context: Option<BusinessContext>,
    /// Falls back to the orchestrator's default mode.
    #[serde(default)]
    pub mode: Option<ExecutionMode>,
}
