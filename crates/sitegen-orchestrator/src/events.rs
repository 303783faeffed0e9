use crate::types::{AgentInvocationResult, ExecutionMode, RunStatus};
use serde::Serialize;
use sitegen_core::AgentKind;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Progress notifications for an observer of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrchestrationEvent {
    /// The run was accepted and is about to validate its input.
    RunStarted {
        /// Identifier echoed in the final result.
        run_id: Uuid,
        /// Mode the run executes in.
        mode: ExecutionMode,
    },
    /// An agent invocation began.
    AgentStarted {
        /// The agent being invoked.
        agent: AgentKind,
    },
    /// An agent settled or was skipped.
    AgentFinished {
        /// Its trace record.
        result: AgentInvocationResult,
    },
    /// The run reached a terminal status.
    RunFinished {
        /// Final status.
        status: RunStatus,
        /// Wall time of the whole run.
        total_duration_ms: u64,
    },
}

/// Optional event channel. Sending never blocks and a dropped receiver is
/// ignored.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventSink {
    tx: Option<mpsc::UnboundedSender<OrchestrationEvent>>,
}

impl EventSink {
    pub fn new(tx: mpsc::UnboundedSender<OrchestrationEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn emit(&self, event: OrchestrationEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
