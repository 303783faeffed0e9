//! Multi-agent orchestration for website generation.
//!
//! Runs the Content, Design and SEO agents in dependency order (or with
//! Design and SEO joined concurrently), records every invocation, and merges
//! the successful outputs into one [`sitegen_core::CompositeConfiguration`].
//!
//! # Main types
//!
//! - [`Orchestrator`]: Entry point; one call to `run` is one orchestration run.
//! - [`AgentRecorder`]: Wraps a single agent call with timing, timeout and panic capture.
//! - [`PartialComposite`]: Write-once merge of agent outputs.
//! - [`OrchestrationResult`]: Aggregate outcome with the per-agent trace.

/// Orchestration engine.
pub mod engine;
/// Progress events for observers.
pub mod events;
/// Write-once composite merge.
pub mod merge;
/// Per-invocation recording.
pub mod recorder;
/// Request, result and status types.
pub mod types;

pub use engine::{Orchestrator, OrchestratorConfig};
pub use events::OrchestrationEvent;
pub use merge::PartialComposite;
pub use recorder::{AgentRecorder, Recorded};
pub use types::{
    AgentInvocationResult, ExecutionMode, OrchestrationRequest, OrchestrationResult, RunStatus,
};
