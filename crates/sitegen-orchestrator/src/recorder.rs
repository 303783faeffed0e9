use crate::types::AgentInvocationResult;
use futures_util::FutureExt;
use sitegen_agent::AgentCapability;
use sitegen_core::{AgentFailure, GenerationContext};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Trace record plus the typed output, when there is one.
#[derive(Debug)]
pub struct Recorded<T> {
    /// Entry for the run trace.
    pub record: AgentInvocationResult,
    /// Typed output, present only on success.
    pub output: Option<T>,
}

/// Invokes one agent under a time bound and turns every way it can end
/// (output, failure, timeout, panic) into an [`AgentInvocationResult`].
#[derive(Debug, Clone, Copy)]
pub struct AgentRecorder {
    timeout: Duration,
}

impl AgentRecorder {
    /// Recorder that gives up on an agent after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `agent` once. Never panics and never returns an error.
    pub async fn invoke<A>(
        &self,
        agent: &A,
        ctx: GenerationContext<'_>,
        upstream: &A::Upstream,
    ) -> Recorded<A::Output>
    where
        A: AgentCapability + ?Sized,
    {
        let kind = agent.kind();
        let start = Instant::now();
        debug!(agent = %kind, "Invoking agent");

        let call = AssertUnwindSafe(agent.invoke(ctx, upstream)).catch_unwind();
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(AgentFailure::Panicked(format!(
                "{} agent panicked: {}",
                kind.label(),
                panic_message(panic.as_ref())
            ))),
            Err(_) => Err(AgentFailure::Timeout(format!(
                "{} agent timed out after {}ms",
                kind.label(),
                self.timeout.as_millis()
            ))),
        };

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let outcome = outcome.and_then(|output| {
            serde_json::to_value(&output)
                .map(|value| (output, value))
                .map_err(|e| AgentFailure::InvalidResponse(e.to_string()))
        });

        match outcome {
            Ok((output, value)) => {
                debug!(agent = %kind, duration_ms, "Agent succeeded");
                Recorded {
                    record: AgentInvocationResult::succeeded(kind, value, duration_ms),
                    output: Some(output),
                }
            }
            Err(failure) => {
                warn!(
                    agent = %kind,
                    duration_ms,
                    failure = failure.label(),
                    error = %failure,
                    "Agent failed"
                );
                Recorded {
                    record: AgentInvocationResult::failed(kind, &failure, duration_ms),
                    output: None,
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sitegen_core::{AgentKind, ApiKey, BusinessContext};

    /// Echoes `()` after `delay`, or does whatever `behaviour` says.
    struct ProbeAgent {
        delay: Duration,
        behaviour: Behaviour,
    }

    enum Behaviour {
        Succeed,
        Fail(&'static str),
        Panic,
    }

    #[async_trait]
    impl AgentCapability for ProbeAgent {
        type Upstream = ();
        type Output = String;

        fn kind(&self) -> AgentKind {
            AgentKind::Design
        }

        async fn invoke(
            &self,
            _ctx: GenerationContext<'_>,
            _upstream: &(),
        ) -> Result<String, AgentFailure> {
            tokio::time::sleep(self.delay).await;
            match self.behaviour {
                Behaviour::Succeed => Ok("tokens".to_string()),
                Behaviour::Fail(msg) => Err(AgentFailure::Backend(msg.to_string())),
                Behaviour::Panic => panic!("palette exploded"),
            }
        }
    }

    async fn run(agent: ProbeAgent, timeout: Duration) -> Recorded<String> {
        let business = BusinessContext::new("Sweet Crumbs", "food");
        let key = ApiKey::new("k");
        let ctx = GenerationContext {
            prompt: "p",
            business: &business,
            api_key: &key,
        };
        AgentRecorder::new(timeout).invoke(&agent, ctx, &()).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_records_output_and_duration() {
        let recorded = run(
            ProbeAgent {
                delay: Duration::from_millis(250),
                behaviour: Behaviour::Succeed,
            },
            Duration::from_secs(5),
        )
        .await;

        assert!(recorded.record.success);
        assert_eq!(recorded.record.agent, AgentKind::Design);
        assert_eq!(recorded.record.output, Some(serde_json::json!("tokens")));
        assert_eq!(recorded.record.duration_ms, 250);
        assert_eq!(recorded.output.as_deref(), Some("tokens"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_message_verbatim() {
        let recorded = run(
            ProbeAgent {
                delay: Duration::from_millis(10),
                behaviour: Behaviour::Fail("rate limited"),
            },
            Duration::from_secs(5),
        )
        .await;

        assert!(!recorded.record.success);
        assert!(recorded.record.attempted);
        assert_eq!(recorded.record.error.as_deref(), Some("rate limited"));
        assert!(recorded.record.output.is_none());
        assert!(recorded.output.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_failed_record() {
        let recorded = run(
            ProbeAgent {
                delay: Duration::from_secs(120),
                behaviour: Behaviour::Succeed,
            },
            Duration::from_secs(30),
        )
        .await;

        assert!(!recorded.record.success);
        assert_eq!(
            recorded.record.error.as_deref(),
            Some("Design agent timed out after 30000ms")
        );
        assert_eq!(recorded.record.duration_ms, 30_000);
    }

    #[tokio::test]
    async fn test_panic_is_captured() {
        let recorded = run(
            ProbeAgent {
                delay: Duration::ZERO,
                behaviour: Behaviour::Panic,
            },
            Duration::from_secs(5),
        )
        .await;

        assert!(!recorded.record.success);
        let error = recorded.record.error.unwrap();
        assert!(error.contains("palette exploded"), "got: {error}");
    }

    #[test]
    fn test_panic_message_variants() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");
        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
