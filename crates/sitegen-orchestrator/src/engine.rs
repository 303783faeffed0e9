use crate::events::{EventSink, OrchestrationEvent};
use crate::merge::PartialComposite;
use crate::recorder::{AgentRecorder, Recorded};
use crate::types::{
    AgentInvocationResult, ExecutionMode, OrchestrationRequest, OrchestrationResult, RunHeader,
    RunStatus,
};
use chrono::Utc;
use sitegen_agent::{
    AgentCapability, BackendFactory, ContentAgent, DesignAgent, DynContentAgent, DynDesignAgent,
    DynSeoAgent, SeoAgent,
};
use sitegen_core::{
    AgentKind, ApiKey, BusinessContext, ContentOutput, DesignUpstream, GenerationContext,
    SeoUpstream, SitegenError, SitegenResult,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Tunables for an [`Orchestrator`].
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    /// Upper bound for a single agent invocation.
    pub agent_timeout: Duration,
    /// Mode used when a request does not name one.
    pub default_mode: ExecutionMode,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            agent_timeout: Duration::from_secs(60),
            default_mode: ExecutionMode::Sequential,
        }
    }
}

/// Drives the Content → Design → SEO chain and merges the outputs.
///
/// Holds no per-run state; one instance serves any number of concurrent
/// runs.
pub struct Orchestrator {
    content: Arc<DynContentAgent>,
    design: Arc<DynDesignAgent>,
    seo: Arc<DynSeoAgent>,
    recorder: AgentRecorder,
    default_mode: ExecutionMode,
}

impl Orchestrator {
    /// Create an orchestrator over explicit agent implementations.
    pub fn new(
        content: Arc<DynContentAgent>,
        design: Arc<DynDesignAgent>,
        seo: Arc<DynSeoAgent>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            content,
            design,
            seo,
            recorder: AgentRecorder::new(config.agent_timeout),
            default_mode: config.default_mode,
        }
    }

    /// Create with the LLM-backed agents, all sharing one backend factory.
    pub fn from_backends(backends: Arc<dyn BackendFactory>, config: OrchestratorConfig) -> Self {
        Self::new(
            Arc::new(ContentAgent::new(backends.clone())),
            Arc::new(DesignAgent::new(backends.clone())),
            Arc::new(SeoAgent::new(backends)),
            config,
        )
    }

    /// Mode used by [`Orchestrator::run_request`] when the request has none.
    pub fn default_mode(&self) -> ExecutionMode {
        self.default_mode
    }

    /// Run the full chain once.
    ///
    /// Never returns an error: validation problems and agent failures are
    /// reported through [`OrchestrationResult::error`] and the per-agent
    /// trace.
    pub async fn run(
        &self,
        prompt: &str,
        business: Option<&BusinessContext>,
        mode: ExecutionMode,
        api_key: &ApiKey,
    ) -> OrchestrationResult {
        self.execute(prompt, business, mode, api_key, EventSink::default())
            .await
    }

    /// Run from an API request body.
    pub async fn run_request(
        &self,
        request: &OrchestrationRequest,
        api_key: &ApiKey,
    ) -> OrchestrationResult {
        let mode = request.mode.unwrap_or(self.default_mode);
        self.run(
            &request.prompt,
            request.business_context.as_ref(),
            mode,
            api_key,
        )
        .await
    }

    /// Like [`Orchestrator::run`], additionally reporting progress on
    /// `events` as each agent starts and settles.
    pub async fn run_observed(
        &self,
        prompt: &str,
        business: Option<&BusinessContext>,
        mode: ExecutionMode,
        api_key: &ApiKey,
        events: mpsc::UnboundedSender<OrchestrationEvent>,
    ) -> OrchestrationResult {
        self.execute(prompt, business, mode, api_key, EventSink::new(events))
            .await
    }

    async fn execute(
        &self,
        prompt: &str,
        business: Option<&BusinessContext>,
        mode: ExecutionMode,
        api_key: &ApiKey,
        events: EventSink,
    ) -> OrchestrationResult {
        let mut run = RunState::start(mode, events);

        info!(run_id = %run.header.run_id, mode = %mode, "Orchestrator: starting run");

        let business = match validate(prompt, business, api_key) {
            Ok(business) => business,
            Err(e) => return run.fail(e.to_string()),
        };
        let ctx = GenerationContext {
            prompt,
            business,
            api_key,
        };

        // Content is foundational: nothing downstream runs without it.
        let content = self
            .observed(self.content.as_ref(), ctx, &(), &run.events)
            .await;
        let Some(content) = run.settle(content) else {
            return run.fail_from_trace();
        };

        let mut composite = PartialComposite::new();
        let merged = self
            .run_tail(ctx, content, mode, &mut run, &mut composite)
            .await;

        match merged {
            Ok(()) => run.finish(composite),
            Err(e) => run.fail(e.to_string()),
        }
    }

    async fn run_tail(
        &self,
        ctx: GenerationContext<'_>,
        content: ContentOutput,
        mode: ExecutionMode,
        run: &mut RunState,
        composite: &mut PartialComposite,
    ) -> SitegenResult<()> {
        composite.set_content(content.clone())?;
        match mode {
            ExecutionMode::Sequential => self.sequential_tail(ctx, content, run, composite).await,
            ExecutionMode::Parallel => self.parallel_tail(ctx, content, run, composite).await,
        }
    }

    /// Design sees Content; SEO sees Content and Design.
    async fn sequential_tail(
        &self,
        ctx: GenerationContext<'_>,
        content: ContentOutput,
        run: &mut RunState,
        composite: &mut PartialComposite,
    ) -> SitegenResult<()> {
        let design_upstream = DesignUpstream::new(content.clone());
        let design = self
            .observed(self.design.as_ref(), ctx, &design_upstream, &run.events)
            .await;

        let Some(design) = run.settle(design) else {
            run.skip(AgentKind::Seo, AgentKind::Design);
            return Ok(());
        };
        composite.set_design(design.clone())?;

        let seo_upstream = SeoUpstream::new(content, design);
        let seo = self
            .observed(self.seo.as_ref(), ctx, &seo_upstream, &run.events)
            .await;
        if let Some(seo) = run.settle(seo) {
            composite.set_seo(seo)?;
        }
        Ok(())
    }

    /// Design and SEO both depend only on Content and run concurrently.
    async fn parallel_tail(
        &self,
        ctx: GenerationContext<'_>,
        content: ContentOutput,
        run: &mut RunState,
        composite: &mut PartialComposite,
    ) -> SitegenResult<()> {
        let design_upstream = DesignUpstream::new(content.clone());
        let seo_upstream = SeoUpstream::content_only(content);

        let (design, seo) = tokio::join!(
            self.observed(self.design.as_ref(), ctx, &design_upstream, &run.events),
            self.observed(self.seo.as_ref(), ctx, &seo_upstream, &run.events),
        );

        // Trace order is declared order, not completion order.
        if let Some(design) = run.settle(design) {
            composite.set_design(design)?;
        }
        if let Some(seo) = run.settle(seo) {
            composite.set_seo(seo)?;
        }
        Ok(())
    }

    async fn observed<A>(
        &self,
        agent: &A,
        ctx: GenerationContext<'_>,
        upstream: &A::Upstream,
        events: &EventSink,
    ) -> Recorded<A::Output>
    where
        A: AgentCapability + ?Sized,
    {
        events.emit(OrchestrationEvent::AgentStarted {
            agent: agent.kind(),
        });
        let recorded = self.recorder.invoke(agent, ctx, upstream).await;
        events.emit(OrchestrationEvent::AgentFinished {
            result: recorded.record.clone(),
        });
        recorded
    }
}

fn validate<'a>(
    prompt: &str,
    business: Option<&'a BusinessContext>,
    api_key: &ApiKey,
) -> SitegenResult<&'a BusinessContext> {
    if prompt.trim().is_empty() {
        return Err(SitegenError::Validation("prompt is required".into()));
    }
    let business = business
        .ok_or_else(|| SitegenError::Validation("business context is required".into()))?;
    if api_key.is_blank() {
        return Err(SitegenError::Validation("api key is required".into()));
    }
    Ok(business)
}

/// Bookkeeping for one run: clock, status, and the ordered trace.
struct RunState {
    header: RunHeader,
    clock: Instant,
    status: RunStatus,
    trace: Vec<AgentInvocationResult>,
    events: EventSink,
}

impl RunState {
    fn start(mode: ExecutionMode, events: EventSink) -> Self {
        let mut run = Self {
            header: RunHeader {
                run_id: Uuid::new_v4(),
                mode,
                started_at: Utc::now(),
            },
            clock: Instant::now(),
            status: RunStatus::Pending,
            trace: Vec::with_capacity(AgentKind::ALL.len()),
            events,
        };
        run.events.emit(OrchestrationEvent::RunStarted {
            run_id: run.header.run_id,
            mode,
        });
        run.transition(RunStatus::Running);
        run
    }

    fn transition(&mut self, next: RunStatus) {
        debug_assert!(
            self.status.can_transition_to(next),
            "illegal run transition {:?} -> {:?}",
            self.status,
            next
        );
        self.status = next;
    }

    fn settle<T>(&mut self, recorded: Recorded<T>) -> Option<T> {
        self.trace.push(recorded.record);
        recorded.output
    }

    fn skip(&mut self, agent: AgentKind, blocked_by: AgentKind) {
        let record = AgentInvocationResult::skipped(agent, blocked_by);
        self.events.emit(OrchestrationEvent::AgentFinished {
            result: record.clone(),
        });
        self.trace.push(record);
    }

    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.clock.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn fail_from_trace(self) -> OrchestrationResult {
        let error = self
            .trace
            .iter()
            .find(|r| !r.success)
            .and_then(|r| r.error.clone())
            .unwrap_or_else(|| "composite configuration incomplete".to_string());
        self.fail(error)
    }

    fn fail(mut self, error: String) -> OrchestrationResult {
        self.transition(RunStatus::Failed);
        let total = self.elapsed_ms();
        warn!(
            run_id = %self.header.run_id,
            error = %error,
            agents = self.trace.len(),
            total_duration_ms = total,
            "Orchestrator: run failed"
        );
        self.events.emit(OrchestrationEvent::RunFinished {
            status: self.status,
            total_duration_ms: total,
        });
        OrchestrationResult::failed(self.header, error, self.trace, total)
    }

    fn finish(mut self, composite: PartialComposite) -> OrchestrationResult {
        if self.trace.iter().any(|r| !r.success) {
            return self.fail_from_trace();
        }
        let Some(output) = composite.into_complete() else {
            return self.fail_from_trace();
        };

        self.transition(RunStatus::Succeeded);
        let total = self.elapsed_ms();
        info!(
            run_id = %self.header.run_id,
            total_duration_ms = total,
            "Orchestrator: run complete"
        );
        self.events.emit(OrchestrationEvent::RunFinished {
            status: self.status,
            total_duration_ms: total,
        });
        OrchestrationResult::succeeded(self.header, output, self.trace, total)
    }
}
