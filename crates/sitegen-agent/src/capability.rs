use async_trait::async_trait;
use serde::Serialize;
use sitegen_core::{
    AgentFailure, AgentKind, ContentOutput, DesignOutput, DesignUpstream, GenerationContext,
    SeoOutput, SeoUpstream,
};

/// One generation concern: given the caller's request and the typed output
/// of its prerequisites, produce one facet of the site or fail.
///
/// Implementations touch no shared mutable state; the only side effect is
/// the backend call.
#[async_trait]
pub trait AgentCapability: Send + Sync {
    /// Prerequisite outputs this agent consumes.
    type Upstream: Send + Sync;
    /// The facet this agent produces.
    type Output: Serialize + Send;

    /// Which agent this is.
    fn kind(&self) -> AgentKind;

    /// Produce the facet, or a failure with a human-readable message.
    async fn invoke(
        &self,
        ctx: GenerationContext<'_>,
        upstream: &Self::Upstream,
    ) -> Result<Self::Output, AgentFailure>;
}

/// Content agent contract: no upstream.
pub type DynContentAgent = dyn AgentCapability<Upstream = (), Output = ContentOutput>;
/// Design agent contract: consumes Content.
pub type DynDesignAgent = dyn AgentCapability<Upstream = DesignUpstream, Output = DesignOutput>;
/// SEO agent contract: consumes Content and, in sequential mode, Design.
pub type DynSeoAgent = dyn AgentCapability<Upstream = SeoUpstream, Output = SeoOutput>;
