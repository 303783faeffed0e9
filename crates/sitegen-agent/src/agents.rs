//! LLM-backed implementations of the three agent capabilities.

use crate::backends::BackendFactory;
use crate::capability::AgentCapability;
use crate::profiles::{profile_for, AgentProfile};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sitegen_core::{
    AgentFailure, AgentKind, ContentOutput, DesignOutput, DesignUpstream, GenerationContext,
    SeoOutput, SeoUpstream,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Shared prompt/parse plumbing for the LLM adapters.
struct LlmAgent {
    profile: AgentProfile,
    backends: Arc<dyn BackendFactory>,
}

impl LlmAgent {
    async fn generate<T, U>(
        &self,
        ctx: GenerationContext<'_>,
        upstream: Option<&U>,
    ) -> Result<T, AgentFailure>
    where
        T: DeserializeOwned,
        U: Serialize + Sync,
    {
        let user_prompt = render_user_prompt(ctx, upstream)?;
        let backend = self.backends.create(ctx.api_key, &self.profile);

        let raw = backend
            .complete(&self.profile.system_prompt, &user_prompt)
            .await?;
        debug!(agent = %self.profile.kind, bytes = raw.len(), "Backend responded");

        let json = extract_json(&raw).ok_or_else(|| {
            AgentFailure::InvalidResponse(format!(
                "{} agent returned no JSON object",
                self.profile.kind.label()
            ))
        })?;

        serde_json::from_str(json).map_err(|e| {
            AgentFailure::InvalidResponse(format!(
                "{} agent returned malformed JSON: {e}",
                self.profile.kind.label()
            ))
        })
    }
}

fn render_user_prompt<U: Serialize>(
    ctx: GenerationContext<'_>,
    upstream: Option<&U>,
) -> Result<String, AgentFailure> {
    let business = serde_json::to_string_pretty(ctx.business)
        .map_err(|e| AgentFailure::Backend(e.to_string()))?;

    let mut prompt = format!("REQUEST:\n{}\n\nBUSINESS:\n{business}\n", ctx.prompt);

    if let Some(upstream) = upstream {
        let upstream = serde_json::to_string_pretty(upstream)
            .map_err(|e| AgentFailure::Backend(e.to_string()))?;
        prompt.push_str(&format!("\nUPSTREAM:\n{upstream}\n"));
    }

    prompt.push_str("\nRespond with the JSON object only.");
    Ok(prompt)
}

/// Locate the JSON object in a model reply, tolerating Markdown fences and
/// surrounding prose.
pub fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

fn invalid(kind: AgentKind, what: &str) -> AgentFailure {
    AgentFailure::InvalidResponse(format!("{} agent returned {what}", kind.label()))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

// --- Content ---

/// Writes headline, sections and call to action.
pub struct ContentAgent {
    inner: LlmAgent,
}

impl ContentAgent {
    /// Agent with the default profile.
    pub fn new(backends: Arc<dyn BackendFactory>) -> Self {
        Self::with_profile(profile_for(AgentKind::Content), backends)
    }

    /// Agent with a custom prompt or sampling overrides.
    pub fn with_profile(profile: AgentProfile, backends: Arc<dyn BackendFactory>) -> Self {
        Self {
            inner: LlmAgent { profile, backends },
        }
    }
}

/// Reject content that would leave the site empty.
pub fn validate_content(content: &ContentOutput) -> Result<(), AgentFailure> {
    let kind = AgentKind::Content;
    if is_blank(&content.headline) {
        return Err(invalid(kind, "an empty headline"));
    }
    if content.sections.is_empty() {
        return Err(invalid(kind, "no sections"));
    }
    let mut seen = HashSet::new();
    for section in &content.sections {
        if is_blank(&section.id) {
            return Err(invalid(kind, "a section without an id"));
        }
        if !seen.insert(section.id.as_str()) {
            return Err(invalid(kind, &format!("duplicate section id '{}'", section.id)));
        }
    }
    Ok(())
}

#[async_trait]
impl AgentCapability for ContentAgent {
    type Upstream = ();
    type Output = ContentOutput;

    fn kind(&self) -> AgentKind {
        AgentKind::Content
    }

    async fn invoke(
        &self,
        ctx: GenerationContext<'_>,
        _upstream: &(),
    ) -> Result<ContentOutput, AgentFailure> {
        let content: ContentOutput = self.inner.generate::<_, ()>(ctx, None).await?;
        validate_content(&content)?;
        Ok(content)
    }
}

// --- Design ---

/// Picks palette, typography and layout for the content.
pub struct DesignAgent {
    inner: LlmAgent,
}

impl DesignAgent {
    /// Agent with the default profile.
    pub fn new(backends: Arc<dyn BackendFactory>) -> Self {
        Self::with_profile(profile_for(AgentKind::Design), backends)
    }

    /// Agent with a custom prompt or sampling overrides.
    pub fn with_profile(profile: AgentProfile, backends: Arc<dyn BackendFactory>) -> Self {
        Self {
            inner: LlmAgent { profile, backends },
        }
    }
}

/// Reject blank tokens and layout references to sections that do not exist.
pub fn validate_design(design: &DesignOutput, content: &ContentOutput) -> Result<(), AgentFailure> {
    let kind = AgentKind::Design;
    for (name, value) in design.palette.tokens() {
        if is_blank(value) {
            return Err(invalid(kind, &format!("an empty '{name}' color")));
        }
    }
    if is_blank(&design.typography.heading_font) || is_blank(&design.typography.body_font) {
        return Err(invalid(kind, "an empty font"));
    }
    let known = content.section_ids();
    if let Some(unknown) = design
        .layout
        .section_order
        .iter()
        .find(|id| !known.contains(&id.as_str()))
    {
        return Err(invalid(kind, &format!("unknown section '{unknown}' in layout")));
    }
    Ok(())
}

#[async_trait]
impl AgentCapability for DesignAgent {
    type Upstream = DesignUpstream;
    type Output = DesignOutput;

    fn kind(&self) -> AgentKind {
        AgentKind::Design
    }

    async fn invoke(
        &self,
        ctx: GenerationContext<'_>,
        upstream: &DesignUpstream,
    ) -> Result<DesignOutput, AgentFailure> {
        let design: DesignOutput = self.inner.generate(ctx, Some(upstream)).await?;
        validate_design(&design, upstream.content())?;
        Ok(design)
    }
}

// --- SEO ---

/// Writes title, description, keywords and social card.
pub struct SeoAgent {
    inner: LlmAgent,
}

impl SeoAgent {
    /// Agent with the default profile.
    pub fn new(backends: Arc<dyn BackendFactory>) -> Self {
        Self::with_profile(profile_for(AgentKind::Seo), backends)
    }

    /// Agent with a custom prompt or sampling overrides.
    pub fn with_profile(profile: AgentProfile, backends: Arc<dyn BackendFactory>) -> Self {
        Self {
            inner: LlmAgent { profile, backends },
        }
    }
}

/// Reject metadata missing its required fields.
pub fn validate_seo(seo: &SeoOutput) -> Result<(), AgentFailure> {
    let kind = AgentKind::Seo;
    if is_blank(&seo.title) {
        return Err(invalid(kind, "an empty title"));
    }
    if is_blank(&seo.description) {
        return Err(invalid(kind, "an empty description"));
    }
    if is_blank(&seo.slug) {
        return Err(invalid(kind, "an empty slug"));
    }
    Ok(())
}

#[async_trait]
impl AgentCapability for SeoAgent {
    type Upstream = SeoUpstream;
    type Output = SeoOutput;

    fn kind(&self) -> AgentKind {
        AgentKind::Seo
    }

    async fn invoke(
        &self,
        ctx: GenerationContext<'_>,
        upstream: &SeoUpstream,
    ) -> Result<SeoOutput, AgentFailure> {
        let seo: SeoOutput = self.inner.generate(ctx, Some(upstream)).await?;
        validate_seo(&seo)?;
        Ok(seo)
    }
}
