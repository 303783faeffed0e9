use serde::{Deserialize, Serialize};
use sitegen_core::AgentKind;

/// Prompt and sampling settings for one agent kind.
///
/// Sampling fields left as `None` fall back to the run's [`crate::ModelConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Agent this profile drives.
    pub kind: AgentKind,
    /// System prompt, including the JSON shape the agent must return.
    pub system_prompt: String,
    /// Temperature override.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Completion length override.
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl AgentProfile {
    /// Profile with the given prompt and no sampling overrides.
    pub fn new(kind: AgentKind, system_prompt: impl Into<String>) -> Self {
        Self {
            kind,
            system_prompt: system_prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Override the configured temperature for this agent.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the configured completion length for this agent.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Create the default profile for every agent kind, in dependency order.
pub fn default_profiles() -> Vec<AgentProfile> {
    AgentKind::ALL.iter().map(|kind| profile_for(*kind)).collect()
}

/// Default profile for a single kind.
pub fn profile_for(kind: AgentKind) -> AgentProfile {
    match kind {
        AgentKind::Content => AgentProfile::new(kind, CONTENT_PROMPT),
        AgentKind::Design => AgentProfile::new(kind, DESIGN_PROMPT),
        AgentKind::Seo => AgentProfile::new(kind, SEO_PROMPT),
    }
}

const CONTENT_PROMPT: &str = "\
You are the Content agent of a website generator. You write the copy for a \
single-page business website from the user's request and business profile.

Respond with ONE JSON object and nothing else, shaped as:
{
  \"headline\": string,
  \"tagline\": string,
  \"sections\": [{\"id\": string, \"kind\": string, \"title\": string, \"body\": string, \"items\": [string]}],
  \"callToAction\": {\"label\": string, \"target\": string}
}

Rules:
1. Section ids are short, unique, lowercase slugs (e.g. \"about\", \"menu\").
2. Use the requested tone; default to friendly and clear.
3. Include at least one section.
";

const DESIGN_PROMPT: &str = "\
You are the Design agent of a website generator. Given the business profile \
and the content already written (UPSTREAM), choose design tokens.

Respond with ONE JSON object and nothing else, shaped as:
{
  \"palette\": {\"primary\": string, \"secondary\": string, \"accent\": string, \"background\": string, \"text\": string},
  \"typography\": {\"headingFont\": string, \"bodyFont\": string},
  \"layout\": {\"style\": string, \"sectionOrder\": [string]}
}

Rules:
1. Colors are hex strings like \"#1A2B3C\".
2. sectionOrder only uses section ids present in UPSTREAM content.
3. Keep text and background colors readable against each other.
";

const SEO_PROMPT: &str = "\
You are the SEO agent of a website generator. Given the business profile, \
the content (UPSTREAM.content) and, when present, the design tokens \
(UPSTREAM.design), write search metadata.

Respond with ONE JSON object and nothing else, shaped as:
{
  \"title\": string,
  \"description\": string,
  \"keywords\": [string],
  \"slug\": string,
  \"openGraph\": {\"title\": string, \"description\": string, \"themeColor\": string}
}

Rules:
1. Title under 60 characters, description under 160.
2. The slug is lowercase with hyphens.
3. Omit openGraph.themeColor when no design is given.
";
