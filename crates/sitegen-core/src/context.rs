use serde::{Deserialize, Serialize};
use std::fmt;

/// Description of the business a site is generated for.
///
/// Owned by the caller and only ever borrowed by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessContext {
    /// Trading name, e.g. "Sweet Crumbs".
    pub name: String,
    /// Industry or vertical, e.g. "food".
    pub industry: String,
    /// Free-form description of what the business does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Who the site speaks to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    /// Desired voice, e.g. "warm", "professional".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

impl BusinessContext {
    /// Create a context with only the required fields.
    pub fn new(name: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            description: None,
            target_audience: None,
            tone: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the target audience.
    pub fn with_target_audience(mut self, audience: impl Into<String>) -> Self {
        self.target_audience = Some(audience.into());
        self
    }

    /// Set the tone of voice.
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = Some(tone.into());
        self
    }
}

/// Read-only credential for the generation backend.
///
/// Supplied once per run. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the key is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Everything an agent needs from the caller for a single invocation.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    /// The natural-language request.
    pub prompt: &'a str,
    /// The business profile.
    pub business: &'a BusinessContext,
    /// Backend credential for this run.
    pub api_key: &'a ApiKey,
}

/// The closed set of generation agents.
///
/// Declaration order is the dependency order and the order results are
/// reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// Copy and section structure. Foundational.
    Content,
    /// Palette, typography and layout.
    Design,
    /// Search metadata.
    Seo,
}

impl AgentKind {
    /// All kinds in dependency order.
    pub const ALL: [AgentKind; 3] = [AgentKind::Content, AgentKind::Design, AgentKind::Seo];

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            AgentKind::Content => "Content",
            AgentKind::Design => "Design",
            AgentKind::Seo => "SEO",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::Content => write!(f, "content"),
            AgentKind::Design => write!(f, "design"),
            AgentKind::Seo => write!(f, "seo"),
        }
    }
}
