//! Agent capabilities for sitegen.
//!
//! Each of the Content, Design and SEO agents is an [`AgentCapability`]:
//! given the caller's request and its prerequisites' typed output it returns
//! its own facet of the site, or an [`sitegen_core::AgentFailure`]. The
//! provided implementations delegate to an LLM through the [`LlmBackend`]
//! trait.

/// LLM-backed Content, Design and SEO agents.
pub mod agents;
/// LLM provider backends.
pub mod backends;
/// The agent capability trait and per-kind contracts.
pub mod capability;
/// Model and provider configuration.
pub mod config;
/// Default prompts and sampling settings per agent.
pub mod profiles;

pub use agents::{ContentAgent, DesignAgent, SeoAgent};
pub use backends::{BackendFactory, LlmBackend, ProviderBackendFactory};
pub use capability::{AgentCapability, DynContentAgent, DynDesignAgent, DynSeoAgent};
pub use config::{LlmProvider, ModelConfig};
pub use profiles::{default_profiles, profile_for, AgentProfile};
