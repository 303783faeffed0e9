//! Core types and error definitions for sitegen.
//!
//! This crate provides the records shared by every sitegen crate: the
//! business profile a run is driven by, the closed set of agent kinds, the
//! per-agent outputs, the typed upstream contracts between agents, and the
//! merged website configuration.
//!
//! # Main types
//!
//! - [`SitegenError`]: Unified error enum for all sitegen subsystems.
//! - [`AgentFailure`]: Failure reported by a single agent invocation.
//! - [`BusinessContext`]: The business a site is generated for.
//! - [`AgentKind`]: Content, Design or SEO.
//! - [`CompositeConfiguration`]: The merged website configuration.

mod context;
mod error;
/// Per-agent outputs and the composite configuration.
pub mod site;
pub mod upstream;

pub use context::{AgentKind, ApiKey, BusinessContext, GenerationContext};
pub use error::{AgentFailure, SitegenError, SitegenResult};
pub use site::{
    CallToAction, ColorPalette, CompositeConfiguration, ContentOutput, ContentSection,
    DesignOutput, LayoutHints, OpenGraph, SeoOutput, Typography,
};
pub use upstream::{DesignUpstream, SeoUpstream, UPSTREAM_SCHEMA_VERSION};
