//! Typed inputs handed from upstream agents to dependent ones.
//!
//! The structs can only be built from the prerequisite outputs, so a
//! dependent agent cannot be invoked without them.

use crate::site::{ContentOutput, DesignOutput};
use serde::Serialize;

/// Version of the upstream contract. Bump when a field changes meaning.
pub const UPSTREAM_SCHEMA_VERSION: u32 = 1;

/// Input the Design agent receives from the Content agent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignUpstream {
    schema_version: u32,
    content: ContentOutput,
}

impl DesignUpstream {
    /// Build from the Content agent's output.
    pub fn new(content: ContentOutput) -> Self {
        Self {
            schema_version: UPSTREAM_SCHEMA_VERSION,
            content,
        }
    }

    /// Contract version.
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// The content to design for.
    pub fn content(&self) -> &ContentOutput {
        &self.content
    }
}

/// Input the SEO agent receives.
///
/// `design` is absent when the SEO agent runs alongside the Design agent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoUpstream {
    schema_version: u32,
    content: ContentOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    design: Option<DesignOutput>,
}

impl SeoUpstream {
    /// Full chain: both Content and Design outputs are available.
    pub fn new(content: ContentOutput, design: DesignOutput) -> Self {
        Self {
            schema_version: UPSTREAM_SCHEMA_VERSION,
            content,
            design: Some(design),
        }
    }

    /// Design dependency relaxed: only Content is available.
    pub fn content_only(content: ContentOutput) -> Self {
        Self {
            schema_version: UPSTREAM_SCHEMA_VERSION,
            content,
            design: None,
        }
    }

    /// Contract version.
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    /// The content to describe.
    pub fn content(&self) -> &ContentOutput {
        &self.content
    }

    /// Design tokens, when the Design agent ran first.
    pub fn design(&self) -> Option<&DesignOutput> {
        self.design.as_ref()
    }
}
