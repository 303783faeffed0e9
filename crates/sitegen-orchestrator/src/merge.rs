use sitegen_core::{
    AgentKind, CompositeConfiguration, ContentOutput, DesignOutput, SeoOutput, SitegenError,
    SitegenResult,
};

/// Composite under construction.
///
/// Every slot belongs to one agent and can be filled once; a second write
/// is rejected rather than overwriting what an earlier agent produced.
#[derive(Debug, Clone, Default)]
pub struct PartialComposite {
    content: Option<ContentOutput>,
    design: Option<DesignOutput>,
    seo: Option<SeoOutput>,
}

impl PartialComposite {
    /// Empty composite.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the Content slot.
    pub fn set_content(&mut self, content: ContentOutput) -> SitegenResult<()> {
        fill(&mut self.content, content, AgentKind::Content)
    }

    /// Fill the Design slot.
    pub fn set_design(&mut self, design: DesignOutput) -> SitegenResult<()> {
        fill(&mut self.design, design, AgentKind::Design)
    }

    /// Fill the SEO slot.
    pub fn set_seo(&mut self, seo: SeoOutput) -> SitegenResult<()> {
        fill(&mut self.seo, seo, AgentKind::Seo)
    }

    /// The finished configuration, only when every agent contributed.
    pub fn into_complete(self) -> Option<CompositeConfiguration> {
        Some(CompositeConfiguration {
            content: self.content?,
            design: self.design?,
            seo: self.seo?,
        })
    }
}

fn fill<T>(slot: &mut Option<T>, value: T, owner: AgentKind) -> SitegenResult<()> {
    if slot.is_some() {
        return Err(SitegenError::Merge(format!(
            "{} output already merged",
            owner.label()
        )));
    }
    *slot = Some(value);
    Ok(())
}
