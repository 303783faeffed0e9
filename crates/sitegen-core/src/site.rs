use serde::{Deserialize, Serialize};

/// Content produced by the Content agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOutput {
    /// Hero headline.
    pub headline: String,
    /// One-line supporting text under the headline.
    pub tagline: String,
    /// Ordered page sections.
    pub sections: Vec<ContentSection>,
    /// Primary call to action.
    pub call_to_action: CallToAction,
}

/// One block of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    /// Stable identifier other agents refer to, e.g. "about".
    pub id: String,
    /// Section type, e.g. "hero", "services", "testimonials".
    pub kind: String,
    /// Section heading.
    pub title: String,
    /// Body copy.
    pub body: String,
    /// Bullet items (services, menu entries, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

/// Button label and where it leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    /// Visible label.
    pub label: String,
    /// Anchor or URL.
    pub target: String,
}

impl ContentOutput {
    /// Identifiers of all sections, in order.
    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }
}

/// Design tokens produced by the Design agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignOutput {
    /// Color tokens.
    pub palette: ColorPalette,
    /// Font choices.
    pub typography: Typography,
    /// Layout hints for the renderer.
    pub layout: LayoutHints,
}

/// Color tokens as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Brand color.
    pub primary: String,
    /// Supporting color.
    pub secondary: String,
    /// Highlight color.
    pub accent: String,
    /// Page background.
    pub background: String,
    /// Body text.
    pub text: String,
}

impl ColorPalette {
    /// All tokens with their names.
    pub fn tokens(&self) -> [(&'static str, &str); 5] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("background", self.background.as_str()),
            ("text", self.text.as_str()),
        ]
    }
}

/// Font families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Font for headings.
    pub heading_font: String,
    /// Font for body copy.
    pub body_font: String,
}

/// Layout hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutHints {
    /// Overall style, e.g. "minimal", "bold".
    pub style: String,
    /// Order in which content sections are rendered, by section id.
    #[serde(default)]
    pub section_order: Vec<String>,
}

/// Search metadata produced by the SEO agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoOutput {
    /// `<title>` text.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Meta keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// URL slug for the site.
    pub slug: String,
    /// Open Graph card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<OpenGraph>,
}

/// Open Graph card metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    /// Card title.
    pub title: String,
    /// Card description.
    pub description: String,
    /// Theme color for the card, usually the primary palette color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
}

/// The merged website configuration.
///
/// Each field is owned by exactly one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeConfiguration {
    /// Owned by the Content agent.
    pub content: ContentOutput,
    /// Owned by the Design agent.
    pub design: DesignOutput,
    /// Owned by the SEO agent.
    pub seo: SeoOutput,
}
