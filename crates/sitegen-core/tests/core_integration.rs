#![allow(clippy::unwrap_used, clippy::expect_used)]

use sitegen_core::*;

fn sample_content() -> ContentOutput {
    ContentOutput {
        headline: "Fresh bread every morning".to_string(),
        tagline: "Small-batch baking in the heart of town".to_string(),
        sections: vec![
            ContentSection {
                id: "about".to_string(),
                kind: "about".to_string(),
                title: "Our story".to_string(),
                body: "Three generations of bakers.".to_string(),
                items: vec![],
            },
            ContentSection {
                id: "menu".to_string(),
                kind: "services".to_string(),
                title: "Menu".to_string(),
                body: "Baked daily.".to_string(),
                items: vec!["Sourdough".to_string(), "Croissants".to_string()],
            },
        ],
        call_to_action: CallToAction {
            label: "Order now".to_string(),
            target: "#contact".to_string(),
        },
    }
}

fn sample_design() -> DesignOutput {
    DesignOutput {
        palette: ColorPalette {
            primary: "#8B4513".to_string(),
            secondary: "#F5DEB3".to_string(),
            accent: "#D2691E".to_string(),
            background: "#FFF8F0".to_string(),
            text: "#2B1B0E".to_string(),
        },
        typography: Typography {
            heading_font: "Playfair Display".to_string(),
            body_font: "Lato".to_string(),
        },
        layout: LayoutHints {
            style: "warm".to_string(),
            section_order: vec!["menu".to_string(), "about".to_string()],
        },
    }
}

#[test]
fn test_design_upstream_carries_content_and_version() {
    let upstream = DesignUpstream::new(sample_content());
    assert_eq!(upstream.schema_version(), UPSTREAM_SCHEMA_VERSION);
    assert_eq!(upstream.content().section_ids(), vec!["about", "menu"]);

    let json = serde_json::to_value(&upstream).unwrap();
    assert_eq!(json["schemaVersion"], UPSTREAM_SCHEMA_VERSION);
    assert_eq!(json["content"]["headline"], "Fresh bread every morning");
}

#[test]
fn test_seo_upstream_full_and_relaxed() {
    let full = SeoUpstream::new(sample_content(), sample_design());
    assert!(full.design().is_some());

    let relaxed = SeoUpstream::content_only(sample_content());
    assert!(relaxed.design().is_none());
    let json = serde_json::to_value(&relaxed).unwrap();
    assert!(json.get("design").is_none());
}

#[test]
fn test_content_output_parses_camel_case_payload() {
    let payload = r##"{
        "headline": "Hi",
        "tagline": "There",
        "sections": [{"id": "hero", "kind": "hero", "title": "Welcome", "body": "Hello"}],
        "callToAction": {"label": "Visit", "target": "#visit"}
    }"##;
    let content: ContentOutput = serde_json::from_str(payload).unwrap();
    assert_eq!(content.sections.len(), 1);
    assert!(content.sections[0].items.is_empty());
    assert_eq!(content.call_to_action.target, "#visit");
}

#[test]
fn test_composite_keeps_agent_fields_separate() {
    let composite = CompositeConfiguration {
        content: sample_content(),
        design: sample_design(),
        seo: SeoOutput {
            title: "Sweet Crumbs Bakery".to_string(),
            description: "Artisan bakery".to_string(),
            keywords: vec!["bakery".to_string()],
            slug: "sweet-crumbs".to_string(),
            open_graph: None,
        },
    };
    let json = serde_json::to_value(&composite).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(json["design"]["palette"]["primary"], "#8B4513");
    assert_eq!(json["seo"]["slug"], "sweet-crumbs");
}
