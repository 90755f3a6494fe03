//! The dynamic content showcase block.
//!
//! Rendering runs attribute normalization, planning against the taxonomy
//! registry, one store query, and formatting, in that order.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

use super::types::{BlockRenderer, BlockTypeDefinition, RenderContext, wrapper_class};
use crate::content::StoreError;
use crate::render::{ResultFormatter, escape_html};
use crate::selection::{QueryPlan, SelectionAttributes, SelectionPlanner};

/// Registered name of the showcase block.
pub const BLOCK_NAME: &str = "dcsb/dynamic-content";

/// Block version.
pub const BLOCK_VERSION: &str = "0.1.1";

/// Renderer of the showcase block.
pub struct DynamicContentBlock {
    formatter: ResultFormatter,
}

impl DynamicContentBlock {
    pub fn new(formatter: ResultFormatter) -> Self {
        Self { formatter }
    }
}

#[async_trait]
impl BlockRenderer for DynamicContentBlock {
    async fn render(&self, attributes: &Value, ctx: &RenderContext) -> Result<String, StoreError> {
        let attributes = SelectionAttributes::from_value(attributes);
        let plan = SelectionPlanner::plan(&attributes, &ctx.taxonomies);
        let items = ctx.store.execute(&plan).await?;

        debug!(
            content_type = %plan.content_type,
            limit = plan.limit,
            items = items.len(),
            "rendering showcase"
        );
        Ok(self.formatter.format(&items, &attributes).to_html())
    }

    fn preview(&self, attributes: &Value, ctx: &RenderContext) -> String {
        let attributes = SelectionAttributes::from_value(attributes);
        preview_html(&attributes, ctx)
    }

    fn plan(&self, attributes: &Value, ctx: &RenderContext) -> Option<QueryPlan> {
        let attributes = SelectionAttributes::from_value(attributes);
        Some(SelectionPlanner::plan(&attributes, &ctx.taxonomies))
    }
}

/// Editor placeholder summarizing the current settings.
fn preview_html(attributes: &SelectionAttributes, ctx: &RenderContext) -> String {
    let type_label = ctx
        .taxonomies
        .selectable_content_types()
        .into_iter()
        .find(|t| t.slug == attributes.content_type)
        .map(|t| t.label)
        .unwrap_or_else(|| attributes.content_type.clone());

    let mut html = format!(
        "<div class=\"{}\"><p>Dynamic Content Showcase: Displaying <strong>{}</strong>.</p>",
        wrapper_class(BLOCK_NAME),
        escape_html(&type_label)
    );

    if !attributes.filter_taxonomy.is_empty() {
        let taxonomy_label = ctx
            .taxonomies
            .taxonomies_for(&attributes.content_type)
            .into_iter()
            .find(|t| t.slug == attributes.filter_taxonomy)
            .map(|t| t.label)
            .unwrap_or_else(|| attributes.filter_taxonomy.clone());

        html.push_str(&format!(
            "<p>Filtered by taxonomy: <strong>{}</strong>",
            escape_html(&taxonomy_label)
        ));
        match attributes.filter_terms.len() {
            0 => {}
            1 => html.push_str(" (1 term)"),
            n => html.push_str(&format!(" ({n} terms)")),
        }
        html.push_str("</p>");
    }

    html.push_str(
        "<p><em>Settings are in the block sidebar. Content is rendered on the frontend.</em></p></div>",
    );
    html
}

/// Definition of the showcase block, with its renderer.
pub fn definition(no_results_text: &str) -> BlockTypeDefinition {
    let formatter = ResultFormatter::default()
        .with_no_results_text(no_results_text)
        .with_block_class(wrapper_class(BLOCK_NAME));

    BlockTypeDefinition {
        api_version: 3,
        name: BLOCK_NAME.to_string(),
        version: BLOCK_VERSION.to_string(),
        title: "Dynamic Content Showcase".to_string(),
        category: "widgets".to_string(),
        icon: "excerpt-view".to_string(),
        description: "Display posts, pages, or custom content dynamically with filtering options."
            .to_string(),
        keywords: ["posts", "dynamic", "content", "showcase", "query", "filter"]
            .iter()
            .map(|k| k.to_string())
            .collect(),
        attributes: json!({
            "contentType": { "type": "string", "default": "post" },
            "count": { "type": "number", "default": 3 },
            "orderField": { "type": "string", "default": "date" },
            "orderDirection": { "type": "string", "default": "DESC" },
            "filterTaxonomy": { "type": "string", "default": "" },
            "filterTerms": { "type": "array", "default": [], "items": { "type": "number" } },
            "showExcerpt": { "type": "boolean", "default": true },
            "showThumbnail": { "type": "boolean", "default": false }
        }),
        supports: json!({
            "html": false,
            "align": ["wide", "full"],
            "spacing": { "margin": true, "padding": true },
            "typography": { "fontSize": true, "lineHeight": true }
        }),
        text_domain: "dcsb".to_string(),
        renderer: Arc::new(DynamicContentBlock::new(formatter)),
    }
}
