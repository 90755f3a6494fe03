//! One-shot commands run from the command line.
//!
//! Both commands build an in-memory state from a fixture file and run a
//! single block operation against it.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::block::BLOCK_NAME;
use crate::fixtures::Fixtures;
use crate::render::DEFAULT_NO_RESULTS_TEXT;
use crate::state::AppState;

/// Render `block` once for the given attribute JSON.
pub async fn render(
    fixtures: &Path,
    attributes: &str,
    block: Option<&str>,
    no_results_text: &str,
) -> Result<String> {
    let state = AppState::from_fixtures(Fixtures::load(fixtures)?, no_results_text)?;
    let attributes = parse_attributes(attributes)?;
    let name = block.unwrap_or(BLOCK_NAME);

    let definition = state
        .blocks()
        .get(name)
        .ok_or_else(|| anyhow!("unknown block '{name}'"))?;

    definition
        .renderer
        .render(&attributes, state.render_context())
        .await
        .context("failed to render block")
}

/// Plan the showcase query for the given attribute JSON, as pretty JSON.
pub fn plan(fixtures: &Path, attributes: &str) -> Result<String> {
    let state = AppState::from_fixtures(Fixtures::load(fixtures)?, DEFAULT_NO_RESULTS_TEXT)?;
    let attributes = parse_attributes(attributes)?;

    let definition = state
        .blocks()
        .get(BLOCK_NAME)
        .ok_or_else(|| anyhow!("unknown block '{BLOCK_NAME}'"))?;
    let plan = definition
        .renderer
        .plan(&attributes, state.render_context())
        .ok_or_else(|| anyhow!("block '{BLOCK_NAME}' does not query content"))?;

    serde_json::to_string_pretty(&plan).context("failed to serialize plan")
}

fn parse_attributes(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw).context("attributes must be valid JSON")?;
    if !value.is_object() {
        return Err(anyhow!("attributes must be a JSON object"));
    }
    Ok(value)
}
