//! Block API routes.
//!
//! Server-side rendering, planning and editor support for registered
//! blocks. Request bodies are raw attribute bags.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, Json},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::block::BlockTypeDefinition;
use crate::error::{AppError, AppResult};
use crate::selection::{DEFAULT_CONTENT_TYPE, QueryPlan};
use crate::taxonomy::{ContentType, Taxonomy, Term};
use crate::state::AppState;

/// Create the block router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/blocks", get(list_blocks))
        .route("/api/block/{namespace}/{slug}/render", post(render_block))
        .route("/api/block/{namespace}/{slug}/plan", post(plan_block))
        .route("/api/block/{namespace}/{slug}/preview", post(preview_block))
        .route("/api/block/{namespace}/{slug}/options", get(block_options))
}

// -------------------------------------------------------------------------
// Request / response types
// -------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptionsQuery {
    content_type: Option<String>,
    taxonomy: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionsResponse {
    content_types: Vec<ContentType>,
    taxonomies: Vec<Taxonomy>,
    terms: Vec<Term>,
}

// -------------------------------------------------------------------------
// Handlers
// -------------------------------------------------------------------------

async fn list_blocks(State(state): State<AppState>) -> Json<Vec<BlockTypeDefinition>> {
    Json(
        state
            .blocks()
            .list()
            .iter()
            .map(|definition| definition.as_ref().clone())
            .collect(),
    )
}

async fn render_block(
    State(state): State<AppState>,
    Path((namespace, slug)): Path<(String, String)>,
    Json(attributes): Json<Value>,
) -> AppResult<Html<String>> {
    let block = find_block(&state, &namespace, &slug)?;
    require_object(&attributes)?;

    let html = block
        .renderer
        .render(&attributes, state.render_context())
        .await?;
    Ok(Html(html))
}

async fn plan_block(
    State(state): State<AppState>,
    Path((namespace, slug)): Path<(String, String)>,
    Json(attributes): Json<Value>,
) -> AppResult<Json<QueryPlan>> {
    let block = find_block(&state, &namespace, &slug)?;
    require_object(&attributes)?;

    block
        .renderer
        .plan(&attributes, state.render_context())
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn preview_block(
    State(state): State<AppState>,
    Path((namespace, slug)): Path<(String, String)>,
    Json(attributes): Json<Value>,
) -> AppResult<Html<String>> {
    let block = find_block(&state, &namespace, &slug)?;
    require_object(&attributes)?;

    Ok(Html(block.renderer.preview(&attributes, state.render_context())))
}

async fn block_options(
    State(state): State<AppState>,
    Path((namespace, slug)): Path<(String, String)>,
    Query(query): Query<OptionsQuery>,
) -> AppResult<Json<OptionsResponse>> {
    find_block(&state, &namespace, &slug)?;

    let taxonomies = state.taxonomies();
    let content_type = query
        .content_type
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
    let terms = match query.taxonomy.as_deref() {
        Some(taxonomy) if !taxonomy.is_empty() => taxonomies.terms(taxonomy, true),
        _ => Vec::new(),
    };

    Ok(Json(OptionsResponse {
        content_types: taxonomies.selectable_content_types(),
        taxonomies: taxonomies.taxonomies_for(&content_type),
        terms,
    }))
}

// -------------------------------------------------------------------------
// Helpers
// -------------------------------------------------------------------------

fn find_block(
    state: &AppState,
    namespace: &str,
    slug: &str,
) -> AppResult<Arc<BlockTypeDefinition>> {
    let name = format!("{namespace}/{slug}");
    state.blocks().get(&name).ok_or_else(|| {
        debug!(block = %name, "unknown block");
        AppError::NotFound
    })
}

fn require_object(attributes: &Value) -> AppResult<()> {
    if attributes.is_object() {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "block attributes must be a JSON object".to_string(),
        ))
    }
}
