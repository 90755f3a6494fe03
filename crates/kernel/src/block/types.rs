//! Block type definitions and the render callback seam.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::content::{ContentStore, StoreError};
use crate::selection::QueryPlan;
use crate::taxonomy::TaxonomyRegistry;

/// Block registration failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("invalid block name '{0}': expected namespace/slug")]
    InvalidName(String),

    #[error("block '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Collaborators available to a block while rendering.
#[derive(Clone)]
pub struct RenderContext {
    pub store: Arc<dyn ContentStore>,
    pub taxonomies: TaxonomyRegistry,
}

/// Server-side behavior of a block.
#[async_trait]
pub trait BlockRenderer: Send + Sync {
    /// Render the block for a raw attribute bag.
    async fn render(&self, attributes: &Value, ctx: &RenderContext) -> Result<String, StoreError>;

    /// Editor preview markup for a raw attribute bag.
    fn preview(&self, attributes: &Value, ctx: &RenderContext) -> String;

    /// Query plan the block would execute, for blocks that query content.
    fn plan(&self, _attributes: &Value, _ctx: &RenderContext) -> Option<QueryPlan> {
        None
    }
}

/// Metadata and render callback of a block type.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTypeDefinition {
    pub api_version: u32,
    /// `namespace/slug`.
    pub name: String,
    pub version: String,
    pub title: String,
    pub category: String,
    pub icon: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Attribute schema: `type` and `default` per attribute.
    pub attributes: Value,
    pub supports: Value,
    pub text_domain: String,
    #[serde(skip)]
    pub renderer: Arc<dyn BlockRenderer>,
}

impl BlockTypeDefinition {
    /// Class carried by every wrapper this block renders.
    pub fn wrapper_class(&self) -> String {
        wrapper_class(&self.name)
    }
}

impl fmt::Debug for BlockTypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockTypeDefinition")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

/// `wp-block-` followed by the block name with `/` replaced by `-`.
pub fn wrapper_class(name: &str) -> String {
    format!("wp-block-{}", name.replace('/', "-"))
}
