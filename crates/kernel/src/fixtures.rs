//! Fixture files.
//!
//! A fixture file is JSON with three optional lists:
//! `{ "contentTypes": [...], "taxonomies": [...], "items": [...] }`.
//! It seeds the taxonomy registry and the in-memory content store.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::content::{MemoryContentStore, StoredItem};
use crate::taxonomy::{ContentType, Taxonomy, TaxonomyRegistry};

/// Parsed fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixtures {
    #[serde(default)]
    pub content_types: Vec<ContentType>,
    #[serde(default)]
    pub taxonomies: Vec<Taxonomy>,
    #[serde(default)]
    pub items: Vec<StoredItem>,
}

impl Fixtures {
    /// Read and parse a fixture file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixtures from {}", path.display()))?;
        let fixtures = Self::from_json(&json)
            .with_context(|| format!("invalid fixture file {}", path.display()))?;

        info!(
            path = %path.display(),
            content_types = fixtures.content_types.len(),
            taxonomies = fixtures.taxonomies.len(),
            items = fixtures.items.len(),
            "loaded fixtures"
        );
        Ok(fixtures)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse fixture JSON")
    }

    /// Register the fixture's content types and taxonomies.
    ///
    /// Term counts are taken as written; the serving store fills in the
    /// rest through [`TaxonomyRegistry::apply_term_counts`].
    pub fn register_into(&self, registry: &TaxonomyRegistry) {
        for content_type in &self.content_types {
            registry.register_content_type(content_type.clone());
        }
        for taxonomy in &self.taxonomies {
            registry.register_taxonomy(taxonomy.clone());
        }
    }

    /// In-memory store holding the fixture's items.
    pub fn into_store(self) -> MemoryContentStore {
        MemoryContentStore::new(self.items)
    }
}
