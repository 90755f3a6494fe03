//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::block::{BlockRegistry, RenderContext, dynamic_content};
use crate::config::Config;
use crate::content::{ContentStore, MemoryContentStore, PgContentStore};
use crate::db;
use crate::fixtures::Fixtures;
use crate::taxonomy::TaxonomyRegistry;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Registered block types.
    blocks: BlockRegistry,

    /// Store and taxonomies handed to block renderers.
    render: RenderContext,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// With `DATABASE_URL` set, content comes from PostgreSQL (migrations
    /// are applied first) and fixture items are ignored; otherwise from the
    /// fixture file's items.
    pub async fn new(config: &Config) -> Result<Self> {
        let mut fixtures = match &config.fixtures_path {
            Some(path) => Fixtures::load(path)?,
            None => Fixtures::default(),
        };
        let items = std::mem::take(&mut fixtures.items);

        let store: Arc<dyn ContentStore> = match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections)
                    .await
                    .context("failed to create database pool")?;
                db::run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;
                if !items.is_empty() {
                    warn!(items = items.len(), "ignoring fixture items with a database configured");
                }
                info!("serving content from PostgreSQL");
                Arc::new(PgContentStore::new(pool, config.statement_timeout_secs))
            }
            None => {
                let store = MemoryContentStore::new(items);
                info!(items = store.len(), "serving content from memory");
                Arc::new(store)
            }
        };

        Self::with_store(&fixtures, store, &config.no_results_text).await
    }

    /// State over `store`, with the fixture's content types and taxonomies
    /// registered and term counts read from the store.
    pub async fn with_store(
        fixtures: &Fixtures,
        store: Arc<dyn ContentStore>,
        no_results_text: &str,
    ) -> Result<Self> {
        let taxonomies = TaxonomyRegistry::with_core_types();
        fixtures.register_into(&taxonomies);

        let counts = store
            .published_term_counts()
            .await
            .context("failed to count taxonomy terms")?;
        taxonomies.apply_term_counts(&counts);

        Ok(Self::from_parts(showcase_blocks(no_results_text)?, store, taxonomies))
    }

    /// State backed by an in-memory store seeded from fixtures, with the
    /// showcase block registered.
    pub fn from_fixtures(fixtures: Fixtures, no_results_text: &str) -> Result<Self> {
        let taxonomies = TaxonomyRegistry::with_core_types();
        fixtures.register_into(&taxonomies);
        let store = fixtures.into_store();
        taxonomies.apply_term_counts(&store.term_counts());

        Ok(Self::from_parts(
            showcase_blocks(no_results_text)?,
            Arc::new(store),
            taxonomies,
        ))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(
        blocks: BlockRegistry,
        store: Arc<dyn ContentStore>,
        taxonomies: TaxonomyRegistry,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                blocks,
                render: RenderContext { store, taxonomies },
            }),
        }
    }

    pub fn blocks(&self) -> &BlockRegistry {
        &self.inner.blocks
    }

    pub fn render_context(&self) -> &RenderContext {
        &self.inner.render
    }

    pub fn taxonomies(&self) -> &TaxonomyRegistry {
        &self.inner.render.taxonomies
    }

    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.inner.render.store
    }

    /// Check whether the content store can serve queries.
    pub async fn store_healthy(&self) -> bool {
        self.inner.render.store.healthy().await
    }
}

/// Block registry holding the showcase block.
fn showcase_blocks(no_results_text: &str) -> Result<BlockRegistry> {
    let mut blocks = BlockRegistry::new();
    blocks
        .register(dynamic_content::definition(no_results_text))
        .context("failed to register showcase block")?;
    Ok(blocks)
}
