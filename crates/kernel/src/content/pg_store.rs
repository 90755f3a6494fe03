//! PostgreSQL content store.
//!
//! Executes plans with SQL generated by [`PlanQueryBuilder`], inside a
//! transaction carrying a statement timeout.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::item::{ContentItem, resolve_permalink};
use super::query_builder::{PlanQueryBuilder, term_count_query};
use super::store::{ContentStore, StoreError, TermCounts};
use crate::selection::QueryPlan;

/// Row shape of the plan query; see `ITEM_COLUMNS`.
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    title: String,
    slug: String,
    permalink: String,
    excerpt: Option<String>,
    body: String,
    thumbnail: Option<String>,
}

impl From<ItemRow> for ContentItem {
    fn from(row: ItemRow) -> Self {
        ContentItem {
            permalink: resolve_permalink(&row.permalink, &row.slug, row.id),
            title: row.title,
            manual_excerpt: row.excerpt.filter(|e| !e.is_empty()),
            raw_body: row.body,
            thumbnail_markup: row.thumbnail.filter(|t| !t.is_empty()),
        }
    }
}

/// Content store backed by the `showcase_item` tables.
#[derive(Clone)]
pub struct PgContentStore {
    pool: PgPool,
    statement_timeout_secs: u64,
}

impl PgContentStore {
    pub fn new(pool: PgPool, statement_timeout_secs: u64) -> Self {
        Self {
            pool,
            statement_timeout_secs,
        }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn execute(&self, plan: &QueryPlan) -> Result<Vec<ContentItem>, StoreError> {
        let sql = PlanQueryBuilder::new(plan).build();
        debug!(sql = %sql, "executing plan query");

        // SET LOCAL only lasts for the transaction.
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            "SET LOCAL statement_timeout = '{}s'",
            self.statement_timeout_secs
        ))
        .execute(&mut *tx)
        .await?;

        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(rows.into_iter().map(ContentItem::from).collect())
    }

    async fn published_term_counts(&self) -> Result<TermCounts, StoreError> {
        let rows: Vec<(String, i64, i64)> = sqlx::query_as(&term_count_query())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(taxonomy, term_id, items)| {
                ((taxonomy, term_id), u64::try_from(items).unwrap_or(0))
            })
            .collect())
    }

    async fn healthy(&self) -> bool {
        crate::db::check_health(&self.pool).await
    }
}
