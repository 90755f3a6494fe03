//! Content store module.
//!
//! This module provides:
//! - ContentItem / StoredItem: what the formatter reads and what stores keep
//! - ContentStore: the plan execution boundary
//! - MemoryContentStore: fixture-backed store
//! - PgContentStore: PostgreSQL store
//! - PlanQueryBuilder: SeaQuery-based SQL generation for plans

mod item;
mod memory_store;
mod pg_store;
mod query_builder;
mod store;

pub use item::{ContentItem, StoredItem, resolve_permalink};
pub use memory_store::MemoryContentStore;
pub use pg_store::PgContentStore;
pub use query_builder::{ITEM_TABLE, ITEM_TERM_TABLE, PlanQueryBuilder, term_count_query};
pub use store::{ContentStore, OrderKey, StoreError, TermCounts};
