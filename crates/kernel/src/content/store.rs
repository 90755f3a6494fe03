//! Content store boundary.
//!
//! A store executes a [`QueryPlan`] and returns fully materialized items.
//! The planner and formatter never see how a store does it.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use super::item::ContentItem;
use crate::selection::QueryPlan;

/// Content store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

/// Published items per `(taxonomy, term id)`.
pub type TermCounts = HashMap<(String, i64), u64>;

/// Executes query plans.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the items selected by `plan`, in plan order, at most
    /// `plan.limit` of them.
    async fn execute(&self, plan: &QueryPlan) -> Result<Vec<ContentItem>, StoreError>;

    /// Number of published items carrying each term.
    async fn published_term_counts(&self) -> Result<TermCounts, StoreError>;

    /// Whether the store can currently serve queries.
    async fn healthy(&self) -> bool {
        true
    }
}

/// Sort key understood by the stores.
///
/// Unknown order fields sort by publication date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKey {
    Date,
    Modified,
    Title,
    Name,
    Id,
    MenuOrder,
    Author,
    CommentCount,
    Random,
}

impl OrderKey {
    pub fn from_field(field: &str) -> Self {
        match field {
            "date" | "post_date" => OrderKey::Date,
            "modified" | "post_modified" => OrderKey::Modified,
            "title" | "post_title" => OrderKey::Title,
            "name" | "post_name" | "slug" => OrderKey::Name,
            "id" => OrderKey::Id,
            "menu_order" => OrderKey::MenuOrder,
            "author" | "post_author" => OrderKey::Author,
            "comment_count" => OrderKey::CommentCount,
            "rand" => OrderKey::Random,
            _ => OrderKey::Date,
        }
    }

    /// Column of the item table holding this key. `None` for random order.
    pub fn column(&self) -> Option<&'static str> {
        match self {
            OrderKey::Date => Some("created"),
            OrderKey::Modified => Some("changed"),
            OrderKey::Title => Some("title"),
            OrderKey::Name => Some("slug"),
            OrderKey::Id => Some("id"),
            OrderKey::MenuOrder => Some("menu_order"),
            OrderKey::Author => Some("author"),
            OrderKey::CommentCount => Some("comment_count"),
            OrderKey::Random => None,
        }
    }
}
