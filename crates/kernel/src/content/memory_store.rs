//! In-memory content store.
//!
//! Holds a fixed set of [`StoredItem`]s and executes plans by filtering and
//! sorting them. Used for fixture-backed deployments, the CLI, and tests.

use std::cmp::Ordering;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tracing::debug;

use super::item::{ContentItem, StoredItem};
use super::store::{ContentStore, OrderKey, StoreError, TermCounts};
use crate::selection::{OrderDirection, QueryPlan, StatusFilter};

/// Content store backed by a vector of items.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    items: Vec<StoredItem>,
}

impl MemoryContentStore {
    pub fn new(items: Vec<StoredItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Select the records matching `plan`, sorted and limited.
    pub fn select(&self, plan: &QueryPlan) -> Vec<&StoredItem> {
        let mut selected: Vec<&StoredItem> = self
            .items
            .iter()
            .filter(|item| item.content_type == plan.content_type)
            .filter(|item| item.matches_status(plan.status_filter))
            .filter(|item| match &plan.taxonomy_filter {
                Some(filter) => item.has_any_term(&filter.taxonomy, &filter.term_ids),
                None => true,
            })
            .collect();

        let key = OrderKey::from_field(&plan.order_field);
        if key == OrderKey::Random {
            selected.shuffle(&mut rand::thread_rng());
        } else {
            selected.sort_by(|a, b| {
                let ordering = compare(a, b, key).then_with(|| a.id.cmp(&b.id));
                match plan.order_direction {
                    OrderDirection::Asc => ordering,
                    OrderDirection::Desc => ordering.reverse(),
                }
            });
        }

        selected.truncate(plan.limit as usize);
        debug!(
            content_type = %plan.content_type,
            matched = selected.len(),
            "memory store executed plan"
        );
        selected
    }

    /// Count published items per term.
    pub fn term_counts(&self) -> TermCounts {
        let mut counts = TermCounts::new();
        for item in self
            .items
            .iter()
            .filter(|item| item.matches_status(StatusFilter::PublishedOnly))
        {
            for (taxonomy, term_ids) in &item.terms {
                for id in term_ids {
                    *counts.entry((taxonomy.clone(), *id)).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

fn compare(a: &StoredItem, b: &StoredItem, key: OrderKey) -> Ordering {
    match key {
        OrderKey::Date => a.date.cmp(&b.date),
        OrderKey::Modified => a.modified_or_date().cmp(&b.modified_or_date()),
        OrderKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        OrderKey::Name => a.slug.cmp(&b.slug),
        OrderKey::Id => a.id.cmp(&b.id),
        OrderKey::MenuOrder => a.menu_order.cmp(&b.menu_order),
        OrderKey::Author => a.author.cmp(&b.author),
        OrderKey::CommentCount => a.comment_count.cmp(&b.comment_count),
        OrderKey::Random => Ordering::Equal,
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn execute(&self, plan: &QueryPlan) -> Result<Vec<ContentItem>, StoreError> {
        Ok(self
            .select(plan)
            .into_iter()
            .map(StoredItem::to_content_item)
            .collect())
    }

    async fn published_term_counts(&self) -> Result<TermCounts, StoreError> {
        Ok(self.term_counts())
    }
}
