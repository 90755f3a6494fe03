//! Content records.
//!
//! [`StoredItem`] is what a content store keeps; [`ContentItem`] is the
//! read-only projection handed to the formatter.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::selection::StatusFilter;

/// A content item as seen by the result formatter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub title: String,
    pub permalink: String,
    #[serde(default)]
    pub manual_excerpt: Option<String>,
    #[serde(default)]
    pub raw_body: String,
    #[serde(default)]
    pub thumbnail_markup: Option<String>,
}

impl ContentItem {
    pub fn new(title: impl Into<String>, permalink: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            permalink: permalink.into(),
            ..Default::default()
        }
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.manual_excerpt = Some(excerpt.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.raw_body = body.into();
        self
    }

    pub fn thumbnail(mut self, markup: impl Into<String>) -> Self {
        self.thumbnail_markup = Some(markup.into());
        self
    }
}

fn default_status() -> String {
    "draft".to_string()
}

/// Public URL of an item: the stored permalink, else `/{slug}/`, else
/// `/?p={id}`.
pub fn resolve_permalink(permalink: &str, slug: &str, id: i64) -> String {
    if !permalink.is_empty() {
        permalink.to_string()
    } else if !slug.is_empty() {
        format!("/{slug}/")
    } else {
        format!("/?p={id}")
    }
}

/// A content record held by a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    pub id: i64,

    /// Content type machine name (e.g., "post", "page").
    pub content_type: String,

    /// Publication status ("publish", "draft", "pending", "private", ...).
    #[serde(default = "default_status")]
    pub status: String,

    pub title: String,

    #[serde(default)]
    pub slug: String,

    /// Public URL. Derived from slug or id when empty.
    #[serde(default)]
    pub permalink: String,

    /// Hand-written excerpt, if any.
    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub body: String,

    /// Pre-rendered thumbnail markup (an `<img>` tag).
    #[serde(default)]
    pub thumbnail: Option<String>,

    pub date: DateTime<Utc>,

    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,

    #[serde(default)]
    pub menu_order: i64,

    #[serde(default)]
    pub author: i64,

    #[serde(default)]
    pub comment_count: i64,

    /// Term ids per taxonomy slug.
    #[serde(default)]
    pub terms: HashMap<String, Vec<i64>>,
}

impl StoredItem {
    /// Whether the item passes the given status filter.
    pub fn matches_status(&self, filter: StatusFilter) -> bool {
        self.status == filter.status()
    }

    /// Whether the item carries at least one of `term_ids` in `taxonomy`.
    pub fn has_any_term(&self, taxonomy: &str, term_ids: &[i64]) -> bool {
        self.terms
            .get(taxonomy)
            .is_some_and(|assigned| assigned.iter().any(|id| term_ids.contains(id)))
    }

    /// Last modification time, falling back to the publication date.
    pub fn modified_or_date(&self) -> DateTime<Utc> {
        self.modified.unwrap_or(self.date)
    }

    pub fn permalink(&self) -> String {
        resolve_permalink(&self.permalink, &self.slug, self.id)
    }

    /// Project into the formatter's view of the item.
    pub fn to_content_item(&self) -> ContentItem {
        ContentItem {
            title: self.title.clone(),
            permalink: self.permalink(),
            manual_excerpt: self.excerpt.clone().filter(|e| !e.is_empty()),
            raw_body: self.body.clone(),
            thumbnail_markup: self.thumbnail.clone().filter(|t| !t.is_empty()),
        }
    }
}
