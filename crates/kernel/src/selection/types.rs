//! Selection types.
//!
//! - SelectionAttributes: the normalized attribute bag of a showcase block
//! - QueryPlan: what the content store must fetch, and in which order
//! - OrderDirection, StatusFilter, TaxonomyFilter, MatchMode

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::coerce::{
    int_value, sanitize_html_classes, sanitize_key, sanitize_text_field, string_value, truthy,
};

/// Content type queried when the bag names none.
pub const DEFAULT_CONTENT_TYPE: &str = "post";

/// Number of items requested when the bag names none (or a non-positive one).
pub const DEFAULT_COUNT: u32 = 3;

/// Sort key used when the bag names none.
pub const DEFAULT_ORDER_FIELD: &str = "date";

// Canonical attribute name first, then the names the block shipped with.
const CONTENT_TYPE_KEYS: &[&str] = &["contentType", "postType"];
const COUNT_KEYS: &[&str] = &["count", "numberOfPosts"];
const ORDER_FIELD_KEYS: &[&str] = &["orderField", "orderBy"];
const ORDER_DIRECTION_KEYS: &[&str] = &["orderDirection", "order"];
const FILTER_TAXONOMY_KEYS: &[&str] = &["filterTaxonomy", "selectedTaxonomy"];
const FILTER_TERMS_KEYS: &[&str] = &["filterTerms", "selectedTerms"];
const SHOW_EXCERPT_KEYS: &[&str] = &["showExcerpt"];
const SHOW_THUMBNAIL_KEYS: &[&str] = &["showThumbnail"];
const ALIGN_KEYS: &[&str] = &["align"];
const CLASS_NAME_KEYS: &[&str] = &["className"];

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDirection {
    Asc,
    #[default]
    Desc,
}

impl OrderDirection {
    /// Normalize a raw direction: uppercase, then `ASC` or `DESC`.
    /// Anything else is `DESC`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "ASC" => OrderDirection::Asc,
            _ => OrderDirection::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// Wide/full alignment of the block wrapper.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Wide,
    Full,
}

impl Align {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "wide" => Some(Align::Wide),
            "full" => Some(Align::Full),
            _ => None,
        }
    }

    /// Wrapper class for this alignment.
    pub fn class_name(&self) -> &'static str {
        match self {
            Align::Wide => "alignwide",
            Align::Full => "alignfull",
        }
    }
}

/// Normalized attributes of a showcase block.
///
/// Built with [`SelectionAttributes::from_bag`], which never fails: every
/// missing or malformed value falls back to its default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionAttributes {
    pub content_type: String,
    pub count: u32,
    pub order_field: String,
    pub order_direction: OrderDirection,
    pub filter_taxonomy: String,
    pub filter_terms: Vec<i64>,
    pub show_excerpt: bool,
    pub show_thumbnail: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Default for SelectionAttributes {
    fn default() -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            count: DEFAULT_COUNT,
            order_field: DEFAULT_ORDER_FIELD.to_string(),
            order_direction: OrderDirection::default(),
            filter_taxonomy: String::new(),
            filter_terms: Vec::new(),
            show_excerpt: true,
            show_thumbnail: false,
            align: None,
            class_name: None,
        }
    }
}

impl SelectionAttributes {
    /// Normalize a raw attribute value. Anything but a JSON object yields
    /// the defaults.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(bag) => Self::from_bag(bag),
            _ => Self::default(),
        }
    }

    /// Normalize a raw attribute bag.
    pub fn from_bag(bag: &Map<String, Value>) -> Self {
        let defaults = Self::default();

        let content_type = lookup(bag, CONTENT_TYPE_KEYS)
            .and_then(string_value)
            .map(|s| sanitize_text_field(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.content_type);

        let count = lookup(bag, COUNT_KEYS)
            .and_then(int_value)
            .map_or(defaults.count, coerce_count);

        let order_field = lookup(bag, ORDER_FIELD_KEYS)
            .and_then(string_value)
            .map(|s| sanitize_key(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.order_field);

        let order_direction = lookup(bag, ORDER_DIRECTION_KEYS)
            .map(|v| match v {
                Value::String(s) => OrderDirection::normalize(s),
                _ => OrderDirection::Desc,
            })
            .unwrap_or(defaults.order_direction);

        let filter_taxonomy = lookup(bag, FILTER_TAXONOMY_KEYS)
            .and_then(string_value)
            .map(|s| sanitize_key(&s))
            .unwrap_or_default();

        let filter_terms = match lookup(bag, FILTER_TERMS_KEYS) {
            Some(Value::Array(values)) => values
                .iter()
                .filter_map(int_value)
                .filter(|id| *id > 0)
                .collect(),
            _ => Vec::new(),
        };

        let show_excerpt = lookup(bag, SHOW_EXCERPT_KEYS).map_or(defaults.show_excerpt, truthy);
        let show_thumbnail =
            lookup(bag, SHOW_THUMBNAIL_KEYS).map_or(defaults.show_thumbnail, truthy);

        let align = lookup(bag, ALIGN_KEYS)
            .and_then(Value::as_str)
            .and_then(Align::parse);

        let class_name = lookup(bag, CLASS_NAME_KEYS)
            .and_then(Value::as_str)
            .map(sanitize_html_classes)
            .filter(|s| !s.is_empty());

        Self {
            content_type,
            count,
            order_field,
            order_direction,
            filter_taxonomy,
            filter_terms,
            show_excerpt,
            show_thumbnail,
            align,
            class_name,
        }
    }
}

/// First non-null value among the given attribute names.
fn lookup<'a>(bag: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| bag.get(*key))
        .find(|value| !value.is_null())
}

/// Clamp a parsed count to a positive `u32`; non-positive means "default".
fn coerce_count(raw: i64) -> u32 {
    if raw < 1 {
        DEFAULT_COUNT
    } else {
        u32::try_from(raw).unwrap_or(u32::MAX)
    }
}

/// Status restriction of a plan. Only published content is ever selected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    PublishedOnly,
}

impl StatusFilter {
    /// Stored status value matched by this filter.
    pub fn status(&self) -> &'static str {
        match self {
            StatusFilter::PublishedOnly => "publish",
        }
    }
}

/// How term ids of a taxonomy filter are matched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchMode {
    /// Item carries at least one of the terms.
    #[default]
    In,
}

/// Taxonomy/term restriction of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyFilter {
    pub taxonomy: String,
    pub term_ids: Vec<i64>,
    #[serde(default)]
    pub match_mode: MatchMode,
}

/// Normalized description of the content to fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QueryPlan {
    pub content_type: String,
    pub limit: u32,
    pub order_field: String,
    pub order_direction: OrderDirection,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_filter: Option<TaxonomyFilter>,
}
