//! Selection planning module.
//!
//! This module provides:
//! - SelectionAttributes: defaults and coercion of a raw attribute bag
//! - SelectionPlanner: order normalization and taxonomy filter validation
//! - Types: QueryPlan, OrderDirection, TaxonomyFilter, etc.

pub mod coerce;
mod planner;
pub mod types;

pub use planner::{SelectionPlanner, TaxonomyValidator};
pub use types::{
    Align, DEFAULT_CONTENT_TYPE, DEFAULT_COUNT, DEFAULT_ORDER_FIELD, MatchMode, OrderDirection,
    QueryPlan, SelectionAttributes, StatusFilter, TaxonomyFilter,
};
