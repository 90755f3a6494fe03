//! Selection planner.
//!
//! Turns normalized [`SelectionAttributes`] into a [`QueryPlan`]. Planning
//! never fails: an unusable taxonomy filter is dropped, not reported.

use tracing::debug;

use super::types::{MatchMode, QueryPlan, SelectionAttributes, StatusFilter, TaxonomyFilter};

/// Decides whether a taxonomy exists and applies to a content type.
pub trait TaxonomyValidator {
    fn applies_to(&self, content_type: &str, taxonomy: &str) -> bool;
}

impl<F> TaxonomyValidator for F
where
    F: Fn(&str, &str) -> bool,
{
    fn applies_to(&self, content_type: &str, taxonomy: &str) -> bool {
        self(content_type, taxonomy)
    }
}

/// Builds query plans from block attributes.
pub struct SelectionPlanner;

impl SelectionPlanner {
    /// Plan the query for a set of attributes.
    ///
    /// The taxonomy filter is included only when a taxonomy and at least one
    /// term are selected and `validator` accepts the taxonomy for the
    /// content type. The status filter is always published-only.
    pub fn plan<V>(attributes: &SelectionAttributes, validator: &V) -> QueryPlan
    where
        V: TaxonomyValidator + ?Sized,
    {
        QueryPlan {
            content_type: attributes.content_type.clone(),
            limit: attributes.count,
            order_field: attributes.order_field.clone(),
            order_direction: attributes.order_direction,
            status_filter: StatusFilter::PublishedOnly,
            taxonomy_filter: Self::taxonomy_filter(attributes, validator),
        }
    }

    fn taxonomy_filter<V>(attributes: &SelectionAttributes, validator: &V) -> Option<TaxonomyFilter>
    where
        V: TaxonomyValidator + ?Sized,
    {
        if attributes.filter_taxonomy.is_empty() || attributes.filter_terms.is_empty() {
            return None;
        }

        if !validator.applies_to(&attributes.content_type, &attributes.filter_taxonomy) {
            debug!(
                content_type = %attributes.content_type,
                taxonomy = %attributes.filter_taxonomy,
                "taxonomy does not apply to content type; dropping term filter"
            );
            return None;
        }

        Some(TaxonomyFilter {
            taxonomy: attributes.filter_taxonomy.clone(),
            term_ids: attributes.filter_terms.clone(),
            match_mode: MatchMode::In,
        })
    }
}
