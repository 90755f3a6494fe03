//! Taxonomy registry.
//!
//! Holds the content types and taxonomies known to the host. Populated by
//! explicit registration calls at startup, then shared read-mostly.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::types::{ContentType, Taxonomy, Term};
use crate::content::TermCounts;
use crate::selection::TaxonomyValidator;

/// Content types never offered for selection.
pub const EXCLUDED_CONTENT_TYPES: &[&str] = &[
    "attachment",
    "wp_block",
    "wp_navigation",
    "wp_template",
    "wp_template_part",
    "nav_menu_item",
];

/// Registry of content types and taxonomies.
#[derive(Clone, Default)]
pub struct TaxonomyRegistry {
    inner: Arc<TaxonomyRegistryInner>,
}

#[derive(Default)]
struct TaxonomyRegistryInner {
    content_types: DashMap<String, ContentType>,
    taxonomies: DashMap<String, Taxonomy>,
}

impl TaxonomyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in content types and taxonomies:
    /// posts with categories and tags, pages, attachments.
    pub fn with_core_types() -> Self {
        let registry = Self::new();
        registry.register_content_type(ContentType::new("post", "Posts"));
        registry.register_content_type(ContentType::new("page", "Pages"));
        registry.register_content_type(ContentType::new("attachment", "Media"));
        registry.register_taxonomy(Taxonomy::new("category", "Categories", &["post"]));
        registry.register_taxonomy(Taxonomy::new("post_tag", "Tags", &["post"]));
        registry
    }

    /// Register a content type, replacing any with the same slug.
    pub fn register_content_type(&self, content_type: ContentType) {
        debug!(slug = %content_type.slug, "registered content type");
        self.inner
            .content_types
            .insert(content_type.slug.clone(), content_type);
    }

    /// Register a taxonomy, replacing any with the same slug.
    pub fn register_taxonomy(&self, taxonomy: Taxonomy) {
        debug!(
            slug = %taxonomy.slug,
            object_types = ?taxonomy.object_types,
            "registered taxonomy"
        );
        self.inner
            .taxonomies
            .insert(taxonomy.slug.clone(), taxonomy);
    }

    /// Fill in term counts from a store. Terms registered with a nonzero
    /// count keep it.
    pub fn apply_term_counts(&self, counts: &TermCounts) {
        for mut taxonomy in self.inner.taxonomies.iter_mut() {
            let slug = taxonomy.slug.clone();
            for term in taxonomy.terms.iter_mut().filter(|term| term.count == 0) {
                term.count = counts.get(&(slug.clone(), term.id)).copied().unwrap_or(0);
            }
        }
    }

    pub fn content_type(&self, slug: &str) -> Option<ContentType> {
        self.inner.content_types.get(slug).map(|t| t.value().clone())
    }

    pub fn taxonomy(&self, slug: &str) -> Option<Taxonomy> {
        self.inner.taxonomies.get(slug).map(|t| t.value().clone())
    }

    /// Whether `taxonomy` exists and applies to `content_type`.
    pub fn applies_to(&self, content_type: &str, taxonomy: &str) -> bool {
        self.inner
            .taxonomies
            .get(taxonomy)
            .is_some_and(|t| t.applies_to(content_type))
    }

    /// Viewable content types offered for selection, sorted by slug.
    pub fn selectable_content_types(&self) -> Vec<ContentType> {
        let mut types: Vec<ContentType> = self
            .inner
            .content_types
            .iter()
            .filter(|t| t.viewable && !EXCLUDED_CONTENT_TYPES.contains(&t.slug.as_str()))
            .map(|t| t.value().clone())
            .collect();
        types.sort_by(|a, b| a.slug.cmp(&b.slug));
        types
    }

    /// Taxonomies applying to `content_type`, sorted by slug.
    pub fn taxonomies_for(&self, content_type: &str) -> Vec<Taxonomy> {
        let mut taxonomies: Vec<Taxonomy> = self
            .inner
            .taxonomies
            .iter()
            .filter(|t| t.applies_to(content_type))
            .map(|t| t.value().clone())
            .collect();
        taxonomies.sort_by(|a, b| a.slug.cmp(&b.slug));
        taxonomies
    }

    /// Terms of `taxonomy`; with `hide_empty`, terms no item carries are
    /// left out. Unknown taxonomies have no terms.
    pub fn terms(&self, taxonomy: &str, hide_empty: bool) -> Vec<Term> {
        self.inner
            .taxonomies
            .get(taxonomy)
            .map(|t| {
                t.terms
                    .iter()
                    .filter(|term| !hide_empty || term.count > 0)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl TaxonomyValidator for TaxonomyRegistry {
    fn applies_to(&self, content_type: &str, taxonomy: &str) -> bool {
        TaxonomyRegistry::applies_to(self, content_type, taxonomy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(id: i64, name: &str, count: u64) -> Term {
        Term {
            id,
            name: name.into(),
            slug: name.to_lowercase(),
            count,
        }
    }

    #[test]
    fn core_types_wire_categories_to_posts() {
        let registry = TaxonomyRegistry::with_core_types();
        assert!(registry.applies_to("post", "category"));
        assert!(registry.applies_to("post", "post_tag"));
        assert!(!registry.applies_to("page", "category"));
        assert!(!registry.applies_to("post", "genre"));
    }

    #[test]
    fn selectable_types_skip_internal_and_hidden() {
        let registry = TaxonomyRegistry::with_core_types();
        registry.register_content_type(ContentType::new("wp_block", "Patterns"));
        registry.register_content_type(ContentType {
            slug: "revision".into(),
            label: "Revisions".into(),
            viewable: false,
        });
        registry.register_content_type(ContentType::new("book", "Books"));

        let slugs: Vec<String> = registry
            .selectable_content_types()
            .into_iter()
            .map(|t| t.slug)
            .collect();
        assert_eq!(slugs, vec!["book", "page", "post"]);
    }

    #[test]
    fn reregistering_replaces() {
        let registry = TaxonomyRegistry::new();
        registry.register_taxonomy(Taxonomy::new("genre", "Genres", &["book"]));
        registry.register_taxonomy(Taxonomy::new("genre", "Genres", &["movie"]));
        assert!(!registry.applies_to("book", "genre"));
        assert!(registry.applies_to("movie", "genre"));
    }

    #[test]
    fn taxonomies_for_type() {
        let registry = TaxonomyRegistry::with_core_types();
        let slugs: Vec<String> = registry
            .taxonomies_for("post")
            .into_iter()
            .map(|t| t.slug)
            .collect();
        assert_eq!(slugs, vec!["category", "post_tag"]);
        assert!(registry.taxonomies_for("page").is_empty());
    }

    #[test]
    fn terms_hide_empty() {
        let registry = TaxonomyRegistry::new();
        registry.register_taxonomy(
            Taxonomy::new("category", "Categories", &["post"])
                .with_terms(vec![term(5, "News", 3), term(6, "Empty", 0)]),
        );

        assert_eq!(registry.terms("category", false).len(), 2);
        let visible = registry.terms("category", true);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 5);
        assert!(registry.terms("missing", false).is_empty());
    }

    #[test]
    fn store_counts_fill_unset_terms() {
        let registry = TaxonomyRegistry::new();
        registry.register_taxonomy(
            Taxonomy::new("category", "Categories", &["post"])
                .with_terms(vec![term(5, "News", 0), term(6, "Empty", 0), term(7, "Set", 2)]),
        );

        let counts = TermCounts::from([
            (("category".to_string(), 5), 4),
            (("category".to_string(), 7), 9),
            (("post_tag".to_string(), 6), 1),
        ]);
        registry.apply_term_counts(&counts);

        let visible: Vec<(i64, u64)> = registry
            .terms("category", true)
            .iter()
            .map(|t| (t.id, t.count))
            .collect();
        assert_eq!(visible, vec![(5, 4), (7, 2)]);
    }

    #[test]
    fn registry_is_a_validator() {
        fn check<V: TaxonomyValidator>(v: &V) -> bool {
            v.applies_to("post", "category")
        }
        assert!(check(&TaxonomyRegistry::with_core_types()));
    }
}
