//! Content types and taxonomies known to the host.

mod registry;
mod types;

pub use registry::{EXCLUDED_CONTENT_TYPES, TaxonomyRegistry};
pub use types::{ContentType, Taxonomy, Term};
