//! Content type and taxonomy definitions.

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// A content type items can belong to (`post`, `page`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    pub slug: String,
    pub label: String,
    /// Whether the type has public views. Non-viewable types are never
    /// offered in the editor.
    #[serde(default = "default_true")]
    pub viewable: bool,
}

impl ContentType {
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            viewable: true,
        }
    }
}

/// A term of a taxonomy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Number of published items carrying the term.
    #[serde(default)]
    pub count: u64,
}

/// A taxonomy and the content types it applies to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Taxonomy {
    pub slug: String,
    pub label: String,
    #[serde(default)]
    pub object_types: Vec<String>,
    #[serde(default)]
    pub terms: Vec<Term>,
}

impl Taxonomy {
    pub fn new(slug: impl Into<String>, label: impl Into<String>, object_types: &[&str]) -> Self {
        Self {
            slug: slug.into(),
            label: label.into(),
            object_types: object_types.iter().map(|t| t.to_string()).collect(),
            terms: Vec::new(),
        }
    }

    pub fn with_terms(mut self, terms: Vec<Term>) -> Self {
        self.terms = terms;
        self
    }

    pub fn applies_to(&self, content_type: &str) -> bool {
        self.object_types.iter().any(|t| t == content_type)
    }
}
