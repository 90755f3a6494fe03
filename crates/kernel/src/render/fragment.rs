//! Rendered output of the showcase formatter.

use std::fmt;

use serde::Serialize;

use super::escape::escape_html;

/// Class of the list inside the wrapper.
pub const LIST_CLASS: &str = "dcsb-dynamic-content-list";

/// A rendered, HTML-safe fragment.
///
/// List items are stored already rendered; messages and classes are escaped
/// when the fragment is written out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderedFragment {
    /// Nothing matched the selection.
    #[serde(rename_all = "camelCase")]
    NoResults { message: String },

    /// Wrapper with one list entry per item, in selection order.
    #[serde(rename_all = "camelCase")]
    List {
        wrapper_classes: Vec<String>,
        items: Vec<String>,
    },
}

impl RenderedFragment {
    /// Write the fragment out as HTML.
    pub fn to_html(&self) -> String {
        match self {
            RenderedFragment::NoResults { message } => {
                format!("<p>{}</p>", escape_html(message))
            }
            RenderedFragment::List {
                wrapper_classes,
                items,
            } => {
                let mut html = format!(
                    "<div class=\"{}\"><ul class=\"{LIST_CLASS}\">",
                    escape_html(&wrapper_classes.join(" "))
                );
                for item in items {
                    html.push_str(item);
                }
                html.push_str("</ul></div>");
                html
            }
        }
    }

    /// Rendered list entries; empty for the no-results fragment.
    pub fn items(&self) -> &[String] {
        match self {
            RenderedFragment::NoResults { .. } => &[],
            RenderedFragment::List { items, .. } => items,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderedFragment::NoResults { .. })
    }
}

impl fmt::Display for RenderedFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
