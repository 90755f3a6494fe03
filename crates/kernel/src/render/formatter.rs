//! Showcase result formatter.
//!
//! Turns the items returned for a plan into a [`RenderedFragment`]. Pure:
//! the same items and attributes always produce the same output.

use super::escape::{escape_text, escape_url, sanitize_markup};
use super::excerpt::derive_excerpt;
use super::fragment::RenderedFragment;
use crate::content::ContentItem;
use crate::selection::SelectionAttributes;
use crate::selection::coerce::sanitize_html_classes;

/// Message shown when nothing matched.
pub const DEFAULT_NO_RESULTS_TEXT: &str = "No posts found matching your criteria.";

/// Wrapper class generated for the showcase block.
pub const DEFAULT_BLOCK_CLASS: &str = "wp-block-dcsb-dynamic-content";

/// Class every showcase wrapper carries.
pub const WRAPPER_CLASS: &str = "dcsb-dynamic-content-showcase-wrapper";

#[derive(Debug, Clone)]
pub struct ResultFormatter {
    no_results_text: String,
    block_class: String,
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self {
            no_results_text: DEFAULT_NO_RESULTS_TEXT.to_string(),
            block_class: DEFAULT_BLOCK_CLASS.to_string(),
        }
    }
}

impl ResultFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_no_results_text(mut self, text: impl Into<String>) -> Self {
        self.no_results_text = text.into();
        self
    }

    pub fn with_block_class(mut self, class: impl Into<String>) -> Self {
        self.block_class = class.into();
        self
    }

    pub fn no_results_text(&self) -> &str {
        &self.no_results_text
    }

    /// Format `items` in the given order.
    pub fn format(
        &self,
        items: &[ContentItem],
        attributes: &SelectionAttributes,
    ) -> RenderedFragment {
        if items.is_empty() {
            return RenderedFragment::NoResults {
                message: self.no_results_text.clone(),
            };
        }

        RenderedFragment::List {
            wrapper_classes: self.wrapper_classes(attributes),
            items: items
                .iter()
                .map(|item| self.format_item(item, attributes))
                .collect(),
        }
    }

    fn wrapper_classes(&self, attributes: &SelectionAttributes) -> Vec<String> {
        let mut classes = vec![self.block_class.clone(), WRAPPER_CLASS.to_string()];
        if let Some(align) = attributes.align {
            classes.push(align.class_name().to_string());
        }
        if let Some(extra) = &attributes.class_name {
            let extra = sanitize_html_classes(extra);
            if !extra.is_empty() {
                classes.push(extra);
            }
        }
        classes
    }

    fn format_item(&self, item: &ContentItem, attributes: &SelectionAttributes) -> String {
        let url = escape_url(&item.permalink);
        let mut html = String::from("<li class=\"dcsb-list-item\">");

        if attributes.show_thumbnail
            && let Some(markup) = item.thumbnail_markup.as_deref()
            && !markup.trim().is_empty()
        {
            html.push_str(&format!(
                "<div class=\"dcsb-thumbnail\"><a href=\"{url}\">{}</a></div>",
                sanitize_markup(markup)
            ));
        }

        html.push_str("<div class=\"dcsb-content\">");
        html.push_str(&format!(
            "<h3><a href=\"{url}\">{}</a></h3>",
            escape_text(&item.title)
        ));

        if attributes.show_excerpt {
            let excerpt = match item.manual_excerpt.as_deref() {
                Some(manual) if !manual.is_empty() => manual.to_string(),
                _ => derive_excerpt(&item.raw_body),
            };
            if !excerpt.is_empty() {
                html.push_str(&format!(
                    "<p class=\"dcsb-excerpt\">{}</p>",
                    escape_text(&excerpt)
                ));
            }
        }

        html.push_str("</div></li>");
        html
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::selection::Align;

    fn attrs(show_excerpt: bool, show_thumbnail: bool) -> SelectionAttributes {
        SelectionAttributes {
            show_excerpt,
            show_thumbnail,
            ..SelectionAttributes::default()
        }
    }

    #[test]
    fn empty_items_render_no_results() {
        let formatter = ResultFormatter::default();
        for (excerpt, thumb) in [(true, true), (false, false), (true, false)] {
            let html = formatter.format(&[], &attrs(excerpt, thumb)).to_html();
            assert_eq!(html, "<p>No posts found matching your criteria.</p>");
        }
    }

    #[test]
    fn custom_no_results_text_is_escaped() {
        let formatter = ResultFormatter::default().with_no_results_text("Nada & nothing");
        assert_eq!(
            formatter.format(&[], &attrs(true, false)).to_html(),
            "<p>Nada &amp; nothing</p>"
        );
    }

    #[test]
    fn single_item_full_structure() {
        let items = [ContentItem::new("Hello", "/hello/").excerpt("Short")];
        let html = ResultFormatter::default()
            .format(&items, &attrs(true, false))
            .to_html();
        assert_eq!(
            html,
            "<div class=\"wp-block-dcsb-dynamic-content dcsb-dynamic-content-showcase-wrapper\">\
             <ul class=\"dcsb-dynamic-content-list\">\
             <li class=\"dcsb-list-item\"><div class=\"dcsb-content\">\
             <h3><a href=\"/hello/\">Hello</a></h3>\
             <p class=\"dcsb-excerpt\">Short</p></div></li></ul></div>"
        );
    }

    #[test]
    fn preserves_input_order() {
        let items = [
            ContentItem::new("Second", "/2/"),
            ContentItem::new("First", "/1/"),
        ];
        let fragment = ResultFormatter::default().format(&items, &attrs(false, false));
        let entries = fragment.items();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("Second"));
        assert!(entries[1].contains("First"));
    }

    #[test]
    fn derived_excerpt_when_manual_is_empty() {
        let items = [
            ContentItem::new("A", "/a/").excerpt("").body("<p>Body of <em>A</em></p>"),
            ContentItem::new("B", "/b/").excerpt("B excerpt"),
        ];
        let fragment = ResultFormatter::default().format(&items, &attrs(true, false));
        assert!(fragment.items()[0].contains("<p class=\"dcsb-excerpt\">Body of A</p>"));
        assert!(fragment.items()[1].contains("<p class=\"dcsb-excerpt\">B excerpt</p>"));
    }

    #[test]
    fn empty_derived_excerpt_is_omitted() {
        let items = [ContentItem::new("A", "/a/")];
        let fragment = ResultFormatter::default().format(&items, &attrs(true, false));
        assert!(!fragment.items()[0].contains("dcsb-excerpt"));
    }

    #[test]
    fn excerpt_hidden_when_disabled() {
        let items = [ContentItem::new("A", "/a/").excerpt("Visible?")];
        let fragment = ResultFormatter::default().format(&items, &attrs(false, false));
        assert!(!fragment.items()[0].contains("Visible?"));
    }

    #[test]
    fn thumbnail_precedes_content() {
        let items = [ContentItem::new("A", "/a/").thumbnail("<img src=\"/t.jpg\" alt=\"\">")];
        let fragment = ResultFormatter::default().format(&items, &attrs(false, true));
        let entry = &fragment.items()[0];
        let thumb = entry.find("dcsb-thumbnail").unwrap();
        let content = entry.find("dcsb-content").unwrap();
        assert!(thumb < content);
        assert!(entry.contains("<a href=\"/a/\"><img"));
    }

    #[test]
    fn thumbnail_requires_flag_and_markup() {
        let with_markup = [ContentItem::new("A", "/a/").thumbnail("<img src=\"/t.jpg\">")];
        let off = ResultFormatter::default().format(&with_markup, &attrs(false, false));
        assert!(!off.items()[0].contains("dcsb-thumbnail"));

        let without_markup = [ContentItem::new("A", "/a/")];
        let on = ResultFormatter::default().format(&without_markup, &attrs(false, true));
        assert!(!on.items()[0].contains("dcsb-thumbnail"));
    }

    #[test]
    fn title_and_url_are_escaped() {
        let items = [ContentItem::new("<b>Tom & Jerry</b>", "javascript:alert(1)")];
        let html = ResultFormatter::default()
            .format(&items, &attrs(false, false))
            .to_html();
        assert!(html.contains("&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"));
        assert!(html.contains("<a href=\"\">"));
    }

    #[test]
    fn existing_entities_are_not_escaped_twice() {
        let items = [ContentItem::new("Tom &amp; Jerry&#8217;s", "/t/")
            .body("<p>Hello&nbsp;world &amp; more</p>")];
        let html = ResultFormatter::default()
            .format(&items, &attrs(true, false))
            .to_html();
        assert!(html.contains("<h3><a href=\"/t/\">Tom &amp; Jerry&#8217;s</a></h3>"));
        assert!(html.contains("<p class=\"dcsb-excerpt\">Hello&nbsp;world &amp; more</p>"));
        assert!(!html.contains("&amp;amp;"));
        assert!(!html.contains("&amp;#8217;"));
    }

    #[test]
    fn align_and_custom_class_extend_wrapper() {
        let attributes = SelectionAttributes {
            align: Some(Align::Wide),
            class_name: Some("featured \"x\"".into()),
            ..SelectionAttributes::default()
        };
        let items = [ContentItem::new("A", "/a/")];
        let html = ResultFormatter::default().format(&items, &attributes).to_html();
        assert!(html.starts_with(
            "<div class=\"wp-block-dcsb-dynamic-content dcsb-dynamic-content-showcase-wrapper alignwide featured x\">"
        ));
    }

    #[test]
    fn output_is_deterministic() {
        let items = [
            ContentItem::new("A", "/a/").body("one two three"),
            ContentItem::new("B", "/b/").thumbnail("<img src=\"/b.jpg\">"),
        ];
        let formatter = ResultFormatter::default();
        let attributes = attrs(true, true);
        assert_eq!(
            formatter.format(&items, &attributes).to_html(),
            formatter.format(&items, &attributes).to_html()
        );
    }
}
