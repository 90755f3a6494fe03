//! Output encoding.
//!
//! Separate functions for separate output contexts. Plain text goes
//! through [`escape_html`], content text that may already hold entities
//! through [`escape_text`], links through [`escape_url`], and thumbnail
//! markup through [`sanitize_markup`]. They are not interchangeable.

use regex::Regex;
use std::sync::LazyLock;
use url::{ParseError, Url};

/// A complete named, decimal or hex character reference.
#[allow(clippy::expect_used)]
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6});")
        .expect("valid regex")
});

/// Schemes a rendered link may carry. Relative URLs are always allowed.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto", "ftp", "tel"];

/// Extra attributes kept on thumbnail images.
const IMG_ATTRIBUTES: &[&str] = &["class", "srcset", "sizes", "loading", "decoding"];

/// Escape text for HTML element or attribute context.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escape content text without re-encoding character references.
///
/// `&amp;`, `&#8217;` and `&#x2019;` pass through unchanged; a bare `&`
/// becomes `&amp;`. Everything else is escaped as by [`escape_html`].
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '&' if ENTITY_RE.is_match(&s[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

/// Clean a URL for an `href` attribute.
///
/// Control characters are dropped and spaces percent-encoded. A URL with a
/// scheme outside [`ALLOWED_SCHEMES`], or one that cannot be parsed, yields
/// an empty string.
pub fn escape_url(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        if c == ' ' {
            cleaned.push_str("%20");
        } else if !c.is_control() && !c.is_whitespace() {
            cleaned.push(c);
        }
    }

    if cleaned.is_empty() || !scheme_allowed(&cleaned) {
        return String::new();
    }

    escape_html(&cleaned)
}

fn scheme_allowed(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => ALLOWED_SCHEMES.contains(&parsed.scheme()),
        Err(ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

/// Sanitize trusted-shape markup such as a thumbnail `<img>`.
///
/// Scripts, event handlers and unsafe URLs are removed; images keep their
/// presentational attributes.
pub fn sanitize_markup(markup: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder.add_tag_attributes("img", IMG_ATTRIBUTES);
    builder.clean(markup).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_special_chars() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(escape_html("Hello world"), "Hello world");
    }

    #[test]
    fn text_keeps_existing_entities() {
        assert_eq!(
            escape_text("Tom &amp; Jerry&#8217;s &#x2019; &nbsp;"),
            "Tom &amp; Jerry&#8217;s &#x2019; &nbsp;"
        );
    }

    #[test]
    fn text_escapes_bare_ampersands_and_tags() {
        assert_eq!(escape_text("R&D <b>"), "R&amp;D &lt;b&gt;");
        assert_eq!(escape_text("&amp"), "&amp;amp");
        assert_eq!(escape_text("& ;"), "&amp; ;");
        assert_eq!(escape_text("&#;"), "&amp;#;");
    }

    #[test]
    fn allowed_urls_pass() {
        assert_eq!(escape_url("https://example.com/a"), "https://example.com/a");
        assert_eq!(escape_url("mailto:me@example.com"), "mailto:me@example.com");
        assert_eq!(escape_url("/hello-world/"), "/hello-world/");
        assert_eq!(escape_url("#top"), "#top");
    }

    #[test]
    fn ampersands_are_escaped_for_attributes() {
        assert_eq!(escape_url("/?p=1&x=2"), "/?p=1&amp;x=2");
    }

    #[test]
    fn unsafe_schemes_are_rejected() {
        assert_eq!(escape_url("javascript:alert(1)"), "");
        assert_eq!(escape_url("JavaScript:alert(1)"), "");
        assert_eq!(escape_url("java\tscript:alert(1)"), "");
        assert_eq!(escape_url("data:text/html,<b>x</b>"), "");
    }

    #[test]
    fn whitespace_is_cleaned() {
        assert_eq!(escape_url("  /a b/\n"), "/a%20b/");
        assert_eq!(escape_url("   "), "");
    }

    #[test]
    fn quotes_cannot_break_out_of_attribute() {
        let escaped = escape_url("/x\"onmouseover=\"alert(1)");
        assert!(!escaped.contains('"'));
    }

    #[test]
    fn markup_keeps_image() {
        let markup = r#"<img src="https://example.com/t.jpg" alt="Thumb" class="wp-post-image">"#;
        let clean = sanitize_markup(markup);
        assert!(clean.contains("<img"));
        assert!(clean.contains("src=\"https://example.com/t.jpg\""));
        assert!(clean.contains("class=\"wp-post-image\""));
    }

    #[test]
    fn markup_strips_script_and_handlers() {
        let markup = r#"<img src="/t.jpg" onerror="alert(1)"><script>alert(2)</script>"#;
        let clean = sanitize_markup(markup);
        assert!(!clean.contains("onerror"));
        assert!(!clean.contains("script"));
        assert!(clean.contains("<img"));
    }
}
