//! Derived excerpts.

use crate::selection::coerce::strip_all_tags;

/// Words kept in a derived excerpt.
pub const EXCERPT_WORDS: usize = 25;

/// Appended when a derived excerpt was cut short.
pub const EXCERPT_MORE: &str = " \u{2026}";

/// Derive an excerpt from a raw body: strip markup, keep the first
/// [`EXCERPT_WORDS`] words.
pub fn derive_excerpt(raw_body: &str) -> String {
    trim_words(&strip_all_tags(raw_body), EXCERPT_WORDS, EXCERPT_MORE)
}

/// Keep the first `limit` whitespace-separated words of `text`.
///
/// Whitespace runs collapse to single spaces. `more` is appended only when
/// words were dropped.
pub fn trim_words(text: &str, limit: usize, more: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= limit {
        return words.join(" ");
    }

    let mut trimmed = words[..limit].join(" ");
    trimmed.push_str(more);
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept_whole() {
        assert_eq!(trim_words("one  two\nthree", 5, " …"), "one two three");
    }

    #[test]
    fn long_text_is_cut_with_marker() {
        assert_eq!(trim_words("a b c d e", 3, " …"), "a b c …");
    }

    #[test]
    fn exact_length_gets_no_marker() {
        assert_eq!(trim_words("a b c", 3, " …"), "a b c");
    }

    #[test]
    fn derived_excerpt_strips_markup() {
        let body = "<p>Hello <strong>world</strong></p><script>alert(1)</script>";
        assert_eq!(derive_excerpt(body), "Hello world");
    }

    #[test]
    fn derived_excerpt_limits_words() {
        let body = (1..=30).map(|n| format!("w{n}")).collect::<Vec<_>>().join(" ");
        let excerpt = derive_excerpt(&body);
        assert!(excerpt.starts_with("w1 w2"));
        assert!(excerpt.ends_with("w25 \u{2026}"));
        assert!(!excerpt.contains("w26"));
    }

    #[test]
    fn empty_body_gives_empty_excerpt() {
        assert_eq!(derive_excerpt("<p>  </p>"), "");
    }
}
