//! Loose coercion of raw attribute values.
//!
//! Attribute bags come from an editor and are never trusted to carry the
//! declared types. Every helper here degrades to a neutral value instead of
//! failing.

use serde_json::Value;
use std::sync::LazyLock;

use regex::Regex;

// Patterns are literals; compilation cannot fail at runtime.
#[allow(clippy::expect_used)]
static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)[^>]*?>.*?</(script|style)>").expect("valid regex")
});

#[allow(clippy::expect_used)]
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

#[allow(clippy::expect_used)]
static OCTET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid regex"));

/// Parse the leading integer of a string.
///
/// Leading whitespace and one optional sign are accepted, then the longest
/// run of ASCII digits. No digits yields 0. Overflow saturates.
pub fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for b in rest.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative { -value } else { value }
}

/// Coerce a JSON value to an integer.
///
/// Returns `None` for `null`, arrays and objects; callers treat that as
/// "absent" and apply their default.
pub fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            // `as` saturates for out-of-range floats and maps NaN to 0.
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => Some(parse_leading_int(s)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Truthiness of a JSON value.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

/// String form of a scalar JSON value. Arrays, objects and `null` have none.
pub fn string_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reduce a string to a lowercase key: only `a-z`, `0-9`, `_` and `-` survive.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Clean a single-line text field.
///
/// Strips markup (including script/style bodies), drops percent-encoded
/// octets, and collapses all whitespace runs to single spaces.
pub fn sanitize_text_field(raw: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(raw, "");
    let without_tags = TAG_RE.replace_all(&without_blocks, "");
    let without_octets = OCTET_RE.replace_all(&without_tags, "");
    without_octets.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip all markup from a text, dropping script/style bodies entirely.
pub fn strip_all_tags(raw: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(raw, "");
    TAG_RE.replace_all(&without_blocks, "").trim().to_string()
}

/// Keep a space-separated list of classes, each reduced to `[A-Za-z0-9_-]`.
pub fn sanitize_html_classes(raw: &str) -> String {
    raw.split_whitespace()
        .map(|class| {
            class
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
                .collect::<String>()
        })
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn leading_int_truncates_at_first_non_digit() {
        assert_eq!(parse_leading_int("12abc"), 12);
        assert_eq!(parse_leading_int("  7 items"), 7);
        assert_eq!(parse_leading_int("-4"), -4);
        assert_eq!(parse_leading_int("+9"), 9);
    }

    #[test]
    fn leading_int_without_digits_is_zero() {
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("-"), 0);
    }

    #[test]
    fn leading_int_saturates() {
        assert_eq!(parse_leading_int("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn int_value_handles_json_shapes() {
        assert_eq!(int_value(&json!(5)), Some(5));
        assert_eq!(int_value(&json!(3.9)), Some(3));
        assert_eq!(int_value(&json!("8px")), Some(8));
        assert_eq!(int_value(&json!(true)), Some(1));
        assert_eq!(int_value(&json!(null)), None);
        assert_eq!(int_value(&json!([1])), None);
    }

    #[test]
    fn truthiness() {
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("yes")));
        assert!(truthy(&json!("false")));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!([])));
        assert!(!truthy(&json!(null)));
    }

    #[test]
    fn key_sanitizing() {
        assert_eq!(sanitize_key("Menu_Order"), "menu_order");
        assert_eq!(sanitize_key("ID"), "id");
        assert_eq!(sanitize_key("post tag!"), "posttag");
    }

    #[test]
    fn text_field_sanitizing() {
        assert_eq!(sanitize_text_field("  <b>post</b>\n"), "post");
        assert_eq!(sanitize_text_field("a<script>alert(1)</script>b"), "ab");
        assert_eq!(sanitize_text_field("my%20type"), "mytype");
        assert_eq!(sanitize_text_field("two   words"), "two words");
    }

    #[test]
    fn strip_tags_keeps_text() {
        assert_eq!(
            strip_all_tags("<p>Hello <em>there</em></p><style>p{}</style>"),
            "Hello there"
        );
    }

    #[test]
    fn class_sanitizing() {
        assert_eq!(
            sanitize_html_classes("is-style-card \"><x  extra"),
            "is-style-card x extra"
        );
    }
}
