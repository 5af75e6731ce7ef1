// src/services/normalizer.rs

//! Text normalization for scraped fields.
//!
//! Boards hand over titles and descriptions with HTML fragments, entities and
//! irregular whitespace. Line breaks become newlines, entities are decoded,
//! every complete tag becomes a space in place, then each line is
//! whitespace-collapsed and blank lines are dropped. A `<` that is never
//! closed by a `>` is plain text.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use serde_json::Value;

static RE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*br\s*/?\s*>").expect("valid line break pattern"));
static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Render a raw JSON value as text without cleaning it.
///
/// Null becomes an empty string; numbers, booleans and nested structures are
/// rendered as JSON.
pub fn raw_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Clean a raw JSON field value into plain text.
///
/// Missing and null values become an empty string; numbers, booleans and
/// nested structures are rendered to text first.
pub fn clean(value: Option<&Value>) -> String {
    value.map_or_else(String::new, |value| clean_text(&raw_text(value)))
}

/// Strip markup, decode entities and normalize whitespace.
///
/// `<br>` becomes a line break, any other tag becomes a space. The result is
/// stable: cleaning it again returns the same string.
pub fn clean_text(text: &str) -> String {
    // A pass that changes already collapsed text makes it strictly shorter,
    // so repeating until nothing changes terminates.
    let mut current = clean_once(text);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(text: &str) -> String {
    if !text.contains(['<', '&']) {
        return collapse_lines(text);
    }

    let text = RE_BREAK.replace_all(text, "\n");
    let text = decode_entities(&text);
    let text = RE_TAG.replace_all(&text, " ");
    collapse_lines(&text)
}

/// Decode HTML entities one level deep, leaving everything else as is.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    // Escape `<` so the parser sees nothing but text
    let fragment = Html::parse_fragment(&text.replace('<', "&lt;"));
    fragment.root_element().text().collect()
}

fn collapse_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Truncate text to `length` words, appending `...` when anything was cut.
pub fn truncate_words(text: &str, length: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= length {
        return text.to_string();
    }
    format!("{}...", words[..length].join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null() {
        assert_eq!(clean(None), "");
        assert_eq!(clean(Some(&Value::Null)), "");
    }

    #[test]
    fn test_non_text_values() {
        assert_eq!(clean(Some(&json!(42))), "42");
        assert_eq!(clean(Some(&json!(true))), "true");
        assert_eq!(clean(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
    }

    #[test]
    fn test_tags_become_spaces() {
        assert_eq!(clean_text("<b>Engineer</b>  II"), "Engineer II");
        assert_eq!(clean_text("<b>Senior</b>Dev"), "Senior Dev");
        assert_eq!(
            clean_text("<div><p>Build <em>fast</em> APIs</p></div>"),
            "Build fast APIs"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(clean_text("line one<br>line two"), "line one\nline two");
        assert_eq!(clean_text("a<BR/>b<br />c"), "a\nb\nc");
        assert_eq!(clean_text("a<br><br>  <br>b"), "a\nb");
    }

    #[test]
    fn test_whitespace_per_line() {
        assert_eq!(
            clean_text("  Senior   Rust\tDev  \n\n   Remote  \r\n"),
            "Senior Rust Dev\nRemote"
        );
        assert_eq!(clean_text("   \n \t "), "");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(clean_text("R&amp;D &lt;team&gt;"), "R&D");
        assert_eq!(clean_text("Tom&#39;s caf&eacute;"), "Tom's café");
        assert_eq!(clean_text("non&nbsp;breaking"), "non breaking");
        assert_eq!(clean_text("AT&T"), "AT&T");
    }

    #[test]
    fn test_double_encoded_markup() {
        assert_eq!(clean_text("&amp;lt;b&amp;gt;Lead&amp;lt;/b&amp;gt;"), "Lead");
    }

    #[test]
    fn test_malformed_markup() {
        assert_eq!(clean_text("<b>unclosed <i>nested</b> text"), "unclosed nested text");
        assert_eq!(clean_text("<p class=\"x\">ok</p>"), "ok");
        assert_eq!(clean_text("salary > 100k"), "salary > 100k");
    }

    #[test]
    fn test_unclosed_angle_bracket_is_text() {
        assert_eq!(
            clean_text("Needs a<b skill and lots of experience with Rust"),
            "Needs a<b skill and lots of experience with Rust"
        );
        assert_eq!(clean_text("pay &lt; 50k <b>net</b>"), "pay net");
        assert_eq!(clean_text("1 < 2 &amp; 3"), "1 < 2 & 3");
    }

    #[test]
    fn test_text_keeps_source_order() {
        assert_eq!(
            clean_text("<table><tr><td>first</td></tr>second</table>"),
            "first second"
        );
        assert_eq!(
            clean_text("<b>one <i>two</b> three</i> four"),
            "one two three four"
        );
    }

    #[test]
    fn test_no_markup_left() {
        let inputs = [
            "<ul><li>One</li><li>Two</li></ul>",
            "<script>alert(1)</script>Apply",
            "<a href='https://example.com'>link</a><br/>next",
            "&lt;em&gt;escaped&lt;/em&gt;",
        ];
        for input in inputs {
            let output = clean_text(input);
            assert!(!output.contains('<'), "{input:?} -> {output:?}");
            assert!(!output.contains("&lt;"), "{input:?} -> {output:?}");
        }
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "<b>Engineer</b>  II",
            "a<br>b<br/>\n\n c",
            "R&amp;D &amp;amp; more",
            "&amp;lt;i&amp;gt;x",
            "x < y && y > z",
            "  plain  text  ",
            "a&ltb",
            "",
        ];
        for input in inputs {
            let once = clean_text(input);
            assert_eq!(clean_text(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_deeply_encoded_markup() {
        let mut input = "&lt;b&gt;x".to_string();
        for _ in 0..12 {
            input = input.replace('&', "&amp;");
        }

        let once = clean_text(&input);
        assert_eq!(once, "x");
        assert_eq!(clean_text(&once), once);
    }

    #[test]
    fn test_raw_text() {
        assert_eq!(raw_text(&Value::Null), "");
        assert_eq!(raw_text(&json!("  kept  ")), "  kept  ");
        assert_eq!(raw_text(&json!(42)), "42");
    }

    #[test]
    fn test_truncate_words() {
        assert_eq!(truncate_words("one two three", 5), "one two three");
        assert_eq!(truncate_words("one two three four", 2), "one two...");
        assert_eq!(truncate_words("", 3), "");
    }
}
