//! `{path}` placeholder scanning and substitution.
//!
//! A token is `{` followed by one or more of `[A-Za-z0-9._-]` and a closing
//! `}`. Anything else between braces, including slide markers like
//! `{id:intro}`, is plain text.

use crate::template::resolver::resolve;
use memchr::memchr;
use serde_json::Value;
use std::ops::Range;

/// Byte ranges of one placeholder token: the whole `{...}` and the path
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Range<usize>,
    pub path: Range<usize>,
}

#[inline]
fn is_path_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-')
}

/// Find the token starting at or after `from`, if any.
fn next_token(bytes: &[u8], mut from: usize) -> Option<Token> {
    while let Some(offset) = memchr(b'{', &bytes[from..]) {
        let open = from + offset;
        let start = open + 1;
        let end = start + bytes[start..].iter().take_while(|&&b| is_path_byte(b)).count();

        if end > start && bytes.get(end) == Some(&b'}') {
            return Some(Token {
                span: open..end + 1,
                path: start..end,
            });
        }
        from = start;
    }
    None
}

/// Every placeholder token in `text`, left to right, non-overlapping.
pub fn tokens(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(token) = next_token(bytes, pos) {
        pos = token.span.end;
        found.push(token);
    }
    found
}

/// Whether `text` holds at least one placeholder token.
#[inline]
pub fn has_tokens(text: &str) -> bool {
    next_token(text.as_bytes(), 0).is_some()
}

/// Replace every token in `text` with its resolved value in `model`.
///
/// Returns `None` when the text holds no tokens. Replacement happens in a
/// single pass, so resolved values are never scanned for further tokens.
pub fn substitute(text: &str, model: &Value) -> Option<String> {
    let found = tokens(text);
    if found.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for token in found {
        out.push_str(&text[pos..token.span.start]);
        out.push_str(&value_to_string(resolve(model, &text[token.path])));
        pos = token.span.end;
    }
    out.push_str(&text[pos..]);
    Some(out)
}

/// The text form of a context or cell value.
///
/// Strings are verbatim, absent and `null` are empty, and every other value
/// uses its compact JSON form.
pub fn value_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Values of every `{id:name}` marker in `text`, left to right.
pub fn slide_markers(text: &str) -> Vec<&str> {
    const MARKER: &[u8] = b"{id:";

    let bytes = text.as_bytes();
    let mut markers = Vec::new();
    let mut from = 0;
    while let Some(offset) = memchr(b'{', &bytes[from..]) {
        let open = from + offset;
        from = open + 1;
        if !bytes[open..].starts_with(MARKER) {
            continue;
        }
        let start = open + MARKER.len();
        let end = start + bytes[start..].iter().take_while(|&&b| is_path_byte(b)).count();
        if end > start && bytes.get(end) == Some(&b'}') {
            markers.push(&text[start..end]);
            from = end + 1;
        }
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_nested_path() {
        assert_eq!(
            substitute("{a.b}", &json!({"a": {"b": "X"}})).as_deref(),
            Some("X")
        );
        assert_eq!(substitute("{a.b}", &json!({"a": {}})).as_deref(), Some(""));
    }

    #[test]
    fn test_mixed_text_and_tokens() {
        let model = json!({"name": "Ada", "n": 3, "ok": true, "none": null, "list": [1, "two"]});
        assert_eq!(
            substitute("Hi {name}, {n} items ({ok}){none}.", &model).as_deref(),
            Some("Hi Ada, 3 items (true).")
        );
        assert_eq!(substitute("{list}", &model).as_deref(), Some(r#"[1,"two"]"#));
        assert_eq!(substitute("{list.1}", &model).as_deref(), Some("two"));
    }

    #[test]
    fn test_non_tokens_left_alone() {
        let model = json!({"a": "X"});
        assert_eq!(substitute("{}", &model), None);
        assert_eq!(substitute("{a b}", &model), None);
        assert_eq!(substitute("{id:intro}", &model), None);
        assert_eq!(substitute("{{a}}", &model).as_deref(), Some("{X}"));
        assert_eq!(substitute("{ {a}", &model).as_deref(), Some("{ X"));
        assert_eq!(substitute("unclosed {a", &model), None);
    }

    #[test]
    fn test_single_pass() {
        let model = json!({"a": "{b}", "b": "nested"});
        assert_eq!(substitute("{a}", &model).as_deref(), Some("{b}"));
    }

    #[test]
    fn test_multibyte_text() {
        let model = json!({"city": "Zürich"});
        assert_eq!(
            substitute("Büro: {city} ✓", &model).as_deref(),
            Some("Büro: Zürich ✓")
        );
    }

    #[test]
    fn test_slide_markers() {
        assert_eq!(slide_markers("intro {id:intro} and {id:x-2}"), vec!["intro", "x-2"]);
        assert_eq!(slide_markers("{id:}{id:a b}{ID:c}"), Vec::<&str>::new());
        assert_eq!(slide_markers("{{id:a}"), vec!["a"]);
    }

    #[test]
    fn test_value_to_string_numbers() {
        assert_eq!(value_to_string(Some(&json!(1.5))), "1.5");
        assert_eq!(value_to_string(Some(&json!(-7))), "-7");
        assert_eq!(value_to_string(None), "");
    }

    proptest! {
        #[test]
        fn prop_token_free_text_untouched(text in "[^{]*") {
            prop_assert!(!has_tokens(&text));
            prop_assert_eq!(substitute(&text, &json!({"a": 1})), None);
        }

        #[test]
        fn prop_output_has_no_tokens_when_values_are_plain(
            prefix in "[a-z ]{0,10}",
            key in "[a-z]{1,6}",
            value in "[a-z ]{0,10}",
        ) {
            let text = format!("{}{{{}}}", prefix, key);
            let model = json!({ key.clone(): value.clone() });
            let out = substitute(&text, &model).unwrap();
            prop_assert_eq!(out, format!("{}{}", prefix, value));
        }
    }
}
