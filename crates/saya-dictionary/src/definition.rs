use serde_json::{Map, Value};

use crate::error::ContentError;
use crate::record::stringify;
use crate::structured_content::{self, ContentNode, MAX_DEPTH};

/// Definition text ready for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDefinition {
    pub text: String,
    /// Set when the text contains both `<` and `>`
    pub is_html: bool,
}

/// Reduce a raw `definitions` value of any shape to a single string.
///
/// Never fails: if the value cannot be normalized, the stringified raw input is used.
pub fn normalize_definition(raw: &Value) -> NormalizedDefinition {
    let text = match normalize_value(raw, 0) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Falling back to raw definition text: {e}");
            stringify(raw)
        }
    };

    NormalizedDefinition {
        is_html: looks_like_html(&text),
        text,
    }
}

fn looks_like_html(text: &str) -> bool {
    text.contains('<') && text.contains('>')
}

fn normalize_value(raw: &Value, depth: usize) -> Result<String, ContentError> {
    if depth > MAX_DEPTH {
        return Err(ContentError::TooDeep { limit: MAX_DEPTH });
    }

    match raw {
        Value::String(text) => Ok(text.clone()),
        Value::Array(items) => normalize_list(items, depth),
        Value::Object(object) => normalize_object(object),
        other => Ok(stringify(other)),
    }
}

fn normalize_list(items: &[Value], depth: usize) -> Result<String, ContentError> {
    let mut parts = Vec::with_capacity(items.len());

    for item in items {
        let part = normalize_value(item, depth + 1)?;
        if item.is_null() || part == "null" {
            continue;
        }
        parts.push(part);
    }

    Ok(parts.join("\n"))
}

fn normalize_object(object: &Map<String, Value>) -> Result<String, ContentError> {
    // Both `{"type": "structured-content", "content": ..}` and any other object carrying
    // `content` render just that content
    if let Some(content) = object.get("content") {
        return structured_content::render(content);
    }

    if object.contains_key("tag") {
        return ContentNode::from_object(object).map(|node| node.to_html());
    }

    if let Some(text) = object.get("text").and_then(Value::as_str) {
        return Ok(text.to_string());
    }

    Ok(Value::Object(object.clone()).to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn normalize(value: Value) -> NormalizedDefinition {
        normalize_definition(&value)
    }

    #[test]
    fn test_plain_string() {
        let def = normalize(json!("a cat"));
        assert_eq!(def.text, "a cat");
        assert!(!def.is_html);
    }

    #[test]
    fn test_list_joins_with_newlines() {
        let def = normalize(json!(["a cat", "a feline"]));
        assert_eq!(def.text, "a cat\na feline");
        assert!(!def.is_html);
    }

    #[test]
    fn test_list_suppresses_null() {
        assert_eq!(normalize(json!(["a", null, "b", "null"])).text, "a\nb");
        assert_eq!(normalize(json!([null])).text, "");
    }

    #[test]
    fn test_list_mixes_shapes() {
        let def = normalize(json!([
            "one",
            {"type": "structured-content", "content": {"type": "bold", "content": "two"}},
            ["three", "four"],
            5
        ]));
        assert_eq!(def.text, "one\n<b>two</b>\nthree\nfour\n5");
        assert!(def.is_html);
    }

    #[test]
    fn test_structured_content_is_html() {
        let def = normalize(json!({
            "type": "structured-content",
            "content": [{"type": "bold", "content": ["x"]}]
        }));
        assert_eq!(def.text, "<b>x</b>");
        assert!(def.is_html);
    }

    #[test]
    fn test_content_without_structured_type_renders_content() {
        let def = normalize(json!({"type": "image", "content": ["a", "b"]}));
        assert_eq!(def.text, "ab");
        assert!(!def.is_html);
    }

    #[test]
    fn test_tag_object_rendered_as_node() {
        let def = normalize(json!({"tag": "span", "class": "x"}));
        assert_eq!(def.text, r#"<span class="x"></span>"#);
        assert!(def.is_html);
    }

    #[test]
    fn test_text_field() {
        let def = normalize(json!({"type": "text", "text": "a dog"}));
        assert_eq!(def.text, "a dog");
    }

    #[test]
    fn test_unknown_object_is_stringified() {
        assert_eq!(normalize(json!({"foo": 1})).text, r#"{"foo":1}"#);
    }

    #[test]
    fn test_other_types_stringified() {
        assert_eq!(normalize(json!(42)).text, "42");
        assert_eq!(normalize(json!(true)).text, "true");
        assert_eq!(normalize(json!(null)).text, "");
    }

    #[test]
    fn test_html_flag_is_heuristic() {
        assert!(normalize(json!("1 < 2 and 3 > 2")).is_html);
        assert!(!normalize(json!("only < here")).is_html);
    }

    #[test]
    fn test_failure_falls_back_to_raw_text() {
        let mut tree = json!("leaf");
        for _ in 0..=MAX_DEPTH + 1 {
            tree = json!({"type": "bold", "content": tree});
        }
        let raw = json!({"type": "structured-content", "content": tree});

        let def = normalize(raw.clone());
        assert_eq!(def.text, raw.to_string());
    }
}
