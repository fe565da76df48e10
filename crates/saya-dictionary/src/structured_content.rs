//! Structured content trees and their HTML rendering.
//!
//! A tree is decoded from JSON once into [`ContentNode`] and then rendered with an exhaustive
//! match. Output is limited to the tags emitted below plus the five escaped entities.

use serde_json::{Map, Value};

use crate::error::ContentError;

/// Deepest nesting accepted before decoding gives up
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    /// `null` or a missing `content` field
    Empty,
    Text(String),
    List(Vec<ContentNode>),
    Element(Element),
}

/// Tagged object node with the fields the renderer understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: NodeKind,
    pub content: Box<ContentNode>,
    pub text: Option<String>,
    pub url: Option<String>,
    pub ruby: Option<String>,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Bold,
    Italic,
    Kanji,
    Kana,
    Ruby,
    Link,
    Div,
    Span,
    LineBreak,
    HorizontalRule,
    Image,
    Heading,
    /// Anything else, including objects without a kind
    Unknown(Option<String>),
}

impl NodeKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "bold" => NodeKind::Bold,
            "italic" => NodeKind::Italic,
            "kanji" => NodeKind::Kanji,
            "kana" => NodeKind::Kana,
            "ruby" => NodeKind::Ruby,
            "link" => NodeKind::Link,
            "div" => NodeKind::Div,
            "span" => NodeKind::Span,
            "br" => NodeKind::LineBreak,
            "hr" => NodeKind::HorizontalRule,
            "image" => NodeKind::Image,
            "heading" => NodeKind::Heading,
            other => NodeKind::Unknown(Some(other.to_string())),
        }
    }
}

impl ContentNode {
    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        Self::decode(value, 0)
    }

    /// Decode a single tagged object without wrapping it in a `Value` first
    pub fn from_object(object: &Map<String, Value>) -> Result<Self, ContentError> {
        Self::decode_object(object, 0)
    }

    fn decode(value: &Value, depth: usize) -> Result<Self, ContentError> {
        if depth > MAX_DEPTH {
            return Err(ContentError::TooDeep { limit: MAX_DEPTH });
        }

        let node = match value {
            Value::Null => ContentNode::Empty,
            Value::String(text) => ContentNode::Text(text.clone()),
            Value::Bool(_) | Value::Number(_) => ContentNode::Text(value.to_string()),
            Value::Array(items) => ContentNode::List(
                items
                    .iter()
                    .map(|item| Self::decode(item, depth + 1))
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(object) => Self::decode_object(object, depth)?,
        };

        Ok(node)
    }

    fn decode_object(object: &Map<String, Value>, depth: usize) -> Result<Self, ContentError> {
        let field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);

        // `type` is the canonical key, some dictionaries only set `tag`
        let kind = object
            .get("type")
            .or_else(|| object.get("tag"))
            .and_then(Value::as_str)
            .map_or(NodeKind::Unknown(None), NodeKind::from_name);

        let content = match object.get("content") {
            Some(content) => Self::decode(content, depth + 1)?,
            None => ContentNode::Empty,
        };

        Ok(ContentNode::Element(Element {
            kind,
            content: Box::new(content),
            text: field("text"),
            url: field("url"),
            ruby: field("ruby"),
            class: field("class"),
        }))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            ContentNode::Empty => {}
            ContentNode::Text(text) => push_escaped(out, text),
            ContentNode::List(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            ContentNode::Element(element) => element.write_html(out),
        }
    }
}

impl Element {
    fn write_html(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Bold => self.wrap_content(out, "<b>", "</b>"),
            NodeKind::Italic => self.wrap_content(out, "<i>", "</i>"),
            NodeKind::Heading => self.wrap_content(out, "<h3>", "</h3>"),
            NodeKind::Kanji => self.wrap_text(out, r#"<span class="kanji">"#),
            NodeKind::Kana => self.wrap_text(out, r#"<span class="kana">"#),
            NodeKind::Ruby => {
                out.push_str("<ruby>");
                self.content.write_html(out);
                out.push_str("<rt>");
                push_escaped(out, self.ruby.as_deref().unwrap_or_default());
                out.push_str("</rt></ruby>");
            }
            NodeKind::Link => {
                // URLs are emitted verbatim
                out.push_str(r#"<a href=""#);
                out.push_str(self.url.as_deref().unwrap_or_default());
                out.push_str(r#"">"#);
                self.content.write_html(out);
                out.push_str("</a>");
            }
            NodeKind::Div => self.write_container(out, "div"),
            NodeKind::Span => self.write_container(out, "span"),
            NodeKind::LineBreak => out.push_str("<br/>"),
            NodeKind::HorizontalRule => out.push_str("<hr/>"),
            NodeKind::Image => {
                out.push_str(r#"<img src=""#);
                out.push_str(self.url.as_deref().unwrap_or_default());
                out.push_str(r#"" alt="Image" />"#);
            }
            // Drop the wrapper, keep the children
            NodeKind::Unknown(_) => self.content.write_html(out),
        }
    }

    fn wrap_content(&self, out: &mut String, open: &str, close: &str) {
        out.push_str(open);
        self.content.write_html(out);
        out.push_str(close);
    }

    fn wrap_text(&self, out: &mut String, open: &str) {
        out.push_str(open);
        push_escaped(out, self.text.as_deref().unwrap_or_default());
        out.push_str("</span>");
    }

    fn write_container(&self, out: &mut String, tag: &str) {
        out.push('<');
        out.push_str(tag);
        if let Some(class) = &self.class {
            // Attribute values are emitted verbatim, only leaf text is escaped
            out.push_str(r#" class=""#);
            out.push_str(class);
            out.push('"');
        }
        out.push('>');
        self.content.write_html(out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

/// Render a structured content value (single node or list of nodes) to HTML
pub fn render(value: &Value) -> Result<String, ContentError> {
    ContentNode::from_value(value).map(|node| node.to_html())
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn html(value: Value) -> String {
        render(&value).expect("render failed")
    }

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(html(json!(null)), "");
        assert_eq!(html(json!(["a", null, "b"])), "ab");
        assert_eq!(html(json!({"type": "bold", "content": null})), "<b></b>");
    }

    #[test]
    fn test_text_leaves_concatenate() {
        assert_eq!(html(json!(["a", "b", ["c", ["d"]]])), "abcd");
    }

    #[test]
    fn test_escaping_is_exact() {
        assert_eq!(
            html(json!(r#"<script>alert('t')</script> & " '"#)),
            "&lt;script&gt;alert(&#39;t&#39;)&lt;/script&gt; &amp; &quot; &#39;"
        );
    }

    #[test]
    fn test_every_known_kind() {
        let cases = [
            (json!({"type": "bold", "content": "x"}), "<b>x</b>"),
            (json!({"type": "italic", "content": ["x"]}), "<i>x</i>"),
            (json!({"type": "kanji", "text": "猫"}), r#"<span class="kanji">猫</span>"#),
            (json!({"type": "kana", "text": "ねこ"}), r#"<span class="kana">ねこ</span>"#),
            (
                json!({"type": "ruby", "content": "猫", "ruby": "ねこ"}),
                "<ruby>猫<rt>ねこ</rt></ruby>",
            ),
            (
                json!({"type": "link", "url": "https://example.com/?a=1&b=2", "content": "go"}),
                r#"<a href="https://example.com/?a=1&b=2">go</a>"#,
            ),
            (json!({"type": "div", "content": "x"}), "<div>x</div>"),
            (
                json!({"type": "span", "class": "gloss", "content": "x"}),
                r#"<span class="gloss">x</span>"#,
            ),
            (json!({"type": "br", "content": "ignored"}), "<br/>"),
            (json!({"type": "hr"}), "<hr/>"),
            (
                json!({"type": "image", "url": "img/cat.png", "content": "ignored"}),
                r#"<img src="img/cat.png" alt="Image" />"#,
            ),
            (json!({"type": "heading", "content": "Title"}), "<h3>Title</h3>"),
        ];

        for (input, expected) in cases {
            assert_eq!(html(input), expected);
        }
    }

    #[test]
    fn test_unknown_kind_drops_wrapper() {
        let content = json!(["a", {"type": "bold", "content": "b"}]);
        let wrapped = json!({"type": "marquee", "content": content.clone()});
        assert_eq!(html(wrapped), html(content));
        assert_eq!(html(json!({"content": "bare"})), "bare");
        assert_eq!(html(json!({"type": "table"})), "");
    }

    #[test]
    fn test_tag_key_is_accepted_as_kind() {
        assert_eq!(
            html(json!({"tag": "div", "class": "entry", "content": "x"})),
            r#"<div class="entry">x</div>"#
        );
    }

    #[test]
    fn test_nesting() {
        let tree = json!({
            "type": "div",
            "content": [
                {"type": "bold", "content": {"type": "italic", "content": "deep"}},
                {"type": "span", "content": ["a", {"type": "br"}, "b"]}
            ]
        });
        assert_eq!(
            html(tree),
            "<div><b><i>deep</i></b><span>a<br/>b</span></div>"
        );
    }

    #[test]
    fn test_leaf_text_escaped_inside_markup() {
        assert_eq!(
            html(json!({"type": "kanji", "text": "<猫>"})),
            r#"<span class="kanji">&lt;猫&gt;</span>"#
        );
        assert_eq!(
            html(json!({"type": "ruby", "content": "a&b", "ruby": "\"r\""})),
            "<ruby>a&amp;b<rt>&quot;r&quot;</rt></ruby>"
        );
    }

    #[test]
    fn test_class_emitted_verbatim() {
        assert_eq!(
            html(json!({"type": "div", "class": "a&b", "content": "<x>"})),
            r#"<div class="a&b">&lt;x&gt;</div>"#
        );
    }

    #[test]
    fn test_scalars_render_as_text() {
        assert_eq!(html(json!([1, true])), "1true");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let tree = json!([{"type": "ruby", "content": "日本", "ruby": "にほん"}, "語"]);
        assert_eq!(html(tree.clone()), html(tree));
    }

    #[test]
    fn test_too_deep_is_an_error() {
        let mut value = json!("leaf");
        for _ in 0..=MAX_DEPTH + 1 {
            value = json!({"type": "bold", "content": value});
        }
        assert!(matches!(
            render(&value),
            Err(ContentError::TooDeep { limit: MAX_DEPTH })
        ));
    }
}
