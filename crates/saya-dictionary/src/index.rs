use chrono::{DateTime, Utc};
use saya_types::DictionaryMetadata;
use serde_json::{Map, Value};

/// Parse a dictionary manifest (`index.json`), stamping the import time with now.
pub fn parse_index(manifest: &Value) -> DictionaryMetadata {
    parse_index_at(manifest, Utc::now())
}

/// Parse a dictionary manifest.
///
/// Every field falls back to a default instead of failing. `entry_count` and `priority` start
/// at zero and are filled in later by the importer and the user.
pub fn parse_index_at(manifest: &Value, import_date: DateTime<Utc>) -> DictionaryMetadata {
    let empty = Map::new();
    let fields = Manifest(manifest.as_object().unwrap_or(&empty));

    DictionaryMetadata {
        title: fields.string("title").unwrap_or_default(),
        format: fields
            .integer("format")
            .or_else(|| fields.integer("version"))
            .unwrap_or_default(),
        revision: fields.text("revision").unwrap_or_default(),
        sequenced: fields.boolean("sequenced"),
        author: fields.string("author"),
        url: fields.string("url"),
        description: fields.string("description"),
        attribution: fields.string("attribution"),
        source_language: fields.string("sourceLanguage"),
        target_language: fields.string("targetLanguage"),
        is_updatable: fields.boolean("isUpdatable"),
        index_url: fields.string("indexUrl"),
        download_url: fields.string("downloadUrl"),
        entry_count: 0,
        priority: 0,
        import_date,
    }
}

struct Manifest<'a>(&'a Map<String, Value>);

impl Manifest<'_> {
    fn string(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(Value::as_str).map(str::to_string)
    }

    /// String, or the text form of a number
    fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    fn integer(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.parse().ok(),
            _ => None,
        }
    }

    fn boolean(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}
