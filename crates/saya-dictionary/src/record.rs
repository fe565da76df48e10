//! Typed views over positional bank rows.
//!
//! Bank records are bare JSON arrays where the position encodes the meaning. All index
//! arithmetic lives here; decoders only talk to the named accessors, which never fail and
//! fall back to empty values for missing, out-of-range or mistyped positions.

use serde_json::Value;

/// Bounds-checked access to a JSON array. A non-array value behaves like an empty row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn new(value: &'a Value) -> Self {
        let values = value.as_array().map(Vec::as_slice).unwrap_or_default();
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value at `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.values.get(index)
    }

    /// String at `index`, `None` when missing or not a string
    pub fn str(&self, index: usize) -> Option<&'a str> {
        self.get(index).and_then(Value::as_str)
    }

    /// String at `index`, empty when missing or not a string
    pub fn string(&self, index: usize) -> String {
        self.str(index).unwrap_or_default().to_string()
    }

    /// Tag list at `index`.
    ///
    /// Accepts a list of strings (non-string items are skipped) or a single space-separated
    /// string as used by older banks. Anything else yields no tags.
    pub fn tags(&self, index: usize) -> Vec<&'a str> {
        match self.get(index) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            Some(Value::String(joined)) => joined.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }
}

/// Term bank row: `[term, reading, entry tags, rules, number, definitions, term tags, reading tags]`
#[derive(Debug, Clone, Copy)]
pub struct TermBankRow<'a>(Row<'a>);

impl<'a> TermBankRow<'a> {
    const TERM: usize = 0;
    const READING: usize = 1;
    const ENTRY_TAGS: usize = 2;
    const DEFINITIONS: usize = 5;
    const TERM_TAGS: usize = 6;
    const READING_TAGS: usize = 7;

    pub fn new(value: &'a Value) -> Self {
        Self(Row::new(value))
    }

    pub fn term(&self) -> String {
        self.0.string(Self::TERM)
    }

    pub fn reading(&self) -> String {
        self.0.string(Self::READING)
    }

    /// Raw definitions value, `Null` when the row is too short
    pub fn definitions(&self) -> &'a Value {
        self.0.get(Self::DEFINITIONS).unwrap_or(&Value::Null)
    }

    /// Entry, term and reading tags in source order, duplicates included
    pub fn all_tags(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let row = self.0;
        [Self::ENTRY_TAGS, Self::TERM_TAGS, Self::READING_TAGS]
            .into_iter()
            .flat_map(move |index| row.tags(index))
    }
}

/// Term meta row: `[term, reading or type, tags, rules, number, score, sequence]`.
///
/// Pitch rows reuse index 1 as the `"pitch"` type marker and carry their payload from index 2.
#[derive(Debug, Clone, Copy)]
pub struct TermMetaRow<'a>(Row<'a>);

impl<'a> TermMetaRow<'a> {
    const TERM: usize = 0;
    const KIND: usize = 1;
    const TAGS: usize = 2;
    const SCORE: usize = 5;
    const PITCH_PAYLOAD: usize = 2;

    pub fn new(value: &'a Value) -> Self {
        Self(Row::new(value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Term, `None` when missing, mistyped or empty
    pub fn term(&self) -> Option<&'a str> {
        self.0.str(Self::TERM).filter(|term| !term.is_empty())
    }

    /// Type discriminator at index 1, only meaningful for pitch rows
    pub fn kind(&self) -> Option<&'a str> {
        self.0.str(Self::KIND)
    }

    pub fn tags(&self) -> Vec<&'a str> {
        self.0.tags(Self::TAGS)
    }

    pub fn score(&self) -> Option<&'a Value> {
        self.0.get(Self::SCORE)
    }

    /// Pitch payload: `[reading?, pattern]` starting at index 2
    pub fn pitch_payload(&self) -> &'a [Value] {
        self.0.values.get(Self::PITCH_PAYLOAD..).unwrap_or_default()
    }
}

/// Generic text form of a JSON value.
///
/// Strings are taken as-is, `null` becomes empty, everything else uses its compact JSON form.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
