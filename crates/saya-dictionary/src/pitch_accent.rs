use saya_types::{DictionaryId, PitchAccentEntry};
use serde_json::Value;

use crate::record::{TermMetaRow, stringify};

/// Type marker at index 1 of pitch rows
pub const PITCH_MARKER: &str = "pitch";

/// Decode a pitch accent row.
///
/// Two layouts are recognised:
/// - `[term, "pitch", pattern]`: the reading is the term itself
/// - `[term, "pitch", reading, pattern, ...]`: the reading is a string at index 2
///
/// Anything else, a missing term, a different marker or an empty pattern yields `None`.
pub fn decode_pitch_accent(row: &Value, dictionary_id: DictionaryId) -> Option<PitchAccentEntry> {
    let row = TermMetaRow::new(row);
    let word = row.term()?;
    if row.kind() != Some(PITCH_MARKER) {
        return None;
    }

    let (reading, pattern) = match (row.len(), row.pitch_payload()) {
        (3, [pattern]) => (word.to_string(), stringify(pattern)),
        (len, [Value::String(reading), pattern, ..]) if len >= 4 => {
            (reading.clone(), stringify(pattern))
        }
        _ => return None,
    };

    if pattern.is_empty() {
        return None;
    }

    Some(PitchAccentEntry {
        dictionary_id,
        word: word.to_string(),
        reading,
        pitch_accent: pattern,
    })
}
