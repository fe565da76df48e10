use std::sync::LazyLock;

use regex::Regex;
use saya_types::{DictionaryId, FrequencyEntry, PitchAccentEntry};
use serde_json::Value;

use crate::pitch_accent::{PITCH_MARKER, decode_pitch_accent};
use crate::record::TermMetaRow;

/// Tag patterns carrying a frequency, in priority order
static FREQUENCY_TAG_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"^freq:([0-9]+)$",
        r"^frequency:([0-9]+)$",
        r"^rank:([0-9]+)$",
        r"^([0-9]+)$",
    ]
    .map(|pattern| Regex::new(pattern).expect("Invalid frequency tag pattern"))
});

/// A decoded term meta row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermMeta {
    Frequency(FrequencyEntry),
    PitchAccent(PitchAccentEntry),
}

/// Dispatch a term meta row on its type marker.
///
/// Rows marked `"pitch"` go to the pitch decoder, everything else is read as frequency data.
pub fn decode_term_meta(row: &Value, dictionary_id: DictionaryId) -> Option<TermMeta> {
    if TermMetaRow::new(row).kind() == Some(PITCH_MARKER) {
        decode_pitch_accent(row, dictionary_id).map(TermMeta::PitchAccent)
    } else {
        decode_frequency(row, dictionary_id).map(TermMeta::Frequency)
    }
}

/// Decode a frequency row.
///
/// The score at index 5 wins when it is a number or an integer string; otherwise the tags at
/// index 2 are scanned. Returns `None` when there is no term or no frequency.
pub fn decode_frequency(row: &Value, dictionary_id: DictionaryId) -> Option<FrequencyEntry> {
    let row = TermMetaRow::new(row);
    let word = row.term()?;

    let frequency = row
        .score()
        .and_then(score_frequency)
        .or_else(|| tag_frequency(&row.tags()))?;

    Some(FrequencyEntry {
        dictionary_id,
        word: word.to_string(),
        frequency,
    })
}

fn score_frequency(score: &Value) -> Option<i64> {
    match score {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Value::String(text) => text.parse().ok(),
        _ => None,
    }
}

fn tag_frequency(tags: &[&str]) -> Option<i64> {
    tags.iter().find_map(|tag| {
        FREQUENCY_TAG_PATTERNS.iter().find_map(|pattern| {
            pattern
                .captures(tag)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
        })
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn frequency(row: Value) -> Option<i64> {
        decode_frequency(&row, Uuid::nil()).map(|entry| entry.frequency)
    }

    #[test]
    fn test_tag_fallback() {
        let id = Uuid::new_v4();
        let entry = decode_frequency(&json!(["本", "", ["freq:1234"], [], 0, null, null]), id)
            .expect("frequency entry");
        assert_eq!(entry.dictionary_id, id);
        assert_eq!(entry.word, "本");
        assert_eq!(entry.frequency, 1234);
    }

    #[test]
    fn test_score_takes_priority() {
        assert_eq!(frequency(json!(["本", "", ["freq:1"], [], 0, 77, 0])), Some(77));
        assert_eq!(frequency(json!(["本", "", [], [], 0, "88", 0])), Some(88));
        assert_eq!(frequency(json!(["本", "", [], [], 0, 12.9, 0])), Some(12));
    }

    #[test]
    fn test_unparseable_score_uses_tags() {
        assert_eq!(frequency(json!(["本", "", ["rank:5"], [], 0, "often", 0])), Some(5));
    }

    #[test]
    fn test_tag_patterns() {
        assert_eq!(frequency(json!(["本", "", ["frequency:9"], [], 0])), Some(9));
        assert_eq!(frequency(json!(["本", "", ["rank:3"], [], 0])), Some(3));
        assert_eq!(frequency(json!(["本", "", ["42"], [], 0])), Some(42));
        assert_eq!(frequency(json!(["本", "", ["freq:x", "freq: 1"], [], 0])), None);
    }

    #[test]
    fn test_first_matching_tag_wins() {
        assert_eq!(
            frequency(json!(["本", "", ["common", "rank:7", "freq:1"], [], 0])),
            Some(7)
        );
    }

    #[test]
    fn test_no_term_or_no_frequency() {
        assert_eq!(frequency(json!([null, "", ["freq:1"], [], 0, 5])), None);
        assert_eq!(frequency(json!(["", "", ["freq:1"], [], 0, 5])), None);
        assert_eq!(frequency(json!(["本", "", ["common"], [], 0, null])), None);
        assert_eq!(frequency(json!([])), None);
    }

    #[test]
    fn test_dispatch_on_marker() {
        let id = Uuid::nil();
        assert!(matches!(
            decode_term_meta(&json!(["日本", "pitch", 2]), id),
            Some(TermMeta::PitchAccent(_))
        ));
        assert!(matches!(
            decode_term_meta(&json!(["本", "", ["freq:1"], [], 0, null]), id),
            Some(TermMeta::Frequency(_))
        ));
        assert_eq!(decode_term_meta(&json!(["日本", "pitch"]), id), None);
    }
}
