use std::collections::BTreeSet;

use saya_types::{DictionaryId, TermEntry};
use serde_json::Value;

use crate::definition::normalize_definition;
use crate::record::TermBankRow;

/// Tags that mark a part of speech
const POS_MARKERS: [&str; 16] = [
    "v1", "v5", "vk", "vs", "adj-i", "adj-na", "n", "adv", "prt", "conj", "pn", "aux", "exp",
    "int", "prefix", "suffix",
];

/// Decode one term bank row.
///
/// Always produces an entry; missing or mistyped positions become empty values, and an empty
/// term is kept so bulk imports stay aligned with their source rows.
pub fn decode_term(row: &Value, dictionary_id: DictionaryId) -> TermEntry {
    let row = TermBankRow::new(row);
    let definition = normalize_definition(row.definitions());
    let tags: BTreeSet<String> = row.all_tags().map(str::to_string).collect();
    let part_of_speech = derive_part_of_speech(&tags);

    TermEntry {
        dictionary_id,
        term: row.term(),
        reading: row.reading(),
        definition: definition.text,
        is_html_content: definition.is_html,
        part_of_speech,
        tags,
    }
}

/// Join the part-of-speech tags with `", "`, in the set's sorted order
pub fn derive_part_of_speech(tags: &BTreeSet<String>) -> String {
    tags.iter()
        .filter(|tag| is_part_of_speech(tag))
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_part_of_speech(tag: &str) -> bool {
    if tag.contains("pos:") || tag.contains("part-of-speech") {
        return true;
    }

    let lower = tag.to_lowercase();
    POS_MARKERS.iter().any(|marker| {
        lower
            .strip_prefix(marker)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;

    fn tag_set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_decode_simple_entry() {
        let id = Uuid::new_v4();
        let entry = decode_term(&json!(["猫", "ねこ", ["n"], [], 0, ["a cat"], 0, []]), id);

        assert_eq!(entry.dictionary_id, id);
        assert_eq!(entry.term, "猫");
        assert_eq!(entry.reading, "ねこ");
        assert_eq!(entry.definition, "a cat");
        assert!(!entry.is_html_content);
        assert_eq!(entry.tags, tag_set(&["n"]));
        assert_eq!(entry.part_of_speech, "n");
    }

    #[test]
    fn test_tags_are_unioned_and_deduplicated() {
        let entry = decode_term(
            &json!(["食べる", "たべる", ["v1", "common"], [], 0, "to eat", ["common"], ["v1"]]),
            Uuid::nil(),
        );
        assert_eq!(entry.tags, tag_set(&["common", "v1"]));
        assert_eq!(entry.part_of_speech, "v1");
    }

    #[test]
    fn test_short_and_mistyped_rows_default() {
        let entry = decode_term(&json!([1, null]), Uuid::nil());
        assert_eq!(entry.term, "");
        assert_eq!(entry.reading, "");
        assert_eq!(entry.definition, "");
        assert!(entry.tags.is_empty());
        assert_eq!(entry.part_of_speech, "");

        let entry = decode_term(&json!("not a row"), Uuid::nil());
        assert_eq!(entry.term, "");
    }

    #[test]
    fn test_structured_definition_flags_html() {
        let entry = decode_term(
            &json!([
                "日本", "にほん", [], [], 0,
                [{"type": "structured-content", "content": {"type": "ruby", "content": "日本", "ruby": "にほん"}}]
            ]),
            Uuid::nil(),
        );
        assert_eq!(entry.definition, "<ruby>日本<rt>にほん</rt></ruby>");
        assert!(entry.is_html_content);
    }

    #[test]
    fn test_part_of_speech_matching() {
        assert!(is_part_of_speech("N"));
        assert!(is_part_of_speech("adj-na"));
        assert!(is_part_of_speech("V5-k"));
        assert!(is_part_of_speech("pos:noun"));
        assert!(is_part_of_speech("the part-of-speech tag"));
        assert!(!is_part_of_speech("v5k"));
        assert!(!is_part_of_speech("common"));
        assert!(!is_part_of_speech("POS:noun"));
    }

    #[test]
    fn test_part_of_speech_joined_sorted() {
        let tags = tag_set(&["vs", "n", "common", "pos:x"]);
        assert_eq!(derive_part_of_speech(&tags), "n, pos:x, vs");
    }
}
