use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an imported dictionary, assigned by the store
pub type DictionaryId = Uuid;

/// Manifest of an imported dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryMetadata {
    pub title: String,
    pub format: i64,
    pub revision: String,
    pub sequenced: bool,
    pub author: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub attribution: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub is_updatable: bool,
    pub index_url: Option<String>,
    pub download_url: Option<String>,

    /// Number of term entries, filled in after the banks are decoded
    pub entry_count: u64,
    /// User-assigned ordering, higher wins
    pub priority: i32,
    pub import_date: DateTime<Utc>,
}

/// One decoded term bank record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub dictionary_id: DictionaryId,
    pub term: String,
    pub reading: String,
    /// Final rendered definition
    pub definition: String,
    pub is_html_content: bool,
    pub part_of_speech: String,
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub dictionary_id: DictionaryId,
    pub word: String,
    /// Rank in the source dictionary's own convention
    pub frequency: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchAccentEntry {
    pub dictionary_id: DictionaryId,
    pub word: String,
    pub reading: String,
    pub pitch_accent: String,
}
