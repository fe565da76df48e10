use async_trait::async_trait;
use saya_types::{DictionaryId, DictionaryMetadata, FrequencyEntry, PitchAccentEntry, TermEntry};

use crate::error::StoreError;

/// Identifier of a stored term entry
pub type TermId = u64;

/// Insert-only sink for decoded dictionary data
#[async_trait]
pub trait DictionaryStore: Send + Sync {
    /// Register a dictionary once all of its banks are stored
    async fn insert_dictionary(
        &self,
        id: DictionaryId,
        metadata: DictionaryMetadata,
    ) -> Result<(), StoreError>;

    /// Store a batch of term entries, returning their ids in input order
    async fn insert_terms(&self, entries: Vec<TermEntry>) -> Result<Vec<TermId>, StoreError>;

    async fn insert_frequencies(&self, entries: Vec<FrequencyEntry>) -> Result<(), StoreError>;

    async fn insert_pitch_accents(&self, entries: Vec<PitchAccentEntry>)
    -> Result<(), StoreError>;
}

/// Query side used by frequency resolution
#[async_trait]
pub trait FrequencyStore: Send + Sync {
    /// Exact match on the stored word
    async fn lookup_frequency(&self, word: &str) -> Result<Option<FrequencyEntry>, StoreError>;
}
