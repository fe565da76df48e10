use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use saya_types::{DictionaryId, DictionaryMetadata, FrequencyEntry, PitchAccentEntry, TermEntry};
use tokio::sync::RwLock;

use crate::dictionary::{DictionaryStore, FrequencyStore, TermId};
use crate::error::StoreError;

/// In-process store keeping every imported entity in memory
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    dictionaries: Vec<(DictionaryId, DictionaryMetadata)>,
    terms: Vec<TermEntry>,
    term_index: HashMap<String, Vec<usize>>,
    frequencies: HashMap<String, Vec<FrequencyEntry>>,
    pitch_accents: HashMap<String, Vec<PitchAccentEntry>>,
}

impl Inner {
    /// Priority of a registered dictionary, 0 while its import is still running
    fn priority(&self, id: DictionaryId) -> i32 {
        self.dictionaries
            .iter()
            .find(|(dict_id, _)| *dict_id == id)
            .map_or(0, |(_, metadata)| metadata.priority)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn dictionaries(&self) -> Vec<(DictionaryId, DictionaryMetadata)> {
        self.inner.read().await.dictionaries.clone()
    }

    pub async fn term_count(&self) -> usize {
        self.inner.read().await.terms.len()
    }

    /// Stored entries whose term or reading equals `query`
    pub async fn find_terms(&self, query: &str) -> Vec<(TermId, TermEntry)> {
        let inner = self.inner.read().await;

        inner
            .term_index
            .get(query)
            .into_iter()
            .flatten()
            .map(|&idx| (idx as TermId, inner.terms[idx].clone()))
            .collect()
    }

    pub async fn pitch_accents(&self, word: &str) -> Vec<PitchAccentEntry> {
        let inner = self.inner.read().await;
        inner.pitch_accents.get(word).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DictionaryStore for MemoryStore {
    async fn insert_dictionary(
        &self,
        id: DictionaryId,
        metadata: DictionaryMetadata,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if inner.dictionaries.iter().any(|(dict_id, _)| *dict_id == id) {
            return Err(StoreError::DuplicateDictionary(id));
        }
        inner.dictionaries.push((id, metadata));
        Ok(())
    }

    async fn insert_terms(&self, entries: Vec<TermEntry>) -> Result<Vec<TermId>, StoreError> {
        let mut inner = self.inner.write().await;
        let mut ids = Vec::with_capacity(entries.len());

        for entry in entries {
            let idx = inner.terms.len();
            inner.term_index.entry(entry.term.clone()).or_default().push(idx);
            if !entry.reading.is_empty() && entry.reading != entry.term {
                inner
                    .term_index
                    .entry(entry.reading.clone())
                    .or_default()
                    .push(idx);
            }
            inner.terms.push(entry);
            ids.push(idx as TermId);
        }

        Ok(ids)
    }

    async fn insert_frequencies(&self, entries: Vec<FrequencyEntry>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for entry in entries {
            inner
                .frequencies
                .entry(entry.word.clone())
                .or_default()
                .push(entry);
        }
        Ok(())
    }

    async fn insert_pitch_accents(
        &self,
        entries: Vec<PitchAccentEntry>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        for entry in entries {
            inner
                .pitch_accents
                .entry(entry.word.clone())
                .or_default()
                .push(entry);
        }
        Ok(())
    }
}

#[async_trait]
impl FrequencyStore for MemoryStore {
    /// Highest-priority dictionary wins, ties go to the earliest insert
    async fn lookup_frequency(&self, word: &str) -> Result<Option<FrequencyEntry>, StoreError> {
        let inner = self.inner.read().await;

        let found = inner.frequencies.get(word).and_then(|candidates| {
            candidates
                .iter()
                .enumerate()
                .max_by_key(|(idx, entry)| (inner.priority(entry.dictionary_id), Reverse(*idx)))
                .map(|(_, entry)| entry.clone())
        });

        Ok(found)
    }
}
