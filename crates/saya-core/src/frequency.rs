use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use futures_util::future::join_all;
use saya_types::{FrequencyEntry, TermEntry};

use crate::dictionary::FrequencyStore;
use crate::preprocess::{Preprocessor, WidthPreprocessor};

/// Resolves frequency data for term entries, falling back to the reading and then to a
/// normalized form of the term when the exact term has no data.
pub struct FrequencyLookup {
    store: Arc<dyn FrequencyStore>,
    preprocessor: Arc<dyn Preprocessor>,
}

impl FrequencyLookup {
    pub fn new(store: Arc<dyn FrequencyStore>) -> Self {
        Self::with_preprocessor(store, Arc::new(WidthPreprocessor))
    }

    pub fn with_preprocessor(
        store: Arc<dyn FrequencyStore>,
        preprocessor: Arc<dyn Preprocessor>,
    ) -> Self {
        Self {
            store,
            preprocessor,
        }
    }

    /// Look up one entry: exact term, then reading, then the normalized term
    pub async fn lookup(&self, entry: &TermEntry) -> Option<FrequencyEntry> {
        let reading = entry.reading.as_str();
        self.resolve_term(&entry.term, vec![reading])
            .await
            .remove(reading)
    }

    /// Look up many entries at once.
    ///
    /// Entries are grouped by their exact term and each distinct term is queried once. Only
    /// when the term misses is the reading step run, once per distinct reading of the group,
    /// so every entry gets what a single `lookup` would return regardless of input order.
    /// Results are keyed by the caller's id; entries without data are absent.
    pub async fn lookup_batch<'a, K, I>(&self, entries: I) -> HashMap<K, FrequencyEntry>
    where
        K: Eq + Hash + Clone,
        I: IntoIterator<Item = (K, &'a TermEntry)>,
    {
        let mut groups: Vec<(&'a str, Vec<(K, &'a str)>)> = Vec::new();
        let mut group_of_term: HashMap<&'a str, usize> = HashMap::new();

        for (key, entry) in entries {
            let term = entry.term.as_str();
            let idx = *group_of_term.entry(term).or_insert_with(|| {
                groups.push((term, Vec::new()));
                groups.len() - 1
            });
            groups[idx].1.push((key, entry.reading.as_str()));
        }

        tracing::debug!("Resolving frequencies for {} distinct terms", groups.len());

        let resolved = join_all(groups.iter().map(|(term, members)| {
            let mut readings: Vec<&'a str> = Vec::new();
            for (_, reading) in members {
                if !readings.contains(reading) {
                    readings.push(*reading);
                }
            }
            self.resolve_term(term, readings)
        }))
        .await;

        let mut results = HashMap::new();
        for ((_, members), by_reading) in groups.into_iter().zip(resolved) {
            for (key, reading) in members {
                if let Some(found) = by_reading.get(reading) {
                    results.insert(key, found.clone());
                }
            }
        }

        results
    }

    /// Resolve one term for each of the given distinct readings.
    ///
    /// An exact hit on the term answers every reading. Otherwise each usable reading is tried
    /// on its own, and readings still without data fall back to the normalized term.
    async fn resolve_term<'r>(
        &self,
        term: &str,
        readings: Vec<&'r str>,
    ) -> HashMap<&'r str, FrequencyEntry> {
        let mut resolved = HashMap::new();

        if let Some(found) = self.query(term).await {
            for reading in readings {
                resolved.insert(reading, found.clone());
            }
            return resolved;
        }

        let mut pending = Vec::new();
        for reading in readings {
            if reading.trim().is_empty() || reading == term {
                pending.push(reading);
                continue;
            }
            match self.query(reading).await {
                Some(found) => {
                    resolved.insert(reading, found);
                }
                None => pending.push(reading),
            }
        }

        if pending.is_empty() {
            return resolved;
        }

        let normalized = self.preprocessor.process(term);
        if normalized == term {
            return resolved;
        }
        if let Some(found) = self.query(&normalized).await {
            for reading in pending {
                resolved.insert(reading, found.clone());
            }
        }

        resolved
    }

    /// A failing store lookup counts as "no data"
    async fn query(&self, word: &str) -> Option<FrequencyEntry> {
        match self.store.lookup_frequency(word).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Frequency lookup for {word} failed: {e}");
                None
            }
        }
    }
}
