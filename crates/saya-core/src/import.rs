use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use saya_dictionary::{TermMeta, decode_term, decode_term_meta, parse_index};
use saya_types::DictionaryId;
use serde_json::Value;
use uuid::Uuid;

use crate::dictionary::DictionaryStore;
use crate::error::ImportError;

const INDEX_FILE: &str = "index.json";

static BANK_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(term_bank|term_meta_bank)_([0-9]+)\.json$").expect("Invalid bank file pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum BankKind {
    Term,
    TermMeta,
}

/// Outcome of importing one dictionary directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub dictionary_id: DictionaryId,
    pub title: String,
    pub terms: usize,
    pub frequencies: usize,
    pub pitch_accents: usize,
    /// Term meta rows that decoded to nothing
    pub skipped_rows: usize,
    /// Bank files that could not be read or parsed
    pub skipped_files: usize,
}

/// Imports an extracted dictionary directory (`index.json` plus bank files) into a store
pub struct DictionaryImporter {
    store: Arc<dyn DictionaryStore>,
    batch_size: usize,
}

impl DictionaryImporter {
    pub fn new(store: Arc<dyn DictionaryStore>, batch_size: usize) -> Self {
        Self {
            store,
            batch_size: batch_size.max(1),
        }
    }

    pub async fn import_dir(&self, dir: &Path, priority: i32) -> Result<ImportSummary, ImportError> {
        let index_path = dir.join(INDEX_FILE);
        if !tokio::fs::try_exists(&index_path).await? {
            return Err(ImportError::MissingIndex(index_path));
        }

        let raw_index = tokio::fs::read_to_string(&index_path).await?;
        let manifest: Value =
            serde_json::from_str(&raw_index).map_err(|source| ImportError::InvalidIndex {
                path: index_path.clone(),
                source,
            })?;

        let mut metadata = parse_index(&manifest);
        let dictionary_id = Uuid::new_v4();
        tracing::info!("Importing dictionary {} from {}", metadata.title, dir.display());

        let mut summary = ImportSummary {
            dictionary_id,
            title: metadata.title.clone(),
            terms: 0,
            frequencies: 0,
            pitch_accents: 0,
            skipped_rows: 0,
            skipped_files: 0,
        };

        for (kind, path) in bank_files(dir).await? {
            let Some(rows) = read_bank(&path).await else {
                summary.skipped_files += 1;
                continue;
            };

            match kind {
                BankKind::Term => self.import_terms(&rows, dictionary_id, &mut summary).await?,
                BankKind::TermMeta => {
                    self.import_term_meta(&rows, dictionary_id, &mut summary)
                        .await?
                }
            }
        }

        metadata.entry_count = summary.terms as u64;
        metadata.priority = priority;
        self.store.insert_dictionary(dictionary_id, metadata).await?;

        tracing::info!(
            "Imported {}: {} terms, {} frequencies, {} pitch accents",
            summary.title,
            summary.terms,
            summary.frequencies,
            summary.pitch_accents
        );

        Ok(summary)
    }

    async fn import_terms(
        &self,
        rows: &[Value],
        dictionary_id: DictionaryId,
        summary: &mut ImportSummary,
    ) -> Result<(), ImportError> {
        for chunk in rows.chunks(self.batch_size) {
            let entries = chunk
                .iter()
                .map(|row| decode_term(row, dictionary_id))
                .collect::<Vec<_>>();
            summary.terms += entries.len();
            self.store.insert_terms(entries).await?;
        }
        Ok(())
    }

    async fn import_term_meta(
        &self,
        rows: &[Value],
        dictionary_id: DictionaryId,
        summary: &mut ImportSummary,
    ) -> Result<(), ImportError> {
        for chunk in rows.chunks(self.batch_size) {
            let mut frequencies = Vec::new();
            let mut pitch_accents = Vec::new();

            for row in chunk {
                match decode_term_meta(row, dictionary_id) {
                    Some(TermMeta::Frequency(entry)) => frequencies.push(entry),
                    Some(TermMeta::PitchAccent(entry)) => pitch_accents.push(entry),
                    None => summary.skipped_rows += 1,
                }
            }

            summary.frequencies += frequencies.len();
            summary.pitch_accents += pitch_accents.len();

            if !frequencies.is_empty() {
                self.store.insert_frequencies(frequencies).await?;
            }
            if !pitch_accents.is_empty() {
                self.store.insert_pitch_accents(pitch_accents).await?;
            }
        }
        Ok(())
    }
}

/// Bank files in the directory, term banks first, each kind in numeric order
async fn bank_files(dir: &Path) -> Result<Vec<(BankKind, PathBuf)>, ImportError> {
    let mut banks = Vec::new();
    let mut read_dir = tokio::fs::read_dir(dir).await?;

    while let Some(dir_entry) = read_dir.next_entry().await? {
        let name = dir_entry.file_name();
        let Some(caps) = name.to_str().and_then(|name| BANK_FILE.captures(name)) else {
            continue;
        };

        let kind = match &caps[1] {
            "term_bank" => BankKind::Term,
            _ => BankKind::TermMeta,
        };
        let Ok(number) = caps[2].parse::<u64>() else {
            continue;
        };
        banks.push((kind, number, dir_entry.path()));
    }

    banks.sort();
    Ok(banks
        .into_iter()
        .map(|(kind, _, path)| (kind, path))
        .collect())
}

/// Rows of one bank file, `None` if the file is unreadable or not a JSON array
async fn read_bank(path: &Path) -> Option<Vec<Value>> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Skipping unreadable bank {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(rows) => Some(rows),
        Err(e) => {
            tracing::warn!("Skipping malformed bank {}: {e}", path.display());
            None
        }
    }
}
