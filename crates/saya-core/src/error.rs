use std::path::PathBuf;

use saya_types::DictionaryId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Dictionary already imported: {0}")]
    DuplicateDictionary(DictionaryId),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Missing index file: {}", .0.display())]
    MissingIndex(PathBuf),

    #[error("Invalid index file {}: {source}", path.display())]
    InvalidIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
