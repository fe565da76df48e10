use std::env;

use serde::{Deserialize, Serialize};

fn default_batch_size() -> usize {
    1000
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Rows decoded and handed to the store per insert
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Extracted dictionary directories imported on every run
    #[serde(default)]
    pub additional_paths: Vec<String>,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let batch_size = env::var("SAYA_IMPORT_BATCH_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_batch_size);

        let additional_paths = env::var("SAYA_DICTIONARY_PATHS")
            .map(|paths| {
                paths
                    .split(';')
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            batch_size,
            additional_paths,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            additional_paths: vec![],
        }
    }
}
