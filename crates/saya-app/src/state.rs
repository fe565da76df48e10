use std::sync::Arc;

use saya_config::Config;
use saya_config::frequency::KeyNormalization;
use saya_core::{
    DictionaryImporter, FrequencyLookup, MemoryStore, NfkcPreprocessor, Preprocessor,
    WidthPreprocessor,
};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: RwLock<Config>,
    pub store: Arc<MemoryStore>,
    pub frequency: FrequencyLookup,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = Arc::new(MemoryStore::new());

        let preprocessor: Arc<dyn Preprocessor> = match config.frequency.normalization {
            KeyNormalization::Width => Arc::new(WidthPreprocessor),
            KeyNormalization::Nfkc => Arc::new(NfkcPreprocessor),
        };
        let frequency = FrequencyLookup::with_preprocessor(store.clone(), preprocessor);

        Self {
            config: RwLock::new(config),
            store,
            frequency,
        }
    }

    pub async fn importer(&self) -> DictionaryImporter {
        let batch_size = self.config.read().await.dictionary.batch_size;
        DictionaryImporter::new(self.store.clone(), batch_size)
    }
}
