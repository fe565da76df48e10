pub mod dictionary;
pub mod error;
pub mod frequency;
pub mod import;
pub mod preprocess;
pub mod store;

pub use dictionary::{DictionaryStore, FrequencyStore, TermId};
pub use error::{ImportError, StoreError};
pub use frequency::FrequencyLookup;
pub use import::{DictionaryImporter, ImportSummary};
pub use preprocess::{NfkcPreprocessor, Preprocessor, WidthPreprocessor};
pub use store::MemoryStore;
