pub mod types;

pub use types::{DictionaryId, DictionaryMetadata, FrequencyEntry, PitchAccentEntry, TermEntry};
