//! Decoders for the positional JSON dictionary format and the structured content renderer.
//!
//! Every function here is pure: no I/O, no shared state, identical input gives identical
//! output. Malformed records degrade to defaults or to "no entity" instead of failing.

pub mod definition;
pub mod error;
pub mod index;
pub mod pitch_accent;
pub mod record;
pub mod structured_content;
pub mod term_bank;
pub mod term_meta;

pub use definition::{NormalizedDefinition, normalize_definition};
pub use error::ContentError;
pub use index::{parse_index, parse_index_at};
pub use pitch_accent::decode_pitch_accent;
pub use structured_content::{ContentNode, NodeKind, escape_html, render};
pub use term_bank::{decode_term, derive_part_of_speech};
pub use term_meta::{TermMeta, decode_frequency, decode_term_meta};
