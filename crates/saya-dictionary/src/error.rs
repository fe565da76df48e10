/// Failures while turning structured content into HTML.
///
/// These never leave the crate's decoders: the definition normalizer converts them into the
/// stringified fallback.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("structured content nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}
