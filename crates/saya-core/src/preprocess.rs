use unicode_normalization::UnicodeNormalization;

/// Produces the fallback key used when an exact frequency lookup misses
pub trait Preprocessor: Send + Sync {
    fn process(&self, text: &str) -> String;
}

/// Full-width Latin letters to ASCII plus a fixed set of punctuation substitutions.
///
/// Every character is mapped once; substitutions do not chain.
pub struct WidthPreprocessor;

impl WidthPreprocessor {
    /// Distance between U+FF21..=U+FF5A and their ASCII counterparts
    const FULLWIDTH_OFFSET: u32 = 0xFEE0;

    fn map_char(c: char) -> char {
        match c {
            '\u{FF21}'..='\u{FF5A}' => {
                char::from_u32(c as u32 - Self::FULLWIDTH_OFFSET).unwrap_or(c)
            }
            '～' => '〜',
            'ー' => '－',
            '－' => '-',
            '，' => ',',
            '\u{3000}' => ' ',
            _ => c,
        }
    }
}

impl Preprocessor for WidthPreprocessor {
    fn process(&self, text: &str) -> String {
        text.chars().map(Self::map_char).collect()
    }
}

/// Unicode NFKC, trimmed
pub struct NfkcPreprocessor;

impl Preprocessor for NfkcPreprocessor {
    fn process(&self, text: &str) -> String {
        text.trim().nfkc().collect()
    }
}
