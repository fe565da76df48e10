use std::env;

use serde::{Deserialize, Serialize};

/// How the last-resort frequency lookup key is derived from a term
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyNormalization {
    /// Full-width Latin to ASCII plus fixed punctuation substitutions
    #[default]
    Width,
    /// Unicode NFKC
    Nfkc,
}

impl KeyNormalization {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "width" => Some(KeyNormalization::Width),
            "nfkc" => Some(KeyNormalization::Nfkc),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FrequencyConfig {
    pub normalization: KeyNormalization,
}

impl FrequencyConfig {
    pub fn new() -> Self {
        let normalization = env::var("SAYA_FREQUENCY_NORMALIZATION")
            .ok()
            .and_then(|v| KeyNormalization::from_name(&v))
            .unwrap_or_default();

        Self { normalization }
    }
}
