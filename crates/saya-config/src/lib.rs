use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::frequency::FrequencyConfig;
use self::logging::LoggingConfig;

pub mod dictionary;
pub mod frequency;
pub mod logging;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub frequency: FrequencyConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            dictionary: DictionaryConfig::new(),
            frequency: FrequencyConfig::new(),
            logging: LoggingConfig::new(),
        }
    }
}
