use std::env;

use serde::{Deserialize, Serialize};

fn default_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directives
    #[serde(default = "default_filter")]
    pub filter: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new() -> Self {
        let filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter());

        let format = match env::var("SAYA_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Self { filter, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}
