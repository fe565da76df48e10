use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use saya_config::Config;

/// Load a JSON config file; missing sections and fields take their defaults
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file =
        File::open(path).with_context(|| format!("failed to open config {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}
