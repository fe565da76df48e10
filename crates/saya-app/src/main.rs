use std::path::PathBuf;

use clap::Parser;
use saya_config::Config;
use saya_config::logging::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

pub mod lookup;
pub mod profile;
pub mod state;


use self::lookup::lookup_word;
use self::state::AppState;

/// Import extracted dictionaries and query the result
#[derive(Parser, Debug)]
#[command(name = "saya-import", version)]
struct Args {
    /// Extracted dictionary directories, each containing an index.json
    dirs: Vec<PathBuf>,

    /// JSON config file; environment variables are used when absent
    #[arg(long)]
    config: Option<PathBuf>,

    /// Priority assigned to the imported dictionaries
    #[arg(long, default_value_t = 0)]
    priority: i32,

    /// Word to look up after importing (repeatable)
    #[arg(long = "lookup")]
    lookups: Vec<String>,

    /// Print lookup results as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => profile::load_config(path)?,
        None => Config::new(),
    };
    init_tracing(&config.logging);

    let state = AppState::new(config);
    run(&state, &args).await
}

async fn run(state: &AppState, args: &Args) -> anyhow::Result<()> {
    let additional: Vec<PathBuf> = {
        let config = state.config.read().await;
        config
            .dictionary
            .additional_paths
            .iter()
            .map(PathBuf::from)
            .collect()
    };

    let importer = state.importer().await;
    for dir in args.dirs.iter().chain(&additional) {
        // One broken dictionary must not stop the others
        if let Err(e) = importer.import_dir(dir, args.priority).await {
            tracing::error!("Failed to import {}: {e}", dir.display());
        }
    }

    for word in &args.lookups {
        let reports = lookup_word(state, word).await;
        if reports.is_empty() {
            tracing::warn!("No entries for {word}");
        }

        for report in reports {
            if args.json {
                println!("{}", serde_json::to_string(&report)?);
            } else {
                let frequency = report
                    .frequency
                    .map_or_else(|| "-".to_string(), |f| f.to_string());
                println!(
                    "{} [{}] ({}) freq={} pitch={}\n  {}",
                    report.term,
                    report.reading,
                    report.part_of_speech,
                    frequency,
                    report.pitch_accents.join(","),
                    report.definition
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    match config.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
