use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_client::GeminiClient;
use nvd_client::NvdClient;
use otguard_common::Config;
use otguard_watch::{Classifier, FindingStore, KeywordFilter, Watcher};

#[derive(Parser)]
#[command(name = "watcher", about = "OT Guard vulnerability watcher")]
struct Args {
    /// Run a single poll cycle and exit instead of looping.
    #[arg(long)]
    once: bool,

    /// Override the findings file path from FINDINGS_PATH.
    #[arg(long)]
    store: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("otguard_watch=info".parse()?))
        .init();

    info!("OT Guard watcher starting...");

    let args = Args::parse();
    let mut config = Config::watcher_from_env();
    if let Some(store) = args.store {
        config.store_path = store;
    }
    config.log_redacted();

    let source = NvdClient::new(config.nvd_api_key.clone());
    let classifier = Classifier::new(GeminiClient::new(
        &config.gemini_api_key,
        &config.gemini_model,
    ));

    let mut watcher = Watcher::new(
        Box::new(source),
        Box::new(classifier),
        KeywordFilter::new(),
        FindingStore::new(&config.store_path),
        config.poll_interval,
        config.window,
    );

    if args.once {
        let stats = watcher.run_cycle().await?;
        info!("{stats}");
    } else {
        watcher.run().await?;
    }

    Ok(())
}
