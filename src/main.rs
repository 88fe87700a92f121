use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use veille_sync::config::Config;
use veille_sync::extract::{ConversationLoader, LinkExtractor, MessageNormalizer};
use veille_sync::grist::GristClient;
use veille_sync::logging;
use veille_sync::sync::SyncDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Test,
    Production,
}

/// Extract the links shared in a Tchap export and add the new ones to the veille table.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Destination table: the test table or the production veille table.
    #[arg(long, value_enum, default_value_t = Mode::Test)]
    mode: Mode,

    /// Path to the JSON export of the room.
    #[arg(long, default_value = "data/export.json")]
    input: PathBuf,

    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Print the records that would be added instead of sending them.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::from_file(&args.config);

    let log_dir = config.as_ref().ok().and_then(|c| c.log_dir.clone());
    match logging::init(log_dir.as_deref()) {
        Ok(Some(path)) => info!("Logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Failed to set up logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    }

    let result = match config {
        Ok(config) => run(&args, &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error in pipeline: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, config: &Config) -> Result<()> {
    let table_id = match args.mode {
        Mode::Test => config.test_table.as_str(),
        Mode::Production => config.production_table.as_str(),
    };
    info!(
        "Starting veille sync from {} into {}",
        args.input.display(),
        table_id
    );

    let store = Arc::new(GristClient::from_config(config)?);
    let normalizer = MessageNormalizer::new(LinkExtractor::default(), &config.permalink_base);
    let driver = SyncDriver::new(
        store,
        ConversationLoader::new(normalizer),
        config.utc_offset_hours,
    );

    if args.dry_run {
        let source = tokio::fs::read(&args.input)
            .await
            .with_context(|| format!("Failed to read export: {}", args.input.display()))?;
        let records = driver.plan(&source, table_id).await?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        info!("Dry run: {} records would be added to {}", records.len(), table_id);
        return Ok(());
    }

    let result = driver
        .sync_file(&args.input, table_id)
        .await
        .with_context(|| format!("Sync of {} into {} failed", args.input.display(), table_id))?;
    println!("{}", result);

    Ok(())
}
