use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn log_file_name() -> String {
    format!("veille_ssphub_{}.log", Local::now().format("%Y%m%d_%H%M%S"))
}

/// Console logging, plus a timestamped file in `log_dir` when one is given.
pub fn init(log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let file_target = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let path = dir.join(log_file_name());
            let file = File::create(&path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            Some((path, file))
        }
        None => None,
    };

    let (path, file_layer) = match file_target {
        Some((path, file)) => (
            Some(path),
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    Ok(path)
}
