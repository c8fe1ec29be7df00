use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log output goes. The TUI owns stdout, so it logs to a file.
pub enum Target {
    Stderr,
    File,
}

/// Returns the default log path inside the user's data directory.
/// Falls back to `./tonefit.log` when no data dir is found.
pub fn default_log_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let tonefit_dir = data_dir.join("tonefit");
        fs::create_dir_all(&tonefit_dir).ok();
        tonefit_dir.join("tonefit.log")
    } else {
        PathBuf::from("tonefit.log")
    }
}

/// `RUST_LOG` wins over the level picked from flags and config.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init(level: &str, target: Target) -> Result<()> {
    let filter_layer = filter(level);
    match target {
        Target::Stderr => tracing_subscriber::registry()
            .with(filter_layer)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        Target::File => {
            let path = default_log_path();
            let file: File = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?
        }
    }
    Ok(())
}
