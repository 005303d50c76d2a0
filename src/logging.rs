//! File-only tracing setup.
//!
//! The terminal belongs to ratatui while the app runs, so nothing is ever
//! written to stdout or stderr from here.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const LOG_ENV: &str = "OPSDECK_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

pub fn log_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|dir| dir.join("opsdeck.log"))
}

/// Installs the global subscriber writing to `~/.config/opsdeck/opsdeck.log`.
///
/// Returns the path written to, or `None` when no home directory is known
/// and logging stays disabled.
pub fn init_tui() -> anyhow::Result<Option<PathBuf>> {
    let Some(path) = log_path() else {
        return Ok(None);
    };
    init_at(&path)?;
    Ok(Some(path))
}

pub fn init_at(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(file_layer).try_init()?;
    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
