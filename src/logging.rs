use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

const DEFAULT_FILTER: &str = "info";

/// Install a file-backed tracing subscriber.
///
/// The terminal belongs to the UI, so nothing is written to stdout or
/// stderr. `RUST_LOG` overrides the default `info` filter. Returns the log
/// path on success; failures leave logging disabled.
pub fn init(path: Option<&Path>) -> Option<PathBuf> {
    let path = path.map(Path::to_path_buf).or_else(AppDirs::log_path)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    Some(path)
}
