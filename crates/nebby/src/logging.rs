//! File logging. The terminal belongs to the scene, so traces go to disk.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `NEBBY_LOG=debug`.
pub const LOG_ENV: &str = "NEBBY_LOG";

const LOG_FILE_NAME: &str = "nebby.log";

/// Log file location, e.g. `~/.local/share/nebby/nebby.log`.
///
/// Falls back to the temp directory when no home directory is known.
pub fn log_path() -> PathBuf {
    ProjectDirs::from("", "", "nebby")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_NAME)
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to [`log_path`].
pub fn init() -> color_eyre::Result<PathBuf> {
    init_at(log_path())
}

/// Install the global subscriber writing to `path`.
pub fn init_at(path: PathBuf) -> color_eyre::Result<PathBuf> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!(e))?;

    Ok(path)
}
