use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive (e.g. `lanes=debug`)
pub const LOG_ENV: &str = "LANES_LOG";

/// Return the path to the log file.
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("lanes.log")
}

/// Install a file-backed tracing subscriber. The terminal belongs to the UI,
/// so nothing is ever written to stdout/stderr while it runs.
pub fn init_logging(data_dir: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path(data_dir))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Keep whatever subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
