use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "lanes",
    about = concat!("lanes v", env!("CARGO_PKG_VERSION"), " - a kanban board you can drag around in the terminal"),
    version
)]
pub struct Cli {
    /// Directory holding the board, theme, config.toml and the log file
    #[arg(long = "data-dir", env = "LANES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}
