use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::LanesConfig;

/// Error type for reading config.toml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Read `config.toml` from the data directory. A missing file yields the
/// default config.
pub fn read_config(data_dir: &Path) -> Result<LanesConfig, ConfigError> {
    let config_path = data_dir.join("config.toml");
    let text = match fs::read_to_string(&config_path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LanesConfig::default()),
        Err(e) => {
            return Err(ConfigError::Read {
                path: config_path,
                source: e,
            });
        }
    };
    Ok(toml::from_str(&text)?)
}

/// Resolve the data directory: explicit flag/env value, else the platform
/// data dir, else the current directory.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    dirs::data_dir()
        .map(|d| d.join("lanes"))
        .unwrap_or_else(|| PathBuf::from(".lanes"))
}
