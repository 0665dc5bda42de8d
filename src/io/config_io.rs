use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Config;

pub const CONFIG_FILE: &str = "chanview.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load the config. An explicit path must exist; otherwise `chanview.toml`
/// in the site directory is used when present, and defaults when not.
pub fn load_config(explicit: Option<&Path>, site_dir: &Path) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = site_dir.join(CONFIG_FILE);
            if !path.exists() {
                return Ok(Config::default());
            }
            path
        }
    };
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}
