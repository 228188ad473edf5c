use std::path::{Path, PathBuf};

use gfx::EditorConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read an [`EditorConfig`] from a TOML file. A missing file is `Ok(None)`.
pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<EditorConfig>, ConfigError> {
    let config_path = config_path.as_ref();
    if !config_path.exists() {
        return Ok(None);
    }

    let content =
        std::fs::read_to_string(config_path).map_err(|source| ConfigError::ConfigReadError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

    let config: EditorConfig =
        toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
            config_path: config_path.to_path_buf(),
            source,
        })?;

    Ok(Some(config))
}
