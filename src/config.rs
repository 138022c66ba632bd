//! Config file handling.
//!
//! The file is JSON, every key optional; missing keys keep their defaults.
//!
//! Structure:
//! - Pure functions: path computation
//! - Effect functions: load and save

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ScreenError, ScreenResult};
use crate::types::EngineConfig;

const CONFIG_FILENAME: &str = "config.json";

/// Returns the default config file location.
///
/// On Linux: ~/.config/consolescreen/config.json
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("consolescreen")
        .join(CONFIG_FILENAME)
}

/// Load the config at `path`; a file that does not exist means defaults.
pub fn load_config(path: &Path) -> ScreenResult<EngineConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(EngineConfig::default());
        }
        Err(source) => {
            return Err(ScreenError::ConfigRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&contents).map_err(|source| ScreenError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `config` to `path` as pretty JSON, creating parent directories.
pub fn save_config(config: &EngineConfig, path: &Path) -> ScreenResult<()> {
    let write_error = |source| ScreenError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }

    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| write_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    fs::write(path, contents).map_err(write_error)
}
