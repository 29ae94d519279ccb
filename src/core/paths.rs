// src/core/paths.rs

use crate::constants::{APP_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILENAME};
use lazy_static::lazy_static;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

lazy_static! {
    static ref CMDNAV_CONFIG_DIR: Mutex<Option<PathBuf>> = Mutex::new(None);
}

/// Failure to locate or create a path.
#[derive(Error, Debug)]
pub enum PathError {
    /// The platform has no config directory.
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    /// The config directory could not be created.
    #[error("Could not create config directory at '{path}': {source}")]
    ConfigDirCreation {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// `~` or a variable in a path could not be expanded.
    #[error("Failed to expand path '{path}': {reason}")]
    Expansion {
        /// Path as written.
        path: String,
        /// Why expansion failed.
        reason: String,
    },
}

/// Returns the cmdnav configuration directory (`~/.config/cmdnav`), creating
/// it if needed.
///
/// Memoized: only the first call touches the filesystem.
pub fn get_config_dir() -> Result<PathBuf, PathError> {
    let mut cached = CMDNAV_CONFIG_DIR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(path) = &*cached {
        return Ok(path.clone());
    }

    let config_path = dirs::config_dir()
        .ok_or(PathError::ConfigDirNotFound)?
        .join(APP_DIR_NAME);

    if !config_path.exists() {
        fs::create_dir_all(&config_path).map_err(|e| PathError::ConfigDirCreation {
            path: config_path.display().to_string(),
            source: e,
        })?;
    }

    *cached = Some(config_path.clone());
    Ok(config_path)
}

/// Expands `~` and environment variables in a user supplied path.
pub fn expand_path(path: &str) -> Result<PathBuf, PathError> {
    let expanded = shellexpand::full(path).map_err(|e| PathError::Expansion {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Picks the configuration file: the explicit `--config` value first, then
/// the value of `CMDNAV_CONFIG`, then `<config_dir>/cmdnav/config.toml`.
pub fn resolve_config_path(
    explicit: Option<&str>,
    from_env: Option<&str>,
) -> Result<PathBuf, PathError> {
    match explicit.or(from_env).filter(|p| !p.trim().is_empty()) {
        Some(path) => expand_path(path),
        None => get_config_dir().map(|dir| dir.join(CONFIG_FILENAME)),
    }
}

/// [`resolve_config_path`] with the environment read from the process.
pub fn config_path(explicit: Option<&str>) -> Result<PathBuf, PathError> {
    let from_env = std::env::var(CONFIG_ENV_VAR).ok();
    resolve_config_path(explicit, from_env.as_deref())
}
