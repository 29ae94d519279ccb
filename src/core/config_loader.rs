// src/core/config_loader.rs

//! # Config Loader
//!
//! Reads the optional `config.toml` that tunes the interactive prompt. Every
//! key is optional and a missing file simply yields the defaults.

use crate::constants::DEFAULT_HELP_PREFIXES;
use crate::core::color::parse_color_name;
use crate::core::paths::{self, PathError};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure to load the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Could not read config file '{path}': {source}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for [`Config`].
    #[error("Invalid config file '{path}': {source}")]
    TomlParse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser error with location.
        #[source]
        source: toml::de::Error,
    },
    /// The file location could not be determined.
    #[error(transparent)]
    Path(#[from] PathError),
}

/// `[prompt]` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PromptConfig {
    /// Colour of the current path.
    pub path_color: String,
    /// Colour of the surrounding brackets.
    pub bracket_color: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            path_color: "bright cyan".to_string(),
            bracket_color: "green".to_string(),
        }
    }
}

impl PromptConfig {
    /// `(bracket, path)` colors. Unknown names fall back to the defaults.
    pub fn colors(&self) -> (Color, Color) {
        let defaults = Self::default();
        let pick = |name: &str, fallback: &str| {
            parse_color_name(name).unwrap_or_else(|e| {
                log::warn!("{}, using '{}'", e, fallback);
                parse_color_name(fallback).unwrap_or(Color::White)
            })
        };
        (
            pick(&self.bracket_color, &defaults.bracket_color),
            pick(&self.path_color, &defaults.path_color),
        )
    }
}

/// Settings read from `config.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Fuzzy overlay on completion.
    pub fuzzy: bool,
    /// Reserved verbs that show the help of the command that follows.
    pub help_prefixes: Vec<String>,
    /// Prompt styling.
    pub prompt: PromptConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fuzzy: true,
            help_prefixes: DEFAULT_HELP_PREFIXES.iter().map(|s| s.to_string()).collect(),
            prompt: PromptConfig::default(),
        }
    }
}

impl Config {
    /// Loads `path`, or the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config file at '{}', using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from '{}': {:?}", path.display(), config);
        Ok(config)
    }

    /// Resolves the file location (`--config`, `CMDNAV_CONFIG`, default dir)
    /// and loads it.
    pub fn discover(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let path = paths::config_path(explicit)?;
        Self::load(&path)
    }
}
