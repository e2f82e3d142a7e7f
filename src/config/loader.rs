//! Configuration loading and discovery for `kagrender.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::KagConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for when no explicit configuration is given.
pub const CONFIG_FILE: &str = "kagrender.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse kagrender.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOverrides {
    pub shadows: Option<bool>,
    pub background: Option<bool>,
    pub background_shift: Option<i32>,
    /// Override the game installation path
    pub game_path: Option<PathBuf>,
    pub format: Option<String>,
    pub seed: Option<u64>,
    pub strict: Option<bool>,
}

/// Find kagrender.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find kagrender.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        // Reached root, no config found
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a kagrender.toml file.
///
/// An explicit `path` must exist. Without one the file is discovered with
/// [`find_config`], and defaults are used when none is found.
pub fn load_config(path: Option<&Path>) -> Result<KagConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(KagConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<KagConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<KagConfig, ConfigError> {
    let config: KagConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. An overridden
/// format is validated again.
pub fn merge_cli_overrides(config: &mut KagConfig, overrides: &CliOverrides) -> Result<(), ConfigError> {
    if let Some(shadows) = overrides.shadows {
        config.render.shadows = shadows;
    }
    if let Some(background) = overrides.background {
        config.render.background = background;
    }
    if let Some(shift) = overrides.background_shift {
        config.render.background_shift = shift;
    }
    if let Some(seed) = overrides.seed {
        config.render.seed = Some(seed);
    }
    if let Some(strict) = overrides.strict {
        config.render.strict = strict;
    }
    if let Some(ref game_path) = overrides.game_path {
        config.assets.game_path = game_path.clone();
    }
    if let Some(ref format) = overrides.format {
        config.output.format = format.clone();
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the kagrender.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
