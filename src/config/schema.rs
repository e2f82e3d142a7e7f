//! Configuration schema types for `kagrender.toml`
//!
//! Every section and field is optional; an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::assets::AssetPaths;
use crate::composite::RenderOptions;
use crate::output::OutputFormat;

/// Compositing switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Fog and depth gradients on solid terrain
    #[serde(default = "default_true")]
    pub shadows: bool,
    /// Sky, scenery bands and clouds behind the map
    #[serde(default = "default_true")]
    pub background: bool,
    /// Horizon shift in pixels; negative moves it up
    #[serde(default)]
    pub background_shift: i32,
    /// Fixed seed for reproducible renders
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Fail on blueprint colors with no tile definition
    #[serde(default)]
    pub strict: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { shadows: true, background: true, background_shift: 0, seed: None, strict: false }
    }
}

/// Where sprites and tile definitions live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Game installation holding `Base/Sprites`
    #[serde(default = "default_game_path")]
    pub game_path: PathBuf,
    /// Tile definitions JSON
    #[serde(default = "default_definitions")]
    pub definitions: PathBuf,
    /// Base depth gradient image
    #[serde(default = "default_gradient")]
    pub gradient: PathBuf,
    /// Sky image stretched behind the scenery
    #[serde(default = "default_sky")]
    pub sky: PathBuf,
}

fn default_game_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_definitions() -> PathBuf {
    PathBuf::from("blocks.json")
}

fn default_gradient() -> PathBuf {
    PathBuf::from("gradient.png")
}

fn default_sky() -> PathBuf {
    PathBuf::from("bg_gradient.png")
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            game_path: default_game_path(),
            definitions: default_definitions(),
            gradient: default_gradient(),
            sky: default_sky(),
        }
    }
}

/// Output encoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// One of `png`, `jpeg` (`jpg`) or `bmp`
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "png".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: default_format() }
    }
}

/// Root configuration structure for `kagrender.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KagConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Validation error for configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "output.format")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "kagrender.toml: '{}' {}", self.field, self.message)
    }
}

impl KagConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.output.format.parse::<OutputFormat>().is_err() {
            errors.push(ConfigValidationError {
                field: "output.format".to_string(),
                message: format!("'{}' is not one of png, jpeg, bmp", self.output.format),
            });
        }

        for (field, path) in [
            ("assets.game_path", &self.assets.game_path),
            ("assets.definitions", &self.assets.definitions),
            ("assets.gradient", &self.assets.gradient),
            ("assets.sky", &self.assets.sky),
        ] {
            if path.as_os_str().is_empty() {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a non-empty path".to_string(),
                });
            }
        }

        errors
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            shadows: self.render.shadows,
            background: self.render.background,
            background_shift: self.render.background_shift,
            seed: self.render.seed,
        }
    }

    /// Output format; validated configs always parse.
    pub fn output_format(&self) -> OutputFormat {
        self.output.format.parse().unwrap_or_default()
    }

    /// Asset locations with relative paths resolved against `root`.
    pub fn asset_paths(&self, root: &Path) -> AssetPaths {
        AssetPaths::new(
            &super::resolve_path(root, &self.assets.game_path),
            super::resolve_path(root, &self.assets.definitions),
            super::resolve_path(root, &self.assets.gradient),
            super::resolve_path(root, &self.assets.sky),
        )
    }
}
