//! Crate-level error type

use std::path::PathBuf;
use thiserror::Error;

use crate::assets::AssetError;
use crate::classify::ClassificationError;
use crate::composite::CompositingError;
use crate::config::ConfigError;
use crate::output::OutputError;

/// Any failure between reading configuration and writing the rendered map.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// The game installation has no `Base/Sprites` directory
    #[error("invalid path to game installation: {} not found", .0.display())]
    GameNotFound(PathBuf),
    #[error("classification failed: {0}")]
    Classification(#[from] ClassificationError),
    #[error("render aborted: {0}")]
    Compositing(#[from] CompositingError),
    #[error("failed to write output: {0}")]
    Output(#[from] OutputError),
}
