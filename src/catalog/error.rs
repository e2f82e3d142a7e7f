//! Error types for catalog construction and lookup

use std::path::PathBuf;
use thiserror::Error;

use crate::color::Color;

/// Error raised while building the sprite catalog or resolving an entry in it.
///
/// Every variant is a configuration problem: the definitions, the sprite sheet
/// or a pass asking for a sprite that was never declared.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// No variant set is registered under this name
    #[error("no tile named '{0}' in the catalog")]
    UnknownName(String),
    /// No tile definition declares this color
    #[error("no tile definition declares color {0}")]
    UnknownColor(Color),
    /// A definition references a sheet cell outside the sprite sheet
    #[error("tile '{name}' uses sheet cell [{}, {}] outside the {}x{} sprite sheet", cell[0], cell[1], sheet.0, sheet.1)]
    CellOutOfBounds { name: String, cell: [u32; 2], sheet: (u32, u32) },
    /// A definition has neither sheet cells nor an empty variant
    #[error("tile '{name}' has no sprites")]
    NoVariants { name: String },
    /// A definition without a name
    #[error("tile definition #{index} has an empty name")]
    EmptyName { index: usize },
    /// A variant without a sprite was asked for pixels
    #[error("tile variant '{name}' has no sprite")]
    MissingSprite { name: String },
    /// An explicit variant index past the end of the set
    #[error("variant index {index} out of range for '{name}' ({len} variants)")]
    IndexOutOfRange { name: String, index: usize, len: usize },
    /// The definitions file is not valid JSON for the schema
    #[error("failed to parse tile definitions: {0}")]
    Parse(#[from] serde_json::Error),
    /// The definitions file could not be read
    #[error("failed to read tile definitions '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
