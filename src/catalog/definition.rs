//! Tile definition records
//!
//! The definitions file is a JSON array. Each record names a tile, gives its
//! type, lists the sprite sheet cells holding its sprite variants and the
//! blueprint colors that classify to it:
//!
//! ```json
//! [
//!   { "name": "dirt", "type": "solid", "blocks": [[0, 0], [1, 0]], "colors": [[132, 71, 21]] },
//!   { "name": "sky", "type": "empty", "blocks": [], "colors": ["#a5bdc8"] }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::CatalogError;
use crate::color::Color;
use crate::tile::TileType;

/// One record of the definitions file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TileType,
    /// Sheet cell coordinates, in tiles rather than pixels
    #[serde(default, rename = "blocks")]
    pub cells: Vec<[u32; 2]>,
    #[serde(default)]
    pub colors: Vec<Color>,
}

impl TileDefinition {
    pub fn new(name: impl Into<String>, kind: TileType) -> Self {
        Self { name: name.into(), kind, cells: Vec::new(), colors: Vec::new() }
    }

    pub fn with_cell(mut self, x: u32, y: u32) -> Self {
        self.cells.push([x, y]);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.colors.push(color);
        self
    }
}

/// Parse definitions from a JSON string.
pub fn parse_definitions(json: &str) -> Result<Vec<TileDefinition>, CatalogError> {
    let definitions: Vec<TileDefinition> = serde_json::from_str(json)?;
    validate_definitions(&definitions)?;
    Ok(definitions)
}

/// Read and parse a definitions file.
pub fn load_definitions(path: &Path) -> Result<Vec<TileDefinition>, CatalogError> {
    let json = fs::read_to_string(path)
        .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
    parse_definitions(&json)
}

fn validate_definitions(definitions: &[TileDefinition]) -> Result<(), CatalogError> {
    for (index, def) in definitions.iter().enumerate() {
        if def.name.trim().is_empty() {
            return Err(CatalogError::EmptyName { index });
        }
        if def.cells.is_empty() && def.kind != TileType::Empty {
            return Err(CatalogError::NoVariants { name: def.name.clone() });
        }
    }
    Ok(())
}
