//! Error types for compositing

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::tile::{ReclassifyError, TilePos};

/// Error that aborts a render. No partial raster is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompositingError {
    /// A pass asked the catalog for a sprite it does not have
    #[error("tile '{tile}' at {pos}: {source}")]
    Lookup {
        tile: String,
        pos: TilePos,
        #[source]
        source: CatalogError,
    },
    /// A drawing pass reached a tile whose variant has no sprite
    #[error("tile '{tile}' at {pos} has no sprite to draw")]
    MissingSprite { tile: String, pos: TilePos },
    /// A tile paste whose origin lies outside the output raster
    #[error("tile position {pos} is outside the {width}x{height} output raster")]
    OutOfCanvas { pos: TilePos, width: u32, height: u32 },
    /// The hazard pass could not settle a tile
    #[error(transparent)]
    Reclassify(#[from] ReclassifyError),
}
