//! Classified blueprint cells
//!
//! A [`Tile`] is created from exactly one source pixel. Its name and classified
//! type never change; the render type starts equal to the classified type and may
//! be switched from `spikes` to `background` once, by the hazard pass.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::catalog::SpriteId;
use crate::color::{Color, BOUNDARY_COLOR};

/// Coarse tile category. Decides which compositing pass draws a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    Solid,
    Background,
    Empty,
    Spikes,
    Tree,
    BlueSpawn,
    RedSpawn,
    /// Any type string not known to the renderer. Indexed, never drawn.
    #[serde(other)]
    Other,
}

impl TileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Solid => "solid",
            TileType::Background => "background",
            TileType::Empty => "empty",
            TileType::Spikes => "spikes",
            TileType::Tree => "tree",
            TileType::BlueSpawn => "blue_spawn",
            TileType::RedSpawn => "red_spawn",
            TileType::Other => "other",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid coordinate. Signed so neighbor offsets can leave the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Top-left pixel of this tile in the output raster.
    pub fn pixel_origin(self, tile_size: u32) -> (i64, i64) {
        let s = i64::from(tile_size);
        (i64::from(self.x) * s, i64::from(self.y) * s)
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight neighbor directions, clockwise from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

use Direction::*;

impl Direction {
    /// Index order used by [`crate::index::Neighborhood`].
    pub const ALL: [Direction; 8] =
        [NorthWest, North, NorthEast, East, SouthEast, South, SouthWest, West];

    pub const ORTHOGONAL: [Direction; 4] = [North, East, South, West];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            NorthWest => (-1, -1),
            North => (0, -1),
            NorthEast => (1, -1),
            East => (1, 0),
            SouthEast => (1, 1),
            South => (0, 1),
            SouthWest => (-1, 1),
            West => (-1, 0),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            NorthWest => 0,
            North => 1,
            NorthEast => 2,
            East => 3,
            SouthEast => 4,
            South => 5,
            SouthWest => 6,
            West => 7,
        }
    }
}

/// Error for a render-type change the tile state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReclassifyError {
    #[error("tile '{name}' at {pos} is classified as {kind}, only spikes can be reclassified")]
    NotAHazard { name: String, pos: TilePos, kind: TileType },
    #[error("tile '{name}' at {pos} was already reclassified")]
    AlreadyReclassified { name: String, pos: TilePos },
}

/// One classified grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pos: TilePos,
    color: Color,
    name: String,
    classified: TileType,
    current: TileType,
    sprite: Option<SpriteId>,
}

impl Tile {
    pub fn new(
        pos: TilePos,
        color: Color,
        name: impl Into<String>,
        kind: TileType,
        sprite: Option<SpriteId>,
    ) -> Self {
        Self { pos, color, name: name.into(), classified: kind, current: kind, sprite }
    }

    /// The constant `void` tile standing in for every out-of-grid neighbor.
    pub fn boundary() -> Self {
        Self::new(TilePos::new(-1, -1), BOUNDARY_COLOR, "void", TileType::Empty, None)
    }

    pub fn pos(&self) -> TilePos {
        self.pos
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type assigned at classification.
    pub fn classified_type(&self) -> TileType {
        self.classified
    }

    /// Type seen by compositing passes.
    pub fn kind(&self) -> TileType {
        self.current
    }

    pub fn sprite(&self) -> Option<SpriteId> {
        self.sprite
    }

    pub fn is_reclassified(&self) -> bool {
        self.current != self.classified
    }

    /// Turn a painted hazard into background so depth shading treats it as open space.
    pub(crate) fn settle_hazard(&mut self) -> Result<(), ReclassifyError> {
        if self.classified != TileType::Spikes {
            return Err(ReclassifyError::NotAHazard {
                name: self.name.clone(),
                pos: self.pos,
                kind: self.classified,
            });
        }
        if self.is_reclassified() {
            return Err(ReclassifyError::AlreadyReclassified {
                name: self.name.clone(),
                pos: self.pos,
            });
        }
        self.current = TileType::Background;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spike_tile() -> Tile {
        Tile::new(TilePos::new(2, 3), Color::new(1, 2, 3), "spikes_dirt", TileType::Spikes, None)
    }

    #[test]
    fn test_type_names_match_serde() {
        for kind in [
            TileType::Solid,
            TileType::Background,
            TileType::Empty,
            TileType::Spikes,
            TileType::Tree,
            TileType::BlueSpawn,
            TileType::RedSpawn,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_unknown_type_is_other() {
        let kind: TileType = serde_json::from_str("\"ladder\"").unwrap();
        assert_eq!(kind, TileType::Other);
    }

    #[test]
    fn test_direction_indices_follow_all() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn test_offset() {
        let pos = TilePos::new(0, 0);
        assert_eq!(pos.offset(Direction::NorthWest), TilePos::new(-1, -1));
        assert_eq!(pos.offset(Direction::South), TilePos::new(0, 1));
    }

    #[test]
    fn test_pixel_origin() {
        assert_eq!(TilePos::new(3, 2).pixel_origin(8), (24, 16));
    }

    #[test]
    fn test_settle_hazard_once() {
        let mut tile = spike_tile();
        tile.settle_hazard().unwrap();
        assert_eq!(tile.kind(), TileType::Background);
        assert_eq!(tile.classified_type(), TileType::Spikes);
        assert!(matches!(
            tile.settle_hazard(),
            Err(ReclassifyError::AlreadyReclassified { .. })
        ));
    }

    #[test]
    fn test_settle_non_hazard_fails() {
        let mut tile =
            Tile::new(TilePos::new(0, 0), Color::new(0, 0, 0), "dirt", TileType::Solid, None);
        assert!(matches!(tile.settle_hazard(), Err(ReclassifyError::NotAHazard { .. })));
        assert_eq!(tile.kind(), TileType::Solid);
    }

    #[test]
    fn test_boundary_tile() {
        let tile = Tile::boundary();
        assert_eq!(tile.color(), BOUNDARY_COLOR);
        assert_eq!(tile.kind(), TileType::Empty);
        assert!(tile.sprite().is_none());
    }
}
