//! Spatial tile index
//!
//! [`TileIndexBuilder`] collects one tile per grid coordinate during
//! classification. [`TileIndex::build`] seals it once every cell is filled, so
//! neighbor queries only ever see a complete grid.
//!
//! Lookups outside `[0, width) x [0, height)` return a single constant boundary
//! tile that is never part of the row, column or type listings.

use rayon::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

use crate::tile::{Direction, ReclassifyError, Tile, TilePos, TileType};

/// Grid write errors. These are programming errors, never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("tile position {pos} is outside the {width}x{height} grid")]
    OutOfBounds { pos: TilePos, width: u32, height: u32 },
    #[error("tile position {pos} is already occupied")]
    Occupied { pos: TilePos },
    #[error("grid is incomplete: {missing} of {total} cells have no tile, first at {first}")]
    Incomplete { missing: usize, total: usize, first: TilePos },
}

/// Collects tiles for a fixed-size grid.
#[derive(Debug, Clone)]
pub struct TileIndexBuilder {
    width: u32,
    height: u32,
    cells: Vec<Option<Tile>>,
    order: Vec<usize>,
}

impl TileIndexBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        let total = width as usize * height as usize;
        Self { width, height, cells: vec![None; total], order: Vec::with_capacity(total) }
    }

    pub fn insert(&mut self, tile: Tile) -> Result<(), RangeError> {
        let pos = tile.pos();
        let cell = cell_index(pos, self.width, self.height).ok_or(RangeError::OutOfBounds {
            pos,
            width: self.width,
            height: self.height,
        })?;
        if self.cells[cell].is_some() {
            return Err(RangeError::Occupied { pos });
        }
        self.cells[cell] = Some(tile);
        self.order.push(cell);
        Ok(())
    }

    /// Seal the grid. Every in-range coordinate must hold exactly one tile.
    pub fn build(self) -> Result<TileIndex, RangeError> {
        let total = self.cells.len();
        let missing = self.cells.iter().filter(|c| c.is_none()).count();
        if let Some(first) = self.cells.iter().position(|c| c.is_none()) {
            return Err(RangeError::Incomplete {
                missing,
                total,
                first: position_of(first, self.width),
            });
        }

        let mut by_type: HashMap<TileType, Vec<usize>> = HashMap::new();
        let mut rows = vec![Vec::with_capacity(self.width as usize); self.height as usize];
        let mut columns = vec![Vec::with_capacity(self.height as usize); self.width as usize];
        for &cell in &self.order {
            let pos = position_of(cell, self.width);
            rows[pos.y as usize].push(cell);
            columns[pos.x as usize].push(cell);
            if let Some(tile) = &self.cells[cell] {
                by_type.entry(tile.kind()).or_default().push(cell);
            }
        }

        let tiles: Vec<Tile> = self.cells.into_iter().flatten().collect();
        Ok(TileIndex {
            width: self.width,
            height: self.height,
            tiles,
            rows,
            columns,
            by_type,
            boundary: Tile::boundary(),
        })
    }
}

/// Complete grid of tiles with row, column and type listings.
#[derive(Debug, Clone)]
pub struct TileIndex {
    width: u32,
    height: u32,
    /// Row-major, exactly `width * height` entries
    tiles: Vec<Tile>,
    rows: Vec<Vec<usize>>,
    columns: Vec<Vec<usize>>,
    /// Cells per render type, in insertion order
    by_type: HashMap<TileType, Vec<usize>>,
    boundary: Tile,
}

impl TileIndex {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at `pos`, or the boundary tile when `pos` is off the grid.
    pub fn get(&self, pos: TilePos) -> &Tile {
        match cell_index(pos, self.width, self.height) {
            Some(cell) => &self.tiles[cell],
            None => &self.boundary,
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Tiles of `kind` in insertion order. Unused types yield nothing.
    pub fn by_type(&self, kind: TileType) -> impl Iterator<Item = &Tile> + '_ {
        self.by_type.get(&kind).into_iter().flatten().map(move |&cell| &self.tiles[cell])
    }

    /// Positions of the tiles of `kind`, for passes that mutate while iterating.
    pub fn positions_of(&self, kind: TileType) -> Vec<TilePos> {
        self.by_type(kind).map(Tile::pos).collect()
    }

    pub fn count(&self, kind: TileType) -> usize {
        self.by_type.get(&kind).map_or(0, Vec::len)
    }

    /// Row `y` left to right. Off-grid rows are empty.
    pub fn row(&self, y: i32) -> impl Iterator<Item = &Tile> + '_ {
        self.line(&self.rows, y)
    }

    /// Column `x` top to bottom. Off-grid columns are empty.
    pub fn column(&self, x: i32) -> impl Iterator<Item = &Tile> + '_ {
        self.line(&self.columns, x)
    }

    fn line<'a>(&'a self, lines: &'a [Vec<usize>], i: i32) -> impl Iterator<Item = &'a Tile> + 'a {
        usize::try_from(i)
            .ok()
            .and_then(|i| lines.get(i))
            .into_iter()
            .flatten()
            .map(move |&cell| &self.tiles[cell])
    }

    /// The eight neighbors of `pos` as seen right now.
    pub fn neighborhood(&self, pos: TilePos) -> Neighborhood<'_> {
        Neighborhood { center: pos, tiles: Direction::ALL.map(|dir| self.get(pos.offset(dir))) }
    }

    /// Whether all eight neighbors of `pos` are solid. The tile at `pos` itself is not consulted.
    pub fn is_enclosed(&self, pos: TilePos) -> bool {
        self.neighborhood(pos).is_enclosed()
    }

    /// Snapshot of [`Self::is_enclosed`] for every cell, taken against the current render types.
    pub fn enclosure_map(&self) -> EnclosureMap {
        let width = self.width;
        let enclosed = (0..self.tiles.len())
            .into_par_iter()
            .map(|cell| self.is_enclosed(position_of(cell, width)))
            .collect();
        EnclosureMap { width: self.width, height: self.height, enclosed }
    }

    /// Switch the hazard at `pos` to background and move it between type listings.
    pub fn reclassify_hazard(&mut self, pos: TilePos) -> Result<(), ReclassifyError> {
        let Some(cell) = cell_index(pos, self.width, self.height) else {
            return Err(ReclassifyError::NotAHazard {
                name: self.boundary.name().to_string(),
                pos,
                kind: self.boundary.kind(),
            });
        };
        let from = self.tiles[cell].kind();
        self.tiles[cell].settle_hazard()?;
        let to = self.tiles[cell].kind();

        if let Some(cells) = self.by_type.get_mut(&from) {
            cells.retain(|&c| c != cell);
        }
        self.by_type.entry(to).or_default().push(cell);
        Ok(())
    }
}

/// The eight neighbors of one position, clockwise from the top-left.
#[derive(Debug, Clone, Copy)]
pub struct Neighborhood<'a> {
    center: TilePos,
    tiles: [&'a Tile; 8],
}

impl<'a> Neighborhood<'a> {
    pub fn get(&self, dir: Direction) -> &'a Tile {
        self.tiles[dir.index()]
    }

    /// Grid position in direction `dir`, which may be off the grid.
    pub fn pos(&self, dir: Direction) -> TilePos {
        self.center.offset(dir)
    }

    pub fn tiles(&self) -> &[&'a Tile; 8] {
        &self.tiles
    }

    /// How many neighbors have each render type.
    pub fn type_counts(&self) -> HashMap<TileType, usize> {
        let mut counts = HashMap::new();
        for tile in self.tiles {
            *counts.entry(tile.kind()).or_insert(0) += 1;
        }
        counts
    }

    pub fn is_enclosed(&self) -> bool {
        self.tiles.iter().all(|t| t.kind() == TileType::Solid)
    }
}

/// Read-only enclosure flags for a whole grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnclosureMap {
    width: u32,
    height: u32,
    enclosed: Vec<bool>,
}

impl EnclosureMap {
    /// Off-grid positions are never enclosed: their outer neighbors are boundary tiles.
    pub fn is_enclosed(&self, pos: TilePos) -> bool {
        cell_index(pos, self.width, self.height).is_some_and(|cell| self.enclosed[cell])
    }

    pub fn count(&self) -> usize {
        self.enclosed.iter().filter(|&&e| e).count()
    }
}

fn cell_index(pos: TilePos, width: u32, height: u32) -> Option<usize> {
    let x = u32::try_from(pos.x).ok()?;
    let y = u32::try_from(pos.y).ok()?;
    if x < width && y < height {
        Some(y as usize * width as usize + x as usize)
    } else {
        None
    }
}

fn position_of(cell: usize, width: u32) -> TilePos {
    let width = width as usize;
    TilePos::new((cell % width) as i32, (cell / width) as i32)
}
