//! Blueprint classification - one tile per source pixel
//!
//! Classification walks the source raster in row-major order, resolves each
//! pixel color through the catalog and fills a [`TileIndex`]. It is a single
//! completed phase: the index is only sealed, and neighbor queries only become
//! possible, after every pixel has been placed.
//!
//! # Unresolved colors
//!
//! - Lenient mode: the pixel becomes a fallback tile, is logged, and is listed
//!   in [`Diagnostics`] so the caller can report it.
//! - Strict mode: the scan still finishes, then every unresolved pixel is
//!   returned together in a [`ClassificationError`].

use image::RgbaImage;
use std::fmt;
use thiserror::Error;

use crate::catalog::{SpriteCatalog, VariantPicker};
use crate::color::{Color, FALLBACK_COLOR};
use crate::index::{RangeError, TileIndex, TileIndexBuilder};
use crate::tile::{Tile, TilePos, TileType};

/// Name of the synthetic tile used when even the fallback color is undefined.
pub const MISSING_TILE: &str = "missing";

/// A source pixel whose color no tile definition declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unresolved {
    pub pos: TilePos,
    pub color: Color,
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pos, self.color)
    }
}

/// Classification outcome reported alongside the index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub unresolved: Vec<Unresolved>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Distinct unresolved colors, each with the number of pixels using it.
    pub fn color_summary(&self) -> Vec<(Color, usize)> {
        let mut summary: Vec<(Color, usize)> = Vec::new();
        for miss in &self.unresolved {
            match summary.iter_mut().find(|(color, _)| *color == miss.color) {
                Some((_, count)) => *count += 1,
                None => summary.push((miss.color, 1)),
            }
        }
        summary
    }
}

/// Errors produced while classifying a blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error(
        "{} pixel(s) have no tile definition: {}",
        unresolved.len(),
        unresolved.iter().take(10).map(|u| u.to_string()).collect::<Vec<_>>().join(", ")
    )]
    Unresolved { unresolved: Vec<Unresolved> },
    #[error(transparent)]
    Range(#[from] RangeError),
}

/// Populates a [`TileIndex`] from raw pixels.
pub struct MapClassifier<'a> {
    catalog: &'a SpriteCatalog,
    strict: bool,
}

impl<'a> MapClassifier<'a> {
    pub fn new(catalog: &'a SpriteCatalog) -> Self {
        Self { catalog, strict: false }
    }

    /// Fail on unresolved colors instead of substituting the fallback tile.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Classify a decoded source raster.
    pub fn classify_image(
        &self,
        source: &RgbaImage,
        picker: &mut dyn VariantPicker,
    ) -> Result<(TileIndex, Diagnostics), ClassificationError> {
        let (width, height) = source.dimensions();
        let pixels: Vec<Color> = source.pixels().map(Color::from_pixel).collect();
        self.classify(&pixels, width, height, picker)
    }

    /// Classify a row-major pixel grid of `width * height` colors.
    pub fn classify(
        &self,
        pixels: &[Color],
        width: u32,
        height: u32,
        picker: &mut dyn VariantPicker,
    ) -> Result<(TileIndex, Diagnostics), ClassificationError> {
        let mut builder = TileIndexBuilder::new(width, height);
        let mut diagnostics = Diagnostics::default();

        for y in 0..height {
            for x in 0..width {
                let pos = TilePos::new(x as i32, y as i32);
                let color = pixels
                    .get(y as usize * width as usize + x as usize)
                    .copied()
                    .ok_or(RangeError::OutOfBounds { pos, width, height })?;

                let tile = match self.catalog.resolve_by_color(color) {
                    Ok(set) => {
                        let id = set.pick(picker);
                        let variant = self.catalog.variant(id);
                        Tile::new(pos, color, variant.name.clone(), variant.kind, Some(id))
                    }
                    Err(_) => {
                        log::warn!("missing: {} {}", pos, color);
                        diagnostics.unresolved.push(Unresolved { pos, color });
                        self.fallback_tile(pos, picker)
                    }
                };
                builder.insert(tile)?;
            }
        }

        if !diagnostics.is_clean() {
            log::warn!(
                "{} of {} pixels had no tile definition",
                diagnostics.unresolved.len(),
                width as usize * height as usize
            );
            if self.strict {
                return Err(ClassificationError::Unresolved { unresolved: diagnostics.unresolved });
            }
        }

        let index = builder.build()?;
        log::debug!("classified {}x{} blueprint", width, height);
        Ok((index, diagnostics))
    }

    /// The tile declared for black, or a sprite-less empty tile when black is undeclared.
    fn fallback_tile(&self, pos: TilePos, picker: &mut dyn VariantPicker) -> Tile {
        match self.catalog.resolve_by_color(FALLBACK_COLOR) {
            Ok(set) => {
                let id = set.pick(picker);
                let variant = self.catalog.variant(id);
                Tile::new(pos, FALLBACK_COLOR, variant.name.clone(), variant.kind, Some(id))
            }
            Err(_) => Tile::new(pos, FALLBACK_COLOR, MISSING_TILE, TileType::Empty, None),
        }
    }
}
