//! Layered map compositing
//!
//! [`CompositeRenderer`] turns a classified [`TileIndex`] into the output
//! raster. Passes run strictly in [`Pass::ORDER`]:
//!
//! 1. scenery (optional backdrop, never after a tile pass)
//! 2. background tiles
//! 3. hazards, oriented against solid neighbors and then settled to background
//! 4. solid terrain with castle overrides, fog and depth gradients
//! 5. trees with treetops, branches and stumps
//! 6. spawn tents
//!
//! The hazard pass changes render types that the solid pass reads, so passes
//! never interleave.

mod blend;
mod error;
mod scenery;
mod shading;
mod terrain;
mod trees;

pub use error::CompositingError;
pub use shading::{fog, Gradients, FOG_COLOR};

use image::RgbaImage;
use std::fmt;

use crate::assets::{RenderAssets, TentSprites};
use crate::catalog::{RandomPicker, SpriteCatalog};
use crate::index::TileIndex;
use crate::tile::{Tile, TilePos, TileType};

/// Fixed tile edge length in output pixels.
pub const TILE_SIZE: u32 = 8;

/// ChaCha stream for decoration draws; variant picks use the default stream of the same seed.
const DECORATION_STREAM: u64 = 1;

/// Tent offset from the spawn tile's pixel origin.
const TENT_OFFSET: (i64, i64) = (-16, -16);

/// Render switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Fog buried terrain and stack edge gradients
    pub shadows: bool,
    /// Paint the scenery backdrop
    pub background: bool,
    /// Vertical shift of the scenery horizon in pixels; positive moves it down
    pub background_shift: i32,
    /// Seed for treetops, branches, backings and clouds; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { shadows: true, background: true, background_shift: 0, seed: None }
    }
}

/// Compositing passes in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Scenery,
    Background,
    Hazards,
    Solids,
    Trees,
    Spawns,
}

impl Pass {
    pub const ORDER: [Pass; 6] =
        [Pass::Scenery, Pass::Background, Pass::Hazards, Pass::Solids, Pass::Trees, Pass::Spawns];
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Pass::Scenery => "scenery",
            Pass::Background => "background",
            Pass::Hazards => "hazards",
            Pass::Solids => "solids",
            Pass::Trees => "trees",
            Pass::Spawns => "spawns",
        };
        f.write_str(name)
    }
}

/// Counters collected while rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub backgrounds: usize,
    pub hazards: usize,
    pub solids: usize,
    /// Solid tiles replaced by fog
    pub fogged: usize,
    /// Edge gradients stacked onto solid tiles
    pub edge_gradients: usize,
    /// Shadows cast onto neighboring background tiles
    pub cast_shadows: usize,
    pub trees: usize,
    pub treetops: usize,
    pub branches: usize,
    pub stumps: usize,
    pub spawns: usize,
}

/// Composites a classified map into one RGBA raster.
pub struct CompositeRenderer<'a> {
    catalog: &'a SpriteCatalog,
    assets: &'a RenderAssets,
    options: RenderOptions,
}

impl<'a> CompositeRenderer<'a> {
    pub fn new(catalog: &'a SpriteCatalog, assets: &'a RenderAssets, options: RenderOptions) -> Self {
        Self { catalog, assets, options }
    }

    /// Run every pass over `index`. Hazard tiles in `index` are left settled as background.
    pub fn render(&self, index: &mut TileIndex) -> Result<(RgbaImage, RenderStats), CompositingError> {
        let mut frame = Frame::new(self.catalog, index.width(), index.height(), self.options.seed);
        let gradients = Gradients::new(&self.assets.gradient);

        for pass in Pass::ORDER {
            log::debug!("running {} pass", pass);
            match pass {
                Pass::Scenery => {
                    if !self.options.background {
                        continue;
                    }
                    match &self.assets.scenery {
                        Some(scenery) => {
                            scenery::paint(&mut frame, scenery, self.options.background_shift)
                        }
                        None => log::warn!("background requested but no scenery assets loaded"),
                    }
                }
                Pass::Background => terrain::background_pass(&mut frame, index)?,
                Pass::Hazards => terrain::hazard_pass(&mut frame, index)?,
                Pass::Solids => {
                    terrain::solid_pass(&mut frame, index, &gradients, self.options.shadows)?
                }
                Pass::Trees => trees::tree_pass(&mut frame, index, &self.assets.trees)?,
                Pass::Spawns => spawn_pass(&mut frame, index, &self.assets.tents)?,
            }
        }

        Ok((frame.canvas, frame.stats))
    }
}

/// Mutable state shared by the passes of one render.
pub(crate) struct Frame<'a> {
    pub(crate) canvas: RgbaImage,
    pub(crate) catalog: &'a SpriteCatalog,
    pub(crate) rng: RandomPicker,
    pub(crate) tile_size: u32,
    pub(crate) stats: RenderStats,
}

impl<'a> Frame<'a> {
    /// Transparent canvas sized for a `columns` x `rows` tile grid.
    pub(crate) fn new(catalog: &'a SpriteCatalog, columns: u32, rows: u32, seed: Option<u64>) -> Self {
        let tile_size = catalog.tile_size();
        Self {
            canvas: RgbaImage::new(columns * tile_size, rows * tile_size),
            catalog,
            rng: match seed {
                Some(seed) => RandomPicker::seeded_stream(seed, DECORATION_STREAM),
                None => RandomPicker::from_entropy(),
            },
            tile_size,
            stats: RenderStats::default(),
        }
    }

    /// Pixel origin of a tile that must lie on the canvas.
    fn tile_origin(&self, pos: TilePos) -> Result<(i64, i64), CompositingError> {
        let (x, y) = pos.pixel_origin(self.tile_size);
        let (width, height) = self.canvas.dimensions();
        if x < 0 || y < 0 || x >= i64::from(width) || y >= i64::from(height) {
            return Err(CompositingError::OutOfCanvas { pos, width, height });
        }
        Ok((x, y))
    }

    /// Paste a tile-sized sprite at `pos` through `mask`'s alpha.
    pub(crate) fn paste_tile(
        &mut self,
        pos: TilePos,
        sprite: &RgbaImage,
        mask: &RgbaImage,
    ) -> Result<(), CompositingError> {
        let (x, y) = self.tile_origin(pos)?;
        blend::paste_masked(&mut self.canvas, sprite, mask, x, y, false);
        Ok(())
    }

    /// Paste only the colors of `sprite` at `pos`, masked by its own alpha.
    pub(crate) fn paste_tile_color(&mut self, pos: TilePos, sprite: &RgbaImage) -> Result<(), CompositingError> {
        let (x, y) = self.tile_origin(pos)?;
        blend::paste_color(&mut self.canvas, sprite, x, y);
        Ok(())
    }

    /// Paste an overlay relative to a tile's pixel origin. Overhang is clipped.
    pub(crate) fn paste_overlay(&mut self, pos: TilePos, offset: (i64, i64), sprite: &RgbaImage) {
        let (x, y) = pos.pixel_origin(self.tile_size);
        blend::paste(&mut self.canvas, sprite, x + offset.0, y + offset.1);
    }

    /// Pick a sprite of catalog entry `name` on behalf of `tile`.
    pub(crate) fn named(&mut self, name: &str, tile: &Tile) -> Result<&'a RgbaImage, CompositingError> {
        let catalog = self.catalog;
        catalog.sprite_by_name(name, &mut self.rng).map_err(|source| CompositingError::Lookup {
            tile: tile.name().to_string(),
            pos: tile.pos(),
            source,
        })
    }

    /// The sprite a tile was classified with.
    pub(crate) fn own_sprite(&self, tile: &Tile) -> Result<&'a RgbaImage, CompositingError> {
        let catalog = self.catalog;
        tile.sprite().and_then(|id| catalog.sprite(id)).ok_or_else(|| CompositingError::MissingSprite {
            tile: tile.name().to_string(),
            pos: tile.pos(),
        })
    }
}

fn spawn_pass(frame: &mut Frame<'_>, index: &TileIndex, tents: &TentSprites) -> Result<(), CompositingError> {
    for (kind, tent) in [(TileType::BlueSpawn, &tents.blue), (TileType::RedSpawn, &tents.red)] {
        for tile in index.by_type(kind) {
            frame.paste_overlay(tile.pos(), TENT_OFFSET, tent);
            frame.stats.spawns += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{TentSprites, TreeSprites};
    use crate::catalog::{FixedPicker, SpriteCatalog, TileDefinition};
    use crate::classify::MapClassifier;
    use crate::color::Color;
    use image::Rgba;

    const BLUE_SPAWN: Color = Color::new(0, 255, 255);
    const RED_SPAWN: Color = Color::new(255, 0, 0);

    fn assets() -> RenderAssets {
        let tent = |c: Rgba<u8>| RgbaImage::from_pixel(32, 32, c);
        RenderAssets {
            gradient: RgbaImage::new(8, 8),
            trees: TreeSprites { tops: vec![RgbaImage::new(38, 38)], branches: vec![RgbaImage::new(38, 38)] },
            tents: TentSprites::new(&tent(Rgba([0, 0, 255, 255])), &tent(Rgba([255, 0, 0, 255]))),
            scenery: None,
        }
    }

    fn catalog() -> SpriteCatalog {
        let defs = vec![
            TileDefinition::new("blue_spawn", TileType::BlueSpawn).with_cell(0, 0).with_color(BLUE_SPAWN),
            TileDefinition::new("red_spawn", TileType::RedSpawn).with_cell(0, 0).with_color(RED_SPAWN),
        ];
        SpriteCatalog::build(&defs, &RgbaImage::new(8, 8), TILE_SIZE).unwrap()
    }

    #[test]
    fn test_pass_order() {
        assert_eq!(Pass::ORDER[0], Pass::Scenery);
        assert_eq!(Pass::ORDER[2], Pass::Hazards);
        assert_eq!(Pass::ORDER[3], Pass::Solids);
        assert_eq!(Pass::ORDER[5].to_string(), "spawns");
    }

    #[test]
    fn test_output_size_is_scaled_grid() {
        let catalog = catalog();
        let assets = assets();
        let (mut index, _) = MapClassifier::new(&catalog)
            .classify(&[BLUE_SPAWN, RED_SPAWN, BLUE_SPAWN], 3, 1, &mut FixedPicker(0))
            .unwrap();
        let renderer = CompositeRenderer::new(&catalog, &assets, RenderOptions::default());
        let (image, stats) = renderer.render(&mut index).unwrap();
        assert_eq!(image.dimensions(), (24, 8));
        assert_eq!(stats.spawns, 3);
    }

    #[test]
    fn test_tents_drawn_blue_then_red() {
        let catalog = catalog();
        let assets = assets();
        let (mut index, _) = MapClassifier::new(&catalog)
            .classify(&[RED_SPAWN, BLUE_SPAWN, BLUE_SPAWN], 3, 1, &mut FixedPicker(0))
            .unwrap();
        let options = RenderOptions { background: false, ..Default::default() };
        let (image, stats) = CompositeRenderer::new(&catalog, &assets, options).render(&mut index).unwrap();
        assert_eq!(image.dimensions(), (24, 8));
        assert_eq!(stats.spawns, 3);
        // Blue tents at x=8 and x=16 cover pixels -8..32, red at x=0 covers -16..16; red is drawn last
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(4, 4), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(15, 7), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(16, 4), Rgba([0, 0, 255, 255]));
        assert_eq!(*image.get_pixel(23, 7), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn test_background_without_scenery_is_skipped() {
        let catalog = catalog();
        let assets = assets();
        let (mut index, _) =
            MapClassifier::new(&catalog).classify(&[BLUE_SPAWN], 1, 1, &mut FixedPicker(0)).unwrap();
        let options = RenderOptions { background: true, seed: Some(1), ..Default::default() };
        assert!(CompositeRenderer::new(&catalog, &assets, options).render(&mut index).is_ok());
    }
}
