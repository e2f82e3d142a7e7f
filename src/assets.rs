//! Sprite and overlay assets
//!
//! Everything the renderer draws that does not come from the tile catalog:
//! depth gradients, tree tops and branches, spawn tents and the optional
//! scenery. Images are loaded from a game installation laid out as
//! `<game>/Base/Sprites/...`; tests build them in memory instead.

use image::imageops;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalog::{load_definitions, CatalogError, SpriteCatalog};

/// Edge length of one pine sheet cell.
pub const TREE_CELL: u32 = 38;
/// Pine sheet cells holding treetops.
pub const TREETOP_CELLS: std::ops::Range<u32> = 0..4;
/// Pine sheet cells holding branches.
pub const BRANCH_CELLS: std::ops::Range<u32> = 4..7;
/// Edge length of the tent sprite cut from each tent image.
pub const TENT_SIZE: u32 = 32;

const SCENERY_BANDS: [&str; 3] =
    ["Back/BackgroundPlains.png", "Back/BackgroundTrees.png", "Back/BackgroundCastle.png"];
const CLOUD_COUNT: u32 = 4;

/// Asset loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssetError {
    /// Image could not be opened or decoded
    #[error("failed to load image '{}': {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Pine sheet is smaller than the seven stacked cells it must hold
    #[error("tree sheet is {width}x{height}, expected at least {}x{}", TREE_CELL, TREE_CELL * BRANCH_CELLS.end)]
    TreeSheetTooSmall { width: u32, height: u32 },
    /// Scenery needs at least one band and one cloud
    #[error("scenery is incomplete: {0}")]
    IncompleteScenery(&'static str),
    /// Tile definitions or sprite sheet could not form a catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Locations of every file the renderer reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// `<game>/Base/Sprites`
    pub sprites: PathBuf,
    pub definitions: PathBuf,
    pub gradient: PathBuf,
    pub sky: PathBuf,
}

impl AssetPaths {
    pub fn new(
        game_path: &Path,
        definitions: impl Into<PathBuf>,
        gradient: impl Into<PathBuf>,
        sky: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sprites: game_path.join("Base").join("Sprites"),
            definitions: definitions.into(),
            gradient: gradient.into(),
            sky: sky.into(),
        }
    }

    pub fn sprite(&self, relative: &str) -> PathBuf {
        self.sprites.join(relative)
    }

    pub fn world_sheet(&self) -> PathBuf {
        self.sprite("world.png")
    }

    pub fn pine_sheet(&self) -> PathBuf {
        self.sprite("Trees/pine.png")
    }

    pub fn tent(&self, team: u32) -> PathBuf {
        self.sprite(&format!("tent{}.png", team))
    }

    pub fn cloud(&self, n: u32) -> PathBuf {
        self.sprite(&format!("Back/cloud{}.png", n))
    }
}

/// Open an image file and convert it to RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, AssetError> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })
}

/// Build the tile catalog from the definitions file and the world sheet.
pub fn load_catalog(paths: &AssetPaths, tile_size: u32) -> Result<SpriteCatalog, AssetError> {
    let definitions = load_definitions(&paths.definitions)?;
    let sheet = load_rgba(&paths.world_sheet())?;
    Ok(SpriteCatalog::build(&definitions, &sheet, tile_size)?)
}

/// Treetop and branch sprites cut from the pine sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSprites {
    pub tops: Vec<RgbaImage>,
    pub branches: Vec<RgbaImage>,
}

impl TreeSprites {
    /// Cut the vertically stacked 38x38 cells: four tops, then three branches.
    pub fn from_sheet(sheet: &RgbaImage) -> Result<Self, AssetError> {
        let (width, height) = sheet.dimensions();
        if width < TREE_CELL || height < TREE_CELL * BRANCH_CELLS.end {
            return Err(AssetError::TreeSheetTooSmall { width, height });
        }
        let cell = |i: u32| imageops::crop_imm(sheet, 0, TREE_CELL * i, TREE_CELL, TREE_CELL).to_image();
        Ok(Self { tops: TREETOP_CELLS.map(cell).collect(), branches: BRANCH_CELLS.map(cell).collect() })
    }
}

/// Team tents drawn over spawn tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct TentSprites {
    pub blue: RgbaImage,
    pub red: RgbaImage,
}

impl TentSprites {
    /// Keep the top-left 32x32 of each image; smaller images are padded with transparency.
    pub fn new(blue: &RgbaImage, red: &RgbaImage) -> Self {
        Self { blue: tent_cell(blue), red: tent_cell(red) }
    }
}

fn tent_cell(image: &RgbaImage) -> RgbaImage {
    let mut cell = RgbaImage::new(TENT_SIZE, TENT_SIZE);
    let w = image.width().min(TENT_SIZE);
    let h = image.height().min(TENT_SIZE);
    imageops::replace(&mut cell, &imageops::crop_imm(image, 0, 0, w, h).to_image(), 0, 0);
    cell
}

/// Backdrop painted before any tile: sky, scenery bands and clouds.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenery {
    pub sky: RgbaImage,
    /// Back to front; the last band also provides the ground fill color
    pub bands: Vec<RgbaImage>,
    pub clouds: Vec<RgbaImage>,
}

impl Scenery {
    pub fn new(sky: RgbaImage, bands: Vec<RgbaImage>, clouds: Vec<RgbaImage>) -> Result<Self, AssetError> {
        if bands.is_empty() {
            return Err(AssetError::IncompleteScenery("no background bands"));
        }
        if clouds.is_empty() {
            return Err(AssetError::IncompleteScenery("no clouds"));
        }
        Ok(Self { sky, bands, clouds })
    }
}

/// All overlay art the compositing passes need.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderAssets {
    /// Depth gradient for a top edge; the other three sides are rotations of it
    pub gradient: RgbaImage,
    pub trees: TreeSprites,
    pub tents: TentSprites,
    pub scenery: Option<Scenery>,
}

impl RenderAssets {
    /// Load overlay art; scenery is only read when `with_scenery` is set.
    pub fn load(paths: &AssetPaths, with_scenery: bool) -> Result<Self, AssetError> {
        let gradient = load_rgba(&paths.gradient)?;
        let trees = TreeSprites::from_sheet(&load_rgba(&paths.pine_sheet())?)?;
        let tents = TentSprites::new(&load_rgba(&paths.tent(1))?, &load_rgba(&paths.tent(2))?);

        let scenery = if with_scenery {
            let sky = load_rgba(&paths.sky)?;
            let bands = SCENERY_BANDS
                .iter()
                .map(|band| load_rgba(&paths.sprite(band)))
                .collect::<Result<Vec<_>, _>>()?;
            let clouds = (1..=CLOUD_COUNT)
                .map(|n| load_rgba(&paths.cloud(n)))
                .collect::<Result<Vec<_>, _>>()?;
            Some(Scenery::new(sky, bands, clouds)?)
        } else {
            None
        };

        Ok(Self { gradient, trees, tents, scenery })
    }
}
