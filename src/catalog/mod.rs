//! Sprite catalog - tile definitions resolved to sprite variants
//!
//! The catalog is built once from the tile definitions and the world sprite
//! sheet, then shared read-only by classification and compositing. Each tile
//! name owns a [`VariantSet`]; every color listed by the definition points at
//! the same set. Directional hazards get four pre-rotated sets registered under
//! `<name>_t`, `<name>_l`, `<name>_b` and `<name>_r`, reachable only by name.

mod definition;
mod error;
mod picker;

pub use definition::{load_definitions, parse_definitions, TileDefinition};
pub use error::CatalogError;
pub use picker::{FixedPicker, RandomPicker, VariantPicker};

use image::imageops;
use image::RgbaImage;
use std::collections::HashMap;

use crate::color::Color;
use crate::tile::TileType;

/// Hazard names pre-rotated into four orientations.
pub const DIRECTIONAL_HAZARDS: [&str; 3] = ["spikes", "spikes_dirt", "spikes_castle"];

/// Name of the sprite-less variant appended to every `empty` definition.
pub const EMPTY_VARIANT: &str = "empty";

/// Hazard orientation suffix. The sprite is drawn as if standing on the named side's opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Top,
    Left,
    Bottom,
    Right,
}

impl Orientation {
    pub const ALL: [Orientation; 4] =
        [Orientation::Top, Orientation::Left, Orientation::Bottom, Orientation::Right];

    pub fn suffix(&self) -> char {
        match self {
            Orientation::Top => 't',
            Orientation::Left => 'l',
            Orientation::Bottom => 'b',
            Orientation::Right => 'r',
        }
    }

    /// Rotate a sprite counter-clockwise by this orientation's angle (0, 90, 180, 270).
    pub fn rotate(&self, sprite: &RgbaImage) -> RgbaImage {
        match self {
            Orientation::Top => sprite.clone(),
            Orientation::Left => imageops::rotate270(sprite),
            Orientation::Bottom => imageops::rotate180(sprite),
            Orientation::Right => imageops::rotate90(sprite),
        }
    }

    /// Catalog name of the rotated copy of `base`.
    pub fn variant_name(&self, base: &str) -> String {
        format!("{}_{}", base, self.suffix())
    }
}

/// One selectable sprite for a tile name.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub name: String,
    pub kind: TileType,
    pub sprite: Option<RgbaImage>,
}

/// Handle to a variant inside the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId {
    set: usize,
    variant: usize,
}

/// All variants registered for one tile name.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSet {
    id: usize,
    name: String,
    variants: Vec<Variant>,
}

impl VariantSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Choose a variant with the given picker.
    pub fn pick(&self, picker: &mut dyn VariantPicker) -> SpriteId {
        SpriteId { set: self.id, variant: picker.pick(self.variants.len()) }
    }

    /// Choose the variant at an explicit index.
    pub fn at(&self, index: usize) -> Result<SpriteId, CatalogError> {
        if index >= self.variants.len() {
            return Err(CatalogError::IndexOutOfRange {
                name: self.name.clone(),
                index,
                len: self.variants.len(),
            });
        }
        Ok(SpriteId { set: self.id, variant: index })
    }
}

/// Read-only lookup from tile names and blueprint colors to sprite variants.
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    tile_size: u32,
    sets: Vec<VariantSet>,
    by_name: HashMap<String, usize>,
    by_color: HashMap<Color, usize>,
}

impl SpriteCatalog {
    /// Build the catalog by cutting `tile_size` square sprites out of `sheet`.
    ///
    /// Later definitions win when two of them share a name or a color.
    pub fn build(
        definitions: &[TileDefinition],
        sheet: &RgbaImage,
        tile_size: u32,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self { tile_size, ..Default::default() };

        for def in definitions {
            let mut variants = Vec::with_capacity(def.cells.len() + 1);
            for &cell in &def.cells {
                let sprite = crop_cell(sheet, cell, tile_size).ok_or_else(|| {
                    CatalogError::CellOutOfBounds {
                        name: def.name.clone(),
                        cell,
                        sheet: sheet.dimensions(),
                    }
                })?;
                variants.push(Variant { name: def.name.clone(), kind: def.kind, sprite: Some(sprite) });
            }

            if def.kind == TileType::Empty {
                variants.push(Variant {
                    name: EMPTY_VARIANT.to_string(),
                    kind: TileType::Empty,
                    sprite: None,
                });
            }

            if variants.is_empty() {
                return Err(CatalogError::NoVariants { name: def.name.clone() });
            }

            let set = catalog.register(&def.name, variants);
            for &color in &def.colors {
                if let Some(previous) = catalog.by_color.insert(color, set) {
                    log::warn!(
                        "color {} of '{}' was already declared by '{}'",
                        color,
                        def.name,
                        catalog.sets[previous].name
                    );
                }
            }
        }

        for base in DIRECTIONAL_HAZARDS {
            let Some(&set) = catalog.by_name.get(base) else {
                log::debug!("directional hazard '{}' not defined, skipping rotations", base);
                continue;
            };
            let source = &catalog.sets[set].variants[0];
            let sprite = source
                .sprite
                .clone()
                .ok_or_else(|| CatalogError::MissingSprite { name: base.to_string() })?;
            let kind = source.kind;

            for orientation in Orientation::ALL {
                let name = orientation.variant_name(base);
                let rotated = Variant { name: name.clone(), kind, sprite: Some(orientation.rotate(&sprite)) };
                catalog.register(&name, vec![rotated]);
            }
        }

        log::debug!(
            "catalog built: {} variant sets, {} colors",
            catalog.sets.len(),
            catalog.by_color.len()
        );
        Ok(catalog)
    }

    fn register(&mut self, name: &str, variants: Vec<Variant>) -> usize {
        let id = self.sets.len();
        self.sets.push(VariantSet { id, name: name.to_string(), variants });
        if self.by_name.insert(name.to_string(), id).is_some() {
            log::warn!("tile name '{}' defined more than once, keeping the last", name);
        }
        id
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn resolve_by_name(&self, name: &str) -> Result<&VariantSet, CatalogError> {
        self.by_name
            .get(name)
            .map(|&set| &self.sets[set])
            .ok_or_else(|| CatalogError::UnknownName(name.to_string()))
    }

    pub fn resolve_by_color(&self, color: Color) -> Result<&VariantSet, CatalogError> {
        self.by_color
            .get(&color)
            .map(|&set| &self.sets[set])
            .ok_or(CatalogError::UnknownColor(color))
    }

    pub fn variant(&self, id: SpriteId) -> &Variant {
        &self.sets[id.set].variants[id.variant]
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&RgbaImage> {
        self.variant(id).sprite.as_ref()
    }

    /// Pick a variant of `name` and return its sprite; sprite-less picks are an error.
    pub fn sprite_by_name(
        &self,
        name: &str,
        picker: &mut dyn VariantPicker,
    ) -> Result<&RgbaImage, CatalogError> {
        let id = self.resolve_by_name(name)?.pick(picker);
        let variant = self.variant(id);
        variant.sprite.as_ref().ok_or_else(|| CatalogError::MissingSprite { name: variant.name.clone() })
    }
}

/// Cut the `tile_size` square at sheet cell `[x, y]`.
fn crop_cell(sheet: &RgbaImage, [x, y]: [u32; 2], tile_size: u32) -> Option<RgbaImage> {
    let left = x.checked_mul(tile_size)?;
    let top = y.checked_mul(tile_size)?;
    if left.checked_add(tile_size)? > sheet.width() || top.checked_add(tile_size)? > sheet.height() {
        return None;
    }
    Some(imageops::crop_imm(sheet, left, top, tile_size, tile_size).to_image())
}
