//! Depth shading: fog for buried terrain and edge gradients

use image::{imageops, Rgba, RgbaImage};

use crate::tile::Direction;

/// Fill color for solid tiles buried on all eight sides.
pub const FOG_COLOR: Rgba<u8> = Rgba([0x26, 0x0d, 0x0d, 0xff]);

/// The four edge gradients, each a counter-clockwise rotation of the top one.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradients {
    pub top: RgbaImage,
    pub left: RgbaImage,
    pub bottom: RgbaImage,
    pub right: RgbaImage,
}

impl Gradients {
    pub fn new(top: &RgbaImage) -> Self {
        Self {
            top: top.clone(),
            left: imageops::rotate270(top),
            bottom: imageops::rotate180(top),
            right: imageops::rotate90(top),
        }
    }

    /// Overlay stacked on a solid tile when its neighbor in `dir` is buried.
    pub fn toward_buried(&self, dir: Direction) -> Option<&RgbaImage> {
        match dir {
            Direction::North => Some(&self.bottom),
            Direction::East => Some(&self.left),
            Direction::South => Some(&self.top),
            Direction::West => Some(&self.right),
            _ => None,
        }
    }

    /// Shadow cast onto an open neighbor in `dir`.
    pub fn cast(&self, dir: Direction) -> Option<&RgbaImage> {
        match dir {
            Direction::North => Some(&self.top),
            Direction::East => Some(&self.right),
            Direction::South => Some(&self.bottom),
            Direction::West => Some(&self.left),
            _ => None,
        }
    }
}

/// Opaque fog tile.
pub fn fog(tile_size: u32) -> RgbaImage {
    RgbaImage::from_pixel(tile_size, tile_size, FOG_COLOR)
}
