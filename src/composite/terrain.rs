//! Background, hazard and solid terrain passes

use image::RgbaImage;
use std::borrow::Cow;

use super::blend;
use super::shading::{self, Gradients};
use super::{CompositingError, Frame};
use crate::catalog::Orientation;
use crate::index::{Neighborhood, TileIndex};
use crate::tile::{Direction, Tile, TileType};

const CASTLE: &str = "castle";
const CASTLE_WALL: &str = "castle_wall";
const CASTLE_FLOOR: &str = "castle_floor";
const CASTLE_ROOF: &str = "castle_roof";
const CASTLE_DOOR: &str = "castle_door";
const DIRT_BACKING: &str = "dirt_background";
/// Settled hazards with this name cast no depth shading.
const PLAIN_SPIKES: &str = "spikes";

pub(super) fn background_pass(frame: &mut Frame<'_>, index: &TileIndex) -> Result<(), CompositingError> {
    for tile in index.by_type(TileType::Background) {
        let sprite = frame.own_sprite(tile)?;
        frame.paste_tile(tile.pos(), sprite, sprite)?;
        frame.stats.backgrounds += 1;
    }
    Ok(())
}

/// Draw each hazard against its backing, turned toward a solid neighbor, then settle it.
pub(super) fn hazard_pass(frame: &mut Frame<'_>, index: &mut TileIndex) -> Result<(), CompositingError> {
    for pos in index.positions_of(TileType::Spikes) {
        let tile = index.get(pos);

        if let Some(backing) = backing_for(tile.name()) {
            let sprite = frame.named(backing, tile)?;
            frame.paste_tile(pos, sprite, sprite)?;
        }

        let sprite = match hazard_orientation(&index.neighborhood(pos)) {
            Some(orientation) => frame.named(&orientation.variant_name(tile.name()), tile)?,
            None => frame.own_sprite(tile)?,
        };
        frame.paste_tile_color(pos, sprite)?;

        index.reclassify_hazard(pos)?;
        frame.stats.hazards += 1;
    }
    Ok(())
}

/// Backing texture drawn under a hazard, by name suffix.
fn backing_for(name: &str) -> Option<&'static str> {
    if name.ends_with("_dirt") {
        Some(DIRT_BACKING)
    } else if name.ends_with("_castle") {
        Some(CASTLE_WALL)
    } else {
        None
    }
}

/// First solid orthogonal neighbor, checked south, north, east, west.
fn hazard_orientation(hood: &Neighborhood<'_>) -> Option<Orientation> {
    const PRIORITY: [(Direction, Orientation); 4] = [
        (Direction::South, Orientation::Top),
        (Direction::North, Orientation::Bottom),
        (Direction::East, Orientation::Left),
        (Direction::West, Orientation::Right),
    ];
    PRIORITY
        .iter()
        .find(|(dir, _)| hood.get(*dir).kind() == TileType::Solid)
        .map(|&(_, orientation)| orientation)
}

/// Castle sprite replacement picked from the tiles above and below.
fn castle_override(tile: &Tile, hood: &Neighborhood<'_>) -> Option<&'static str> {
    if tile.name() != CASTLE {
        return None;
    }
    let above = hood.get(Direction::North).name();
    let below = hood.get(Direction::South).name();
    if above == CASTLE_WALL {
        Some(CASTLE_FLOOR)
    } else if below == CASTLE_WALL {
        Some(CASTLE_ROOF)
    } else if below.ends_with("door") {
        Some(CASTLE_DOOR)
    } else {
        None
    }
}

/// Draw solid terrain with fog and edge gradients, then shade open neighbors.
///
/// Enclosure is snapshotted once, after hazards were settled, so every tile
/// sees the same post-hazard grid.
pub(super) fn solid_pass(
    frame: &mut Frame<'_>,
    index: &TileIndex,
    gradients: &Gradients,
    shadows: bool,
) -> Result<(), CompositingError> {
    let enclosure = index.enclosure_map();
    let fog = shading::fog(frame.tile_size);
    log::debug!("{} solid tiles fully enclosed", enclosure.count());

    for tile in index.by_type(TileType::Solid) {
        let pos = tile.pos();
        let hood = index.neighborhood(pos);
        let original = frame.own_sprite(tile)?;

        let base = match castle_override(tile, &hood) {
            Some(name) => frame.named(name, tile)?,
            None => original,
        };

        let mut draw: Cow<'_, RgbaImage> = Cow::Borrowed(base);
        if shadows {
            if enclosure.is_enclosed(pos) {
                draw = Cow::Borrowed(&fog);
                frame.stats.fogged += 1;
            } else {
                for dir in Direction::ORTHOGONAL {
                    if !enclosure.is_enclosed(hood.pos(dir)) {
                        continue;
                    }
                    if let Some(gradient) = gradients.toward_buried(dir) {
                        draw = Cow::Owned(blend::mix(&draw, gradient));
                        frame.stats.edge_gradients += 1;
                    }
                }
            }
        }
        frame.paste_tile(pos, &draw, original)?;
        frame.stats.solids += 1;

        for dir in Direction::ORTHOGONAL {
            let neighbor = hood.get(dir);
            if neighbor.kind() != TileType::Background || neighbor.name() == PLAIN_SPIKES {
                continue;
            }
            if let Some(gradient) = gradients.cast(dir) {
                frame.paste_tile_color(neighbor.pos(), gradient)?;
                frame.stats.cast_shadows += 1;
            }
        }
    }
    Ok(())
}
