//! Tree pass: trunks, stumps, treetops and branches
//!
//! Trees only chain vertically, so each column is walked top to bottom. A run
//! ends at the tree tile whose southern neighbor is not a tree; that tile
//! becomes the stump and the run's overlays are placed.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{CompositingError, Frame};
use crate::assets::TreeSprites;
use crate::index::TileIndex;
use crate::tile::{Direction, TilePos, TileType};

/// Catalog name of the sprite drawn at the bottom of every run.
pub const TREE_STUMP: &str = "tree_stump";

/// Runs longer than this get a treetop.
const TREETOP_MIN_RUN: usize = 3;
/// Runs longer than this may grow branches.
const BRANCH_MIN_RUN: usize = 5;
/// Run cells at each end that never grow a branch.
const BRANCH_MARGIN: usize = 2;
const BRANCH_CHANCE: f64 = 0.3;

const TREETOP_OFFSET: (i64, i64) = (-15, -23);
const BRANCH_OFFSET: (i64, i64) = (-19, -12);

pub(super) fn tree_pass(
    frame: &mut Frame<'_>,
    index: &TileIndex,
    sprites: &TreeSprites,
) -> Result<(), CompositingError> {
    for x in 0..index.width() as i32 {
        let mut run: Vec<TilePos> = Vec::new();

        for tile in index.column(x).filter(|t| t.kind() == TileType::Tree) {
            let pos = tile.pos();
            run.push(pos);

            let sprite = if index.get(pos.offset(Direction::South)).kind() != TileType::Tree {
                grow(frame, &run, sprites);
                run.clear();
                frame.stats.stumps += 1;
                frame.named(TREE_STUMP, tile)?
            } else {
                frame.own_sprite(tile)?
            };

            frame.paste_tile(pos, sprite, sprite)?;
            frame.stats.trees += 1;
        }
    }
    Ok(())
}

/// Place the treetop and branches of a finished run, top tile first.
fn grow(frame: &mut Frame<'_>, run: &[TilePos], sprites: &TreeSprites) {
    let len = run.len();

    if len > TREETOP_MIN_RUN {
        if let Some(top) = sprites.tops.choose(frame.rng.rng()) {
            frame.paste_overlay(run[0], TREETOP_OFFSET, top);
            frame.stats.treetops += 1;
        }
    }

    if len > BRANCH_MIN_RUN {
        for &pos in &run[BRANCH_MARGIN..len - BRANCH_MARGIN] {
            if !frame.rng.rng().gen_bool(BRANCH_CHANCE) {
                continue;
            }
            if let Some(branch) = sprites.branches.choose(frame.rng.rng()) {
                frame.paste_overlay(pos, BRANCH_OFFSET, branch);
                frame.stats.branches += 1;
            }
        }
    }
}
