//! End-to-end rendering over in-memory fixtures

mod common;

use common::*;
use image::Rgba;
use kagrender::catalog::FixedPicker;
use kagrender::classify::MapClassifier;
use kagrender::color::Color;
use kagrender::composite::{CompositeRenderer, RenderOptions, FOG_COLOR};
use kagrender::tile::{TilePos, TileType};
use kagrender::{render_blueprint, RenderError};

fn plain() -> RenderOptions {
    RenderOptions { background: false, seed: Some(1), ..Default::default() }
}

#[test]
fn test_dirt_row_beside_boundary_color() {
    let catalog = catalog();
    let assets = assets(false);
    let blueprint = blueprint(&[&[DIRT, DIRT, VOID]]);

    let out = render_blueprint(&blueprint, &catalog, &assets, plain(), false).unwrap();

    assert_eq!(out.image.dimensions(), (24, 8));
    assert!(out.diagnostics.is_clean());
    assert_eq!(out.stats.solids, 2);
    assert_eq!(out.stats.fogged, 0);
    for y in 0..8 {
        for x in 0..16 {
            assert_eq!(out.image.get_pixel(x, y)[3], 255, "dirt pixel ({}, {})", x, y);
        }
        for x in 16..24 {
            assert_eq!(out.image.get_pixel(x, y)[3], 0, "sky pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_single_spawn_draws_tent_over_tile() {
    let catalog = catalog();
    let assets = assets(false);
    let out = render_blueprint(&blueprint(&[&[BLUE_SPAWN]]), &catalog, &assets, plain(), false).unwrap();

    assert_eq!(out.image.dimensions(), (8, 8));
    assert_eq!(out.stats.spawns, 1);
    // Canvas (3, 5) is tent pixel (19, 21)
    assert_eq!(*out.image.get_pixel(3, 5), Rgba([19, 21, 255, 255]));
}

#[test]
fn test_red_spawn_uses_red_tent() {
    let catalog = catalog();
    let assets = assets(false);
    let out = render_blueprint(&blueprint(&[&[RED_SPAWN]]), &catalog, &assets, plain(), false).unwrap();
    assert_eq!(*out.image.get_pixel(0, 0), Rgba([16, 16, 0, 255]));
}

#[test]
fn test_seeded_render_is_reproducible() {
    let catalog = catalog();
    let assets = assets(true);
    let map = blueprint(&[
        &[SKY, TREE, SKY, SKY],
        &[SKY, TREE, SKY, BLUE_SPAWN],
        &[SKY, TREE, SPIKES_DIRT, SKY],
        &[DIRT_BACK, TREE, DIRT, DIRT],
        &[DIRT, TREE, DIRT, DIRT],
        &[DIRT, TREE, DIRT, DIRT],
        &[DIRT, DIRT, DIRT, DIRT],
    ]);
    let options = RenderOptions { seed: Some(42), ..Default::default() };

    let first = render_blueprint(&map, &catalog, &assets, options, false).unwrap();
    let second = render_blueprint(&map, &catalog, &assets, options, false).unwrap();

    assert_eq!(first.image, second.image);
    assert_eq!(first.stats, second.stats);
    assert_eq!(first.stats.treetops, 1);
}

#[test]
fn test_scenery_fills_canvas() {
    let catalog = catalog();
    let assets = assets(true);
    let options = RenderOptions { seed: Some(3), ..Default::default() };
    let out = render_blueprint(&blueprint(&[&[SKY, SKY], &[SKY, SKY]]), &catalog, &assets, options, false).unwrap();
    assert!(out.image.pixels().all(|p| p[3] == 255));
}

#[test]
fn test_hazards_settle_to_background() {
    let catalog = catalog();
    let assets = assets(false);
    let (mut index, _) = MapClassifier::new(&catalog)
        .classify(&[SPIKES_DIRT, DIRT], 1, 2, &mut FixedPicker(0))
        .unwrap();

    let (image, stats) = CompositeRenderer::new(&catalog, &assets, plain()).render(&mut index).unwrap();

    assert_eq!(stats.hazards, 1);
    assert_eq!(index.by_type(TileType::Spikes).count(), 0);
    assert_eq!(index.count(TileType::Background), 1);
    let hazard = index.get(TilePos::new(0, 0));
    assert_eq!(hazard.classified_type(), TileType::Spikes);
    assert_eq!(hazard.kind(), TileType::Background);
    // Settled dirt spikes are shaded by the solid below them
    assert_eq!(stats.cast_shadows, 1);
    // Dirt backing shows where the spike sprite is clear
    assert_eq!(image.get_pixel(3, 6)[3], 255);
}

#[test]
fn test_plain_spikes_receive_no_shading() {
    let catalog = catalog();
    let assets = assets(false);
    let out = render_blueprint(&blueprint(&[&[SPIKES], &[DIRT]]), &catalog, &assets, plain(), false).unwrap();
    assert_eq!(out.stats.hazards, 1);
    assert_eq!(out.stats.cast_shadows, 0);
}

#[test]
fn test_tall_tree_gets_treetop_and_stump() {
    let catalog = catalog();
    let assets = assets(false);
    let tree: &[Color] = &[TREE];
    let dirt: &[Color] = &[DIRT];
    let column = [tree, tree, tree, tree, tree, tree, dirt];
    let out = render_blueprint(&blueprint(&column), &catalog, &assets, plain(), false).unwrap();

    assert_eq!(out.stats.trees, 6);
    assert_eq!(out.stats.treetops, 1);
    assert_eq!(out.stats.stumps, 1);
    assert_eq!(*out.image.get_pixel(4, 44), STUMP_FILL);
}

#[test]
fn test_short_tree_has_no_treetop() {
    let catalog = catalog();
    let assets = assets(false);
    let out = render_blueprint(&blueprint(&[&[TREE], &[TREE], &[DIRT]]), &catalog, &assets, plain(), false).unwrap();

    assert_eq!(out.stats.trees, 2);
    assert_eq!(out.stats.treetops, 0);
    assert_eq!(out.stats.branches, 0);
    assert_eq!(out.stats.stumps, 1);
    assert_eq!(*out.image.get_pixel(4, 4), TRUNK_FILL);
    assert_eq!(*out.image.get_pixel(4, 12), STUMP_FILL);
}

#[test]
fn test_enclosed_tile_is_fogged() {
    let catalog = catalog();
    let assets = assets(false);
    let row: &[_] = &[DIRT, DIRT, DIRT];
    let out = render_blueprint(&blueprint(&[row, row, row]), &catalog, &assets, plain(), false).unwrap();

    assert_eq!(out.stats.fogged, 1);
    assert_eq!(*out.image.get_pixel(12, 12), FOG_COLOR);
}

#[test]
fn test_open_corner_prevents_fog() {
    let catalog = catalog();
    let assets = assets(false);
    let row: &[_] = &[DIRT, DIRT, DIRT];
    let map = blueprint(&[&[SKY, DIRT, DIRT], row, row]);
    let out = render_blueprint(&map, &catalog, &assets, plain(), false).unwrap();

    assert_eq!(out.stats.fogged, 0);
    assert_eq!(*out.image.get_pixel(12, 12), DIRT_FILL);
}

#[test]
fn test_shadows_disabled_keeps_sprites() {
    let catalog = catalog();
    let assets = assets(false);
    let row: &[_] = &[DIRT, DIRT, DIRT];
    let options = RenderOptions { shadows: false, ..plain() };
    let out = render_blueprint(&blueprint(&[row, row, row]), &catalog, &assets, options, false).unwrap();

    assert_eq!(out.stats.fogged, 0);
    assert_eq!(out.stats.edge_gradients, 0);
    assert!(out.image.pixels().all(|p| *p == DIRT_FILL));
}

#[test]
fn test_strict_mode_rejects_unknown_colors() {
    let catalog = catalog();
    let assets = assets(false);
    let map = blueprint(&[&[DIRT, Color::new(1, 2, 3)]]);
    let result = render_blueprint(&map, &catalog, &assets, plain(), true);
    assert!(matches!(result, Err(RenderError::Classification(_))));
}

#[test]
fn test_lenient_mode_reports_unknown_colors() {
    let catalog = catalog();
    let assets = assets(false);
    let unknown = Color::new(1, 2, 3);
    let map = blueprint(&[&[DIRT, unknown, unknown]]);

    let out = render_blueprint(&map, &catalog, &assets, plain(), false).unwrap();

    assert_eq!(out.diagnostics.unresolved.len(), 2);
    assert_eq!(out.diagnostics.color_summary(), vec![(unknown, 2)]);
    assert_eq!(out.image.dimensions(), (24, 8));
    assert_eq!(out.image.get_pixel(20, 4)[3], 0);
}
