//! Shared fixtures: an in-memory tile set and a minimal game installation on disk
#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;

use kagrender::assets::{RenderAssets, Scenery, TentSprites, TreeSprites, TREE_CELL};
use kagrender::catalog::{parse_definitions, SpriteCatalog};
use kagrender::color::Color;

pub const DIRT: Color = Color::new(132, 71, 21);
pub const DIRT_BACK: Color = Color::new(59, 20, 6);
pub const SKY: Color = Color::new(165, 189, 200);
pub const VOID: Color = Color::new(100, 113, 96);
pub const SPIKES_DIRT: Color = Color::new(180, 42, 17);
pub const SPIKES: Color = Color::new(220, 60, 60);
pub const TREE: Color = Color::new(13, 136, 53);
pub const BLUE_SPAWN: Color = Color::new(0, 255, 255);
pub const RED_SPAWN: Color = Color::new(255, 0, 0);

pub const DIRT_FILL: Rgba<u8> = Rgba([120, 70, 30, 255]);
pub const DIRT_BACK_FILL: Rgba<u8> = Rgba([60, 30, 10, 255]);
pub const SPIKE_FILL: Rgba<u8> = Rgba([200, 200, 200, 255]);
pub const TRUNK_FILL: Rgba<u8> = Rgba([90, 50, 20, 255]);
pub const STUMP_FILL: Rgba<u8> = Rgba([70, 40, 15, 255]);

pub const DEFINITIONS: &str = r##"[
    {"name": "dirt", "type": "solid", "blocks": [[0, 0]], "colors": [[132, 71, 21]]},
    {"name": "dirt_background", "type": "background", "blocks": [[1, 0]], "colors": ["#3b1406"]},
    {"name": "sky", "type": "empty", "blocks": [], "colors": [[165, 189, 200], [100, 113, 96]]},
    {"name": "spikes_dirt", "type": "spikes", "blocks": [[2, 0]], "colors": [[180, 42, 17]]},
    {"name": "spikes", "type": "spikes", "blocks": [[2, 0]], "colors": [[220, 60, 60]]},
    {"name": "tree", "type": "tree", "blocks": [[3, 0]], "colors": [[13, 136, 53]]},
    {"name": "tree_stump", "type": "background", "blocks": [[4, 0]], "colors": []},
    {"name": "blue_spawn", "type": "blue_spawn", "blocks": [[5, 0]], "colors": [[0, 255, 255]]},
    {"name": "red_spawn", "type": "red_spawn", "blocks": [[5, 0]], "colors": [[255, 0, 0]]}
]"##;

/// Six 8x8 cells: dirt, dirt background, spikes (top half only), trunk, stump, clear.
pub fn world_sheet() -> RgbaImage {
    RgbaImage::from_fn(48, 8, |x, y| match x / 8 {
        0 => DIRT_FILL,
        1 => DIRT_BACK_FILL,
        2 if y < 4 => SPIKE_FILL,
        3 => TRUNK_FILL,
        4 => STUMP_FILL,
        _ => Rgba([0, 0, 0, 0]),
    })
}

pub fn catalog() -> SpriteCatalog {
    let definitions = parse_definitions(DEFINITIONS).expect("fixture definitions parse");
    SpriteCatalog::build(&definitions, &world_sheet(), 8).expect("fixture catalog builds")
}

/// Dark along the bottom edge.
pub fn gradient() -> RgbaImage {
    RgbaImage::from_fn(8, 8, |_, y| if y == 7 { Rgba([0, 0, 0, 255]) } else { Rgba([0, 0, 0, 0]) })
}

/// Seven stacked 38x38 cells, tops then branches.
pub fn pine_sheet() -> RgbaImage {
    RgbaImage::from_fn(TREE_CELL, TREE_CELL * 7, |_, y| {
        if y / TREE_CELL < 4 {
            Rgba([20, 120, 40, 255])
        } else {
            Rgba([30, 100, 30, 255])
        }
    })
}

/// Tent whose color encodes the tent pixel coordinate.
pub fn tent(blue: u8) -> RgbaImage {
    RgbaImage::from_fn(32, 32, |x, y| Rgba([x as u8, y as u8, blue, 255]))
}

pub fn scenery() -> Scenery {
    Scenery::new(
        RgbaImage::from_pixel(4, 4, Rgba([120, 160, 220, 255])),
        vec![RgbaImage::from_pixel(16, 12, Rgba([40, 90, 40, 255]))],
        vec![RgbaImage::from_pixel(12, 6, Rgba([255, 255, 255, 255]))],
    )
    .expect("fixture scenery is complete")
}

pub fn assets(with_scenery: bool) -> RenderAssets {
    RenderAssets {
        gradient: gradient(),
        trees: TreeSprites::from_sheet(&pine_sheet()).expect("fixture pine sheet is large enough"),
        tents: TentSprites::new(&tent(255), &tent(0)),
        scenery: with_scenery.then(scenery),
    }
}

/// Blueprint image from rows of colors.
pub fn blueprint(rows: &[&[Color]]) -> RgbaImage {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    RgbaImage::from_fn(width, height, |x, y| {
        let Color([r, g, b]) = rows[y as usize][x as usize];
        Rgba([r, g, b, 255])
    })
}

/// Write a game installation plus definitions, gradient, sky and a config file under `root`.
pub fn write_game_install(root: &Path) {
    let sprites = root.join("game").join("Base").join("Sprites");
    fs::create_dir_all(sprites.join("Trees")).expect("create sprite dirs");
    fs::create_dir_all(sprites.join("Back")).expect("create scenery dir");

    world_sheet().save(sprites.join("world.png")).expect("save world sheet");
    pine_sheet().save(sprites.join("Trees").join("pine.png")).expect("save pine sheet");
    tent(255).save(sprites.join("tent1.png")).expect("save tent1");
    tent(0).save(sprites.join("tent2.png")).expect("save tent2");

    let scenery = scenery();
    for band in ["BackgroundPlains", "BackgroundTrees", "BackgroundCastle"] {
        scenery.bands[0].save(sprites.join("Back").join(format!("{}.png", band))).expect("save band");
    }
    for n in 1..=4 {
        scenery.clouds[0].save(sprites.join("Back").join(format!("cloud{}.png", n))).expect("save cloud");
    }

    fs::write(root.join("blocks.json"), DEFINITIONS).expect("write definitions");
    gradient().save(root.join("gradient.png")).expect("save gradient");
    scenery.sky.save(root.join("bg_gradient.png")).expect("save sky");
    fs::write(root.join("kagrender.toml"), "[assets]\ngame_path = \"game\"\n\n[render]\nseed = 1\n")
        .expect("write config");
}
