//! Check command: classification only

use std::process::ExitCode;

use crate::assets::{load_catalog, load_rgba};
use crate::catalog::FixedPicker;
use crate::classify::{Diagnostics, MapClassifier};
use crate::composite::TILE_SIZE;
use crate::config::CliOverrides;
use crate::error::RenderError;
use crate::index::TileIndex;
use crate::tile::TileType;

use super::{cwd_relative, exit_code, resolve_config, CheckArgs, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the check command
///
/// Prints one line per unresolved color and exits with an error if there is any.
pub fn run_check(args: &CheckArgs) -> ExitCode {
    let (index, diagnostics) = match classify(args) {
        Ok(classified) => classified,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_code(&e);
        }
    };

    println!(
        "{}: {}x{} tiles, {} solid, {} background, {} hazards, {} trees, {} spawns",
        args.source.display(),
        index.width(),
        index.height(),
        index.count(TileType::Solid),
        index.count(TileType::Background),
        index.count(TileType::Spikes),
        index.count(TileType::Tree),
        index.count(TileType::BlueSpawn) + index.count(TileType::RedSpawn),
    );

    if diagnostics.is_clean() {
        return ExitCode::from(EXIT_SUCCESS);
    }

    for (color, count) in diagnostics.color_summary() {
        let first = diagnostics.unresolved.iter().find(|u| u.color == color).map(|u| u.pos);
        match first {
            Some(pos) => println!("unresolved {} x{} (first at {})", color, count, pos),
            None => println!("unresolved {} x{}", color, count),
        }
    }
    ExitCode::from(EXIT_ERROR)
}

fn classify(args: &CheckArgs) -> Result<(TileIndex, Diagnostics), RenderError> {
    let overrides = CliOverrides { game_path: args.path.as_deref().map(cwd_relative), ..Default::default() };
    let (config, root) = resolve_config(args.config.as_deref(), &overrides)?;
    let paths = config.asset_paths(&root);
    if !paths.sprites.is_dir() {
        return Err(RenderError::GameNotFound(paths.sprites));
    }

    let catalog = load_catalog(&paths, TILE_SIZE)?;
    let blueprint = load_rgba(&args.source)?;
    Ok(MapClassifier::new(&catalog).classify_image(&blueprint, &mut FixedPicker(0))?)
}
