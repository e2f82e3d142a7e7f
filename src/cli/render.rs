//! Render command implementation

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use crate::assets::{load_catalog, load_rgba, RenderAssets};
use crate::composite::TILE_SIZE;
use crate::config::CliOverrides;
use crate::error::RenderError;
use crate::output::{default_output_path, save_image};
use crate::pipeline::render_blueprint;

use super::{cwd_relative, exit_code, resolve_config, RenderArgs, EXIT_SUCCESS};

impl RenderArgs {
    /// Flags that take precedence over the configuration file. Unset flags keep the file's values.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            shadows: self.no_shadows.then_some(false),
            background: self.no_background.then_some(false),
            background_shift: self.bdelta,
            game_path: self.path.as_deref().map(cwd_relative),
            format: self.format.clone(),
            seed: self.seed,
            strict: self.strict.then_some(true),
        }
    }
}

/// Execute the render command
pub fn run_render(args: &RenderArgs) -> ExitCode {
    let start = Instant::now();
    match render(args) {
        Ok(output) => {
            log::info!("finished in {:.2}s", start.elapsed().as_secs_f64());
            log::info!("saved {}", output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

/// Load everything, render and save. Returns the written path.
fn render(args: &RenderArgs) -> Result<PathBuf, RenderError> {
    let (config, root) = resolve_config(args.config.as_deref(), &args.overrides())?;

    let paths = config.asset_paths(&root);
    if !paths.sprites.is_dir() {
        return Err(RenderError::GameNotFound(paths.sprites));
    }

    let options = config.render_options();
    let catalog = load_catalog(&paths, TILE_SIZE)?;
    let assets = RenderAssets::load(&paths, options.background)?;
    let blueprint = load_rgba(&args.source)?;

    let rendered = render_blueprint(&blueprint, &catalog, &assets, options, config.render.strict)?;
    for (color, count) in rendered.diagnostics.color_summary() {
        log::warn!("color {} used by {} pixel(s) has no tile definition", color, count);
    }

    let output = args.output.clone().unwrap_or_else(|| default_output_path(&args.source));
    save_image(&rendered.image, &output, config.output_format())?;
    Ok(output)
}
