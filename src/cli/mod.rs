//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod check;
mod render;

use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{find_config, load_config, merge_cli_overrides, project_root, CliOverrides, ConfigError, KagConfig};
use crate::error::RenderError;

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// kagrender - Render colour-coded blueprint maps into tile map images
#[derive(Parser)]
#[command(name = "kagrender")]
#[command(about = "Render a colour-coded blueprint into a layered tile map image")]
#[command(version)]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a blueprint to an image
    Render(RenderArgs),
    /// Classify a blueprint and report colors with no tile definition
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Blueprint image, one pixel per tile
    pub source: PathBuf,

    /// Disable the shadow layer
    #[arg(short = 's', long)]
    pub no_shadows: bool,

    /// Disable the background layer
    #[arg(short = 'b', long)]
    pub no_background: bool,

    /// Shift the background layer N pixels (up = -N, down = +N)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub bdelta: Option<i32>,

    /// Game installation holding Base/Sprites
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Output format: png, jpeg, bmp
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Where to save the rendered map. Default: SOURCE + ".out"
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Seed for reproducible variant and decoration choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fail on blueprint colors with no tile definition
    #[arg(long)]
    pub strict: bool,

    /// Configuration file. Default: nearest kagrender.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Blueprint image, one pixel per tile
    pub source: PathBuf,

    /// Game installation holding Base/Sprites
    #[arg(long, value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Configuration file. Default: nearest kagrender.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Render(args) => render::run_render(&args),
        Commands::Check(args) => check::run_check(&args),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("Warning: logging unavailable: {}", e);
    }
}

/// Anchor a path given on the command line at the working directory.
///
/// Paths read from the configuration file resolve against the file's directory instead.
pub(crate) fn cwd_relative(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Load the configuration, apply overrides and find the directory relative asset paths start from.
pub(crate) fn resolve_config(
    explicit: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<(KagConfig, PathBuf), ConfigError> {
    let config_path = explicit.map(Path::to_path_buf).or_else(find_config);
    let mut config = load_config(config_path.as_deref())?;
    merge_cli_overrides(&mut config, overrides)?;

    let root = config_path
        .as_deref()
        .and_then(project_root)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok((config, root))
}

/// Exit code for a failed command: invalid configuration or flags is a usage error.
pub(crate) fn exit_code(error: &RenderError) -> ExitCode {
    match error {
        RenderError::Config(ConfigError::Validation(_)) => ExitCode::from(EXIT_INVALID_ARGS),
        _ => ExitCode::from(EXIT_ERROR),
    }
}
