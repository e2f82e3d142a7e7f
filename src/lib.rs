//! kagrender - Library for rendering colour-coded blueprint maps
//!
//! This library provides functionality to:
//! - Build a sprite catalog from tile definitions and a sprite sheet
//! - Classify every blueprint pixel into a tile and index the grid
//! - Composite background, hazard, terrain, tree and spawn layers into one image
//! - Support both lenient and strict handling of undefined colors

pub mod assets;
pub mod catalog;
pub mod classify;
pub mod cli;
pub mod color;
pub mod composite;
pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod tile;

pub use error::RenderError;
pub use pipeline::{render_blueprint, RenderOutput};
