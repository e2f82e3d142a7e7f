//! Configuration for the renderer
//!
//! Provides types, discovery and loading for `kagrender.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
