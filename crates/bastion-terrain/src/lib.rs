//! Terrain store for BASTION.
//!
//! Owns the tile map and all tile-type mutation: bricks crumbling,
//! steel destruction, base bookkeeping.

pub use bastion_core as core;

pub mod grid;

// Re-export key types for convenience.
pub use grid::{tile_span, TileGrid};
