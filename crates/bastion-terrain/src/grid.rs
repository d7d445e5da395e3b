//! TileGrid: the level's tile map with mutation bookkeeping.
//!
//! All accessors absorb out-of-range coordinates: reads outside the grid
//! behave as `Tile::Empty`, writes outside the grid are ignored. AI and
//! collision code routinely probe neighboring cells near map edges.

use bastion_core::constants::{BRICK_HITS, TILE_SIZE};
use bastion_core::enums::Tile;
use bastion_core::types::Rect;

/// The level grid. Row-major storage, addressed by (col, row).
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    /// Remaining hits per cell; meaningful only for Brick cells.
    brick_hits: Vec<u8>,
    /// Latched when the base cell is destroyed. Never resets within a level.
    base_destroyed: bool,
}

impl TileGrid {
    /// Create an all-empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let cells = (width.max(0) * height.max(0)) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; cells],
            brick_hits: vec![0; cells],
            base_destroyed: false,
        }
    }

    /// Create a grid from pre-parsed tiles. `tiles` must be row-major with
    /// `width * height` entries; brick hit counters start full.
    pub fn from_tiles(width: i32, height: i32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        let brick_hits = tiles
            .iter()
            .map(|t| if *t == Tile::Brick { BRICK_HITS } else { 0 })
            .collect();
        Self {
            width,
            height,
            tiles,
            brick_hits,
            base_destroyed: false,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// World extent in pixels.
    pub fn pixel_width(&self) -> f64 {
        self.width as f64 * TILE_SIZE
    }

    pub fn pixel_height(&self) -> f64 {
        self.height as f64 * TILE_SIZE
    }

    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.width && row >= 0 && row < self.height
    }

    fn idx(&self, col: i32, row: i32) -> usize {
        (row * self.width + col) as usize
    }

    /// Tile at (col, row). Out-of-bounds reads return Empty.
    pub fn tile_at(&self, col: i32, row: i32) -> Tile {
        if self.in_bounds(col, row) {
            self.tiles[self.idx(col, row)]
        } else {
            Tile::Empty
        }
    }

    /// Set the tile at (col, row). Out-of-bounds writes are a no-op.
    /// Placing a Brick refills its hit counter.
    pub fn set_tile(&mut self, col: i32, row: i32, tile: Tile) {
        if !self.in_bounds(col, row) {
            return;
        }
        let idx = self.idx(col, row);
        self.tiles[idx] = tile;
        self.brick_hits[idx] = if tile == Tile::Brick { BRICK_HITS } else { 0 };
    }

    /// Damage the brick at (col, row). Returns true exactly when the hit
    /// crumbles the cell to Empty. Non-brick cells (steel included) never
    /// transition through this path.
    pub fn damage_brick(&mut self, col: i32, row: i32) -> bool {
        if !self.in_bounds(col, row) || self.tile_at(col, row) != Tile::Brick {
            return false;
        }
        let idx = self.idx(col, row);
        self.brick_hits[idx] = self.brick_hits[idx].saturating_sub(1);
        if self.brick_hits[idx] == 0 {
            self.tiles[idx] = Tile::Empty;
            true
        } else {
            false
        }
    }

    /// Destroy the base cell. Idempotent; once latched the level is lost.
    pub fn destroy_base(&mut self, col: i32, row: i32) {
        if self.tile_at(col, row) == Tile::Base {
            let idx = self.idx(col, row);
            self.tiles[idx] = Tile::Empty;
            self.base_destroyed = true;
        }
    }

    pub fn base_destroyed(&self) -> bool {
        self.base_destroyed
    }

    /// Locate the base cell, if one is still standing.
    pub fn base_position(&self) -> Option<(i32, i32)> {
        for row in 0..self.height {
            for col in 0..self.width {
                if self.tile_at(col, row) == Tile::Base {
                    return Some((col, row));
                }
            }
        }
        None
    }

    /// Convert Brick cells in the base's 8-neighborhood to Steel
    /// (Shovel power-up). Already-Steel neighbors are unaffected.
    pub fn upgrade_walls_around_base(&mut self) {
        let (base_col, base_row) = match self.base_position() {
            Some(pos) => pos,
            None => return,
        };
        for drow in -1..=1 {
            for dcol in -1..=1 {
                if dcol == 0 && drow == 0 {
                    continue;
                }
                let (col, row) = (base_col + dcol, base_row + drow);
                if self.tile_at(col, row) == Tile::Brick {
                    self.set_tile(col, row, Tile::Steel);
                }
            }
        }
    }
}

/// Inclusive tile-coordinate span covered by a world-space rectangle.
/// Returns (col_min, row_min, col_max, row_max). The right/bottom edges
/// are exclusive: a rect flush against a tile boundary does not reach
/// into the next cell.
pub fn tile_span(rect: &Rect) -> (i32, i32, i32, i32) {
    const EDGE_EPSILON: f64 = 1e-6;
    (
        (rect.x / TILE_SIZE).floor() as i32,
        (rect.y / TILE_SIZE).floor() as i32,
        ((rect.right() - EDGE_EPSILON) / TILE_SIZE).floor() as i32,
        ((rect.bottom() - EDGE_EPSILON) / TILE_SIZE).floor() as i32,
    )
}
