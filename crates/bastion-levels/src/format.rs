//! Serde-backed level definition.
//!
//! A level file is JSON: a list of character rows for the layout plus the
//! spawn geometry and enemy roster. Unknown layout characters read as
//! empty ground so hand-edited files degrade instead of failing.

use serde::{Deserialize, Serialize};

use bastion_core::constants::{DEFAULT_ENEMY_QUOTA, DEFAULT_KIND_WEIGHTS};
use bastion_core::enums::Tile;
use bastion_core::types::Position;
use bastion_terrain::TileGrid;

/// A complete level description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDef {
    /// Layout rows, one string per grid row, one character per column:
    /// `.` empty, `B` brick, `S` steel, `W` water, `G` grass, `I` ice,
    /// `E` the base (eagle).
    pub rows: Vec<String>,
    /// Player spawn tile (col, row).
    pub player_start: [i32; 2],
    /// Enemy spawn tiles (col, row).
    pub enemy_spawns: Vec<[i32; 2]>,
    /// Total enemies this level will ever produce.
    #[serde(default = "default_quota")]
    pub enemy_quota: u32,
    /// Spawn weights for Basic/Fast/Power/Armor.
    #[serde(default = "default_weights")]
    pub kind_weights: [f64; 4],
}

fn default_quota() -> u32 {
    DEFAULT_ENEMY_QUOTA
}

fn default_weights() -> [f64; 4] {
    DEFAULT_KIND_WEIGHTS
}

impl LevelDef {
    /// Grid width in tiles (longest row wins; ragged rows are padded).
    pub fn width(&self) -> i32 {
        self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Parse the layout rows into a terrain grid.
    pub fn build_grid(&self) -> TileGrid {
        let width = self.width();
        let height = self.height();
        let mut tiles = vec![Tile::Empty; (width * height) as usize];
        for (row, line) in self.rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                tiles[row * width as usize + col] = tile_from_char(ch);
            }
        }
        TileGrid::from_tiles(width, height, tiles)
    }

    /// Player spawn point in world pixels (tank anchor).
    pub fn player_start_px(&self) -> Position {
        Position::tile_origin(self.player_start[0], self.player_start[1])
    }

    /// Enemy spawn points in world pixels (tank anchors).
    pub fn spawn_points_px(&self) -> Vec<Position> {
        self.enemy_spawns
            .iter()
            .map(|s| Position::tile_origin(s[0], s[1]))
            .collect()
    }
}

/// Layout character to tile. Unrecognized characters are empty ground.
pub fn tile_from_char(ch: char) -> Tile {
    match ch {
        'B' => Tile::Brick,
        'S' => Tile::Steel,
        'W' => Tile::Water,
        'G' => Tile::Grass,
        'I' => Tile::Ice,
        'E' => Tile::Base,
        _ => Tile::Empty,
    }
}

/// Tile back to its layout character (for writing level files).
pub fn char_from_tile(tile: Tile) -> char {
    match tile {
        Tile::Empty => '.',
        Tile::Brick => 'B',
        Tile::Steel => 'S',
        Tile::Water => 'W',
        Tile::Grass => 'G',
        Tile::Ice => 'I',
        Tile::Base => 'E',
    }
}
