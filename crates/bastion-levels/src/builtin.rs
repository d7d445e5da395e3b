//! Generated default layouts.
//!
//! Used whenever a level file is missing or malformed. Deterministic by
//! construction: the same number always yields the same layout.

use bastion_core::constants::{
    DEFAULT_ENEMY_QUOTA, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_KIND_WEIGHTS,
};
use bastion_core::enums::Tile;

use crate::format::{char_from_tile, LevelDef};

/// Generate the default layout for a level number. Numbers beyond the
/// designed set reuse the base arena with no extra terrain.
pub fn generate(number: u32) -> LevelDef {
    let width = DEFAULT_GRID_WIDTH;
    let height = DEFAULT_GRID_HEIGHT;
    let mut grid = vec![vec![Tile::Empty; width as usize]; height as usize];

    // Base at the bottom center with a protective brick ring.
    let base_col = width / 2;
    let base_row = height - 2;
    grid[base_row as usize][base_col as usize] = Tile::Base;
    for (dcol, drow) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
        let (col, row) = (base_col + dcol, base_row + drow);
        if col >= 0 && col < width && row >= 0 && row < height {
            grid[row as usize][col as usize] = Tile::Brick;
        }
    }

    match number {
        1 => add_level1_terrain(&mut grid, width, height),
        2 => add_level2_terrain(&mut grid, width, height),
        3 => add_level3_terrain(&mut grid, width, height),
        _ => {}
    }

    let rows = grid
        .iter()
        .map(|row| row.iter().copied().map(char_from_tile).collect())
        .collect();

    LevelDef {
        rows,
        player_start: [width / 2 - 2, height - 1],
        enemy_spawns: vec![[0, 0], [width - 1, 0], [width / 2, 0]],
        enemy_quota: DEFAULT_ENEMY_QUOTA,
        kind_weights: DEFAULT_KIND_WEIGHTS,
    }
}

fn set(grid: &mut [Vec<Tile>], col: i32, row: i32, tile: Tile) {
    if row >= 0 && (row as usize) < grid.len() && col >= 0 && (col as usize) < grid[0].len() {
        grid[row as usize][col as usize] = tile;
    }
}

fn add_level1_terrain(grid: &mut [Vec<Tile>], width: i32, height: i32) {
    // Brick lattice
    for col in (3..width - 3).step_by(2) {
        for row in (3..height - 5).step_by(2) {
            set(grid, col, row, Tile::Brick);
        }
    }
    // A few steel posts
    for col in (5..width - 5).step_by(6) {
        set(grid, col, 5, Tile::Steel);
    }
    // Water pool on the left
    for col in 2..5 {
        for row in 9..12 {
            set(grid, col, row, Tile::Water);
        }
    }
    // Grass patch on the right
    for col in (width - 5)..(width - 2) {
        for row in 9..12 {
            set(grid, col, row, Tile::Grass);
        }
    }
}

fn add_level2_terrain(grid: &mut [Vec<Tile>], width: i32, height: i32) {
    // Denser brick clusters
    for col in (2..width - 2).step_by(3) {
        for row in (2..height - 5).step_by(3) {
            set(grid, col, row, Tile::Brick);
            set(grid, col, row + 1, Tile::Brick);
            set(grid, col + 1, row, Tile::Brick);
        }
    }
    // Steel pairs at mid-field
    for col in (4..width - 4).step_by(8) {
        set(grid, col, 7, Tile::Steel);
        set(grid, col + 1, 7, Tile::Steel);
    }
    // Water area
    for col in 10..15 {
        for row in 3..6 {
            set(grid, col, row, Tile::Water);
        }
    }
    // Grass cover
    for col in 5..10 {
        for row in 8..10 {
            set(grid, col, row, Tile::Grass);
        }
    }
    // Ice sheet
    for col in 15..18 {
        for row in 8..11 {
            set(grid, col, row, Tile::Ice);
        }
    }
}

fn add_level3_terrain(grid: &mut [Vec<Tile>], width: i32, height: i32) {
    // Brick maze
    for col in (1..width - 1).step_by(2) {
        for row in (1..height - 4).step_by(2) {
            set(grid, col, row, Tile::Brick);
        }
    }
    // Steel barrier across the middle with two openings
    for col in 3..width - 3 {
        set(grid, col, height / 2, Tile::Steel);
    }
    set(grid, width / 4, height / 2, Tile::Empty);
    set(grid, width / 4 * 3, height / 2, Tile::Empty);
    // Water moat segments near the base row
    for col in 0..width {
        if col < width / 3 || col > width * 2 / 3 {
            set(grid, col, height - 5, Tile::Water);
        }
    }
    // Grass around the base where the ring allows
    for dcol in -2..=2 {
        for drow in -2..0 {
            let (col, row) = (width / 2 + dcol, height - 2 + drow);
            if col >= 0
                && col < width
                && row >= 0
                && row < height
                && grid[row as usize][col as usize] == Tile::Empty
            {
                set(grid, col, row, Tile::Grass);
            }
        }
    }
    // Ice corners up top
    for col in 0..3 {
        for row in 0..3 {
            set(grid, col, row, Tile::Ice);
            set(grid, width - 1 - col, row, Tile::Ice);
        }
    }
}
