//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::TILE_SIZE;
use crate::enums::Direction;

/// 2D position in world space (pixels).
/// x grows East (right), y grows South (down); (0, 0) is the top-left corner.
/// Tank positions are anchored at the top-left of their bounding box,
/// bullet positions at the bullet center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Top-left corner of the tile containing this point.
    pub fn tile(&self) -> (i32, i32) {
        (
            (self.x / TILE_SIZE).floor() as i32,
            (self.y / TILE_SIZE).floor() as i32,
        )
    }

    /// Center of a tile in world pixels.
    pub fn tile_center(col: i32, row: i32) -> Self {
        Self {
            x: col as f64 * TILE_SIZE + TILE_SIZE / 2.0,
            y: row as f64 * TILE_SIZE + TILE_SIZE / 2.0,
        }
    }

    /// Top-left corner of a tile in world pixels.
    pub fn tile_origin(col: i32, row: i32) -> Self {
        Self {
            x: col as f64 * TILE_SIZE,
            y: row as f64 * TILE_SIZE,
        }
    }
}

/// Axis-aligned rectangle used for all collision tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// One-tile bounding box for a tank anchored at `pos`.
    pub fn tank(pos: Position) -> Self {
        Self::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE)
    }

    /// Bullet footprint centered on `pos`: 4x8 when travelling vertically,
    /// 8x4 when travelling horizontally.
    pub fn bullet(pos: Position, direction: Direction) -> Self {
        match direction {
            Direction::Up | Direction::Down => Self::new(pos.x - 2.0, pos.y - 4.0, 4.0, 8.0),
            Direction::Left | Direction::Right => Self::new(pos.x - 4.0, pos.y - 2.0, 8.0, 4.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Overlap test. Edge-touching rectangles do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
