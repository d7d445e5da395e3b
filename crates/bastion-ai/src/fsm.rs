//! Decision helpers for the enemy state machine.
//!
//! The movement resolver lives in the simulation crate; these functions
//! only decide where an enemy wants to go. The caller tries the returned
//! candidates in order against the world and reports success or failure
//! back into the controller state.

use rand::Rng;

use bastion_core::constants::{
    TARGET_PLAYER_CHANCE, WANDER_DWELL_MAX_TICKS, WANDER_DWELL_MIN_TICKS,
};
use bastion_core::enums::Direction;
use bastion_core::types::Position;

/// Dominant-axis direction from one point toward another.
/// Ties prefer horizontal, matching the facing rule for move vectors.
pub fn dominant_direction(from: Position, to: Position) -> Direction {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    Direction::from_delta(dx, dy).unwrap_or(Direction::Up)
}

/// Ordered movement candidates toward a target: the dominant direction
/// first, then the two perpendiculars in random order. When all three
/// fail the caller falls back to a uniformly random direction.
pub fn candidate_directions<R: Rng>(rng: &mut R, from: Position, target: Position) -> [Direction; 3] {
    let primary = dominant_direction(from, target);
    let [mut second, mut third] = primary.perpendicular();
    if rng.gen_bool(0.5) {
        std::mem::swap(&mut second, &mut third);
    }
    [primary, second, third]
}

/// Select a target point: the player with a fixed probability when alive,
/// else the base, else a uniformly random point in the world.
pub fn pick_target<R: Rng>(
    rng: &mut R,
    player: Option<Position>,
    base: Option<Position>,
    world_width: f64,
    world_height: f64,
) -> Position {
    if let Some(player_pos) = player {
        if rng.gen_bool(TARGET_PLAYER_CHANCE) {
            return player_pos;
        }
    }
    if let Some(base_pos) = base {
        return base_pos;
    }
    Position::new(
        rng.gen_range(0.0..world_width.max(1.0)),
        rng.gen_range(0.0..world_height.max(1.0)),
    )
}

/// Fresh wandering dwell duration in ticks.
pub fn roll_dwell<R: Rng>(rng: &mut R) -> u32 {
    rng.gen_range(WANDER_DWELL_MIN_TICKS..=WANDER_DWELL_MAX_TICKS)
}

/// Uniformly random cardinal direction.
pub fn random_direction<R: Rng>(rng: &mut R) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}
