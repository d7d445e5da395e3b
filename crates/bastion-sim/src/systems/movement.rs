//! Movement and collision resolver.
//!
//! `try_move` is the single gate every tank position change goes through,
//! whether the controller is player input or AI. It never mutates terrain.

use hecs::{Entity, World};

use bastion_core::components::Tank;
use bastion_core::enums::Direction;
use bastion_core::types::{Position, Rect};
use bastion_terrain::{tile_span, TileGrid};

/// Attempt to move a tank by (dx, dy) world pixels.
///
/// The move is rejected — returning false with the position unchanged —
/// when the candidate bounding box would leave the world, overlap solid
/// terrain, or overlap another tank. On acceptance the facing is updated
/// to the move vector's dominant axis before the delta is applied.
pub fn try_move(world: &mut World, grid: &TileGrid, entity: Entity, dx: f64, dy: f64) -> bool {
    let current = match world.get::<&Position>(entity) {
        Ok(pos) => *pos,
        Err(_) => return false,
    };

    let candidate = Rect::tank(Position::new(current.x + dx, current.y + dy));

    // World bounds
    if candidate.x < 0.0
        || candidate.y < 0.0
        || candidate.right() > grid.pixel_width()
        || candidate.bottom() > grid.pixel_height()
    {
        return false;
    }

    // Solid terrain
    let (col_min, row_min, col_max, row_max) = tile_span(&candidate);
    for row in row_min..=row_max {
        for col in col_min..=col_max {
            if grid.tile_at(col, row).blocks_tank() {
                return false;
            }
        }
    }

    // Other tanks
    let mut blocked = false;
    {
        let mut query = world.query::<(&Position, &Tank)>();
        for (other, (pos, tank)) in query.iter() {
            if other == entity || tank.health == 0 {
                continue;
            }
            if candidate.intersects(&Rect::tank(*pos)) {
                blocked = true;
                break;
            }
        }
    }
    if blocked {
        return false;
    }

    if let Some(facing) = Direction::from_delta(dx, dy) {
        if let Ok(mut tank) = world.get::<&mut Tank>(entity) {
            tank.facing = facing;
        }
    }
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        pos.x += dx;
        pos.y += dy;
    }
    true
}
