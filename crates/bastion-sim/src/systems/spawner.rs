//! Wave director — spawns enemies over time against the level's quota.
//!
//! One spawn attempt whenever the timer has elapsed, the concurrency cap
//! has room, and the quota is not exhausted. A blocked spawn point leaves
//! the timer elapsed so the spawn happens as soon as the field opens.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_core::components::{EnemyTag, Tank};
use bastion_core::constants::{ENEMY_SPAWN_INTERVAL_TICKS, MAX_LIVE_ENEMIES};
use bastion_core::enums::TankKind;
use bastion_core::types::{Position, Rect};
use bastion_levels::LevelDef;

use crate::progress::LevelProgress;
use crate::world_setup;

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    progress: &mut LevelProgress,
    level: &LevelDef,
    next_tank_id: &mut u32,
) {
    if progress.spawned >= progress.quota {
        return;
    }

    progress.spawn_timer = progress.spawn_timer.saturating_add(1);
    if progress.spawn_timer < ENEMY_SPAWN_INTERVAL_TICKS {
        return;
    }

    let live = {
        let mut query = world.query::<&EnemyTag>();
        query.iter().count() as u32
    };
    if live >= MAX_LIVE_ENEMIES {
        return;
    }

    let spawn_points = level.spawn_points_px();
    if spawn_points.is_empty() {
        return;
    }
    let pos = spawn_points[rng.gen_range(0..spawn_points.len())];

    let spawn_rect = Rect::tank(pos);
    let occupied = {
        let mut query = world.query::<(&Position, &Tank)>();
        query
            .iter()
            .any(|(_, (other, _))| spawn_rect.intersects(&Rect::tank(*other)))
    };
    if occupied {
        return;
    }

    let kind = draw_kind(rng, &level.kind_weights);
    world_setup::spawn_enemy(world, next_tank_id, kind, pos);
    progress.spawned += 1;
    progress.spawn_timer = 0;
}

/// Weighted draw over Basic/Fast/Power/Armor.
pub fn draw_kind(rng: &mut ChaCha8Rng, weights: &[f64; 4]) -> TankKind {
    const KINDS: [TankKind; 4] = [
        TankKind::Basic,
        TankKind::Fast,
        TankKind::Power,
        TankKind::Armor,
    ];
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return TankKind::Basic;
    }
    let mut roll = rng.gen_range(0.0..total);
    for (kind, weight) in KINDS.iter().zip(weights) {
        if roll < *weight {
            return *kind;
        }
        roll -= *weight;
    }
    TankKind::Armor
}
