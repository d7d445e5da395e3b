//! Lifetime system — every per-entity tick counter decrements here,
//! exactly once per tick: fire cooldowns, protection timers, the global
//! freeze, power-up expiry, and explosion animation. Counters stop at
//! zero; they never go negative.

use hecs::{Entity, World};

use bastion_core::components::{Explosion, PowerUp, StatusEffects, Tank};
use bastion_core::constants::{EXPLOSION_FRAMES, EXPLOSION_FRAME_TICKS};

pub fn run(world: &mut World, freeze_ticks: &mut u32, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    *freeze_ticks = freeze_ticks.saturating_sub(1);

    for (_entity, tank) in world.query_mut::<&mut Tank>() {
        tank.cooldown = tank.cooldown.saturating_sub(1);
    }

    for (_entity, status) in world.query_mut::<&mut StatusEffects>() {
        status.shield_ticks = status.shield_ticks.saturating_sub(1);
        status.invincible_ticks = status.invincible_ticks.saturating_sub(1);
        status.spawn_shield_ticks = status.spawn_shield_ticks.saturating_sub(1);
    }

    // Uncollected power-ups expire without awarding any effect.
    for (entity, power_up) in world.query_mut::<&mut PowerUp>() {
        power_up.ticks_remaining = power_up.ticks_remaining.saturating_sub(1);
        if power_up.ticks_remaining == 0 {
            despawn_buffer.push(entity);
        }
    }

    for (entity, explosion) in world.query_mut::<&mut Explosion>() {
        explosion.counter += 1;
        if explosion.counter >= EXPLOSION_FRAME_TICKS {
            explosion.counter = 0;
            explosion.frame += 1;
            if explosion.frame >= EXPLOSION_FRAMES {
                despawn_buffer.push(entity);
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
