//! Entity spawn factories.
//!
//! Creates the player, enemy tanks, bullets, power-ups, and explosions
//! with their component bundles. Tank ids are allocated here so bullets
//! can attribute ownership without holding a live handle.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_ai::profiles::profile;
use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::events::AudioCue;
use bastion_core::types::Position;

fn alloc_id(next_tank_id: &mut u32) -> u32 {
    let id = *next_tank_id;
    *next_tank_id += 1;
    id
}

/// Spawn the player tank at the level's start position, with fresh
/// spawn protection.
pub fn spawn_player(world: &mut World, next_tank_id: &mut u32, pos: Position) -> hecs::Entity {
    let stats = profile(TankKind::Player);
    world.spawn((
        PlayerTag,
        PlayerState { upgrade_level: 1 },
        pos,
        Tank {
            id: alloc_id(next_tank_id),
            kind: TankKind::Player,
            facing: Direction::Up,
            health: stats.health,
            speed: stats.speed,
            power: stats.power,
            reload_ticks: stats.reload_ticks,
            cooldown: 0,
        },
        StatusEffects {
            spawn_shield_ticks: SPAWN_PROTECTION_TICKS,
            ..StatusEffects::default()
        },
    ))
}

/// Reset a surviving player entity in place after losing a life.
/// Upgrades carry across respawns; protection restarts.
pub fn respawn_player(world: &mut World, player: hecs::Entity, pos: Position) {
    if let Ok(mut position) = world.get::<&mut Position>(player) {
        *position = pos;
    }
    if let Ok(mut tank) = world.get::<&mut Tank>(player) {
        tank.health = profile(TankKind::Player).health;
        tank.facing = Direction::Up;
        tank.cooldown = 0;
    }
    if let Ok(mut status) = world.get::<&mut StatusEffects>(player) {
        *status = StatusEffects {
            spawn_shield_ticks: SPAWN_PROTECTION_TICKS,
            ..StatusEffects::default()
        };
    }
}

/// Spawn one enemy tank of the given kind. Enemies retarget on their
/// first tick (dwell starts at zero) and roll in facing Down.
pub fn spawn_enemy(
    world: &mut World,
    next_tank_id: &mut u32,
    kind: TankKind,
    pos: Position,
) -> hecs::Entity {
    let stats = profile(kind);
    world.spawn((
        EnemyTag,
        AiController::default(),
        pos,
        Tank {
            id: alloc_id(next_tank_id),
            kind,
            facing: Direction::Down,
            health: stats.health,
            speed: stats.speed,
            power: stats.power,
            reload_ticks: stats.reload_ticks,
            cooldown: 0,
        },
        StatusEffects::default(),
    ))
}

/// Spawn a bullet at a muzzle point.
pub fn spawn_bullet(
    world: &mut World,
    pos: Position,
    direction: Direction,
    power: u8,
    owner_id: u32,
    from_player: bool,
) -> hecs::Entity {
    world.spawn((
        pos,
        Bullet {
            direction,
            speed: BULLET_SPEED,
            power,
            owner_id,
            from_player,
        },
    ))
}

/// Spawn an explosion animation and emit its cue.
pub fn spawn_explosion(
    world: &mut World,
    pos: Position,
    size: ExplosionSize,
    audio: &mut Vec<AudioCue>,
) {
    world.spawn((
        pos,
        Explosion {
            size,
            frame: 0,
            counter: 0,
        },
    ));
    audio.push(AudioCue::Explosion);
}

/// Spawn a power-up of a uniformly random kind.
pub fn spawn_powerup(world: &mut World, rng: &mut ChaCha8Rng, pos: Position) {
    let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
    world.spawn((
        pos,
        PowerUp {
            kind,
            ticks_remaining: POWERUP_LIFETIME_TICKS,
        },
    ));
}
