//! Combat resolver — bullet firing, flight, and every bullet collision.
//!
//! Each tick every bullet integrates its position, then resolves at most
//! one effect in fixed priority order: terrain, opposing bullet, tank.
//! Terrain is checked before tanks so a bullet can never pass through a
//! wall to hit the tank behind it in the same tick. Entities destroyed
//! mid-phase stay in the world (health zero, skipped by later bullets)
//! until the end-of-phase despawn drain, so iteration never corrupts.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use bastion_ai::profiles::profile;
use bastion_core::components::{Bullet, PlayerTag, StatusEffects, Tank};
use bastion_core::constants::{MAX_LIVE_BULLETS_PER_TANK, TILE_SIZE};
use bastion_core::enums::{Direction, ExplosionSize, Tile};
use bastion_core::events::AudioCue;
use bastion_core::types::{Position, Rect};
use bastion_terrain::{tile_span, TileGrid};

use crate::progress::{LevelProgress, ScoreState};
use crate::world_setup;

/// Fire a bullet from a tank's muzzle, subject to its cooldown and the
/// live-bullet magazine limit. Returns whether a bullet was spawned.
pub fn try_fire(world: &mut World, shooter: Entity, audio: &mut Vec<AudioCue>) -> bool {
    let (owner_id, facing, power, reload_ticks, pos) = {
        let tank = match world.get::<&Tank>(shooter) {
            Ok(tank) => tank,
            Err(_) => return false,
        };
        if tank.cooldown > 0 {
            return false;
        }
        let pos = match world.get::<&Position>(shooter) {
            Ok(pos) => *pos,
            Err(_) => return false,
        };
        (tank.id, tank.facing, tank.power, tank.reload_ticks, pos)
    };

    let live = {
        let mut query = world.query::<&Bullet>();
        query.iter().filter(|(_, b)| b.owner_id == owner_id).count()
    };
    if live >= MAX_LIVE_BULLETS_PER_TANK {
        return false;
    }

    let from_player = world.get::<&PlayerTag>(shooter).is_ok();
    world_setup::spawn_bullet(world, muzzle(pos, facing), facing, power, owner_id, from_player);
    if let Ok(mut tank) = world.get::<&mut Tank>(shooter) {
        tank.cooldown = reload_ticks;
    }
    audio.push(AudioCue::Shoot);
    true
}

/// Muzzle point: midpoint of the tank face in the firing direction.
fn muzzle(pos: Position, facing: Direction) -> Position {
    let half = TILE_SIZE / 2.0;
    match facing {
        Direction::Up => Position::new(pos.x + half, pos.y),
        Direction::Right => Position::new(pos.x + TILE_SIZE, pos.y + half),
        Direction::Down => Position::new(pos.x + half, pos.y + TILE_SIZE),
        Direction::Left => Position::new(pos.x, pos.y + half),
    }
}

struct BulletInfo {
    entity: Entity,
    direction: Direction,
    speed: f64,
    power: u8,
    owner_id: u32,
    from_player: bool,
}

/// Advance all bullets one tick and resolve their collisions.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    grid: &mut TileGrid,
    rng: &mut ChaCha8Rng,
    score: &mut ScoreState,
    progress: &mut LevelProgress,
    powerup_chance_on_kill: f64,
    powerup_chance_on_brick: f64,
    player_spawn: Position,
    audio: &mut Vec<AudioCue>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let bullets: Vec<BulletInfo> = {
        let mut query = world.query::<&Bullet>();
        query
            .iter()
            .map(|(entity, bullet)| BulletInfo {
                entity,
                direction: bullet.direction,
                speed: bullet.speed,
                power: bullet.power,
                owner_id: bullet.owner_id,
                from_player: bullet.from_player,
            })
            .collect()
    };

    // Integrate all positions first, removing anything that left the world.
    let mut removed: Vec<Entity> = Vec::new();
    for info in &bullets {
        let (dx, dy) = info.direction.delta();
        let pos = match world.get::<&mut Position>(info.entity) {
            Ok(mut pos) => {
                pos.x += dx * info.speed;
                pos.y += dy * info.speed;
                *pos
            }
            Err(_) => continue,
        };
        if pos.x < 0.0 || pos.x > grid.pixel_width() || pos.y < 0.0 || pos.y > grid.pixel_height() {
            removed.push(info.entity);
        }
    }

    // Resolve collisions per bullet; the first match wins.
    for info in &bullets {
        if removed.contains(&info.entity) {
            continue;
        }
        let pos = match world.get::<&Position>(info.entity) {
            Ok(pos) => *pos,
            Err(_) => continue,
        };
        let rect = Rect::bullet(pos, info.direction);

        // 1. Terrain
        if resolve_terrain(world, grid, rng, powerup_chance_on_brick, pos, &rect, info.power, audio)
        {
            removed.push(info.entity);
            continue;
        }

        // 2. Opposing bullet
        if let Some(other) = find_bullet_overlap(world, &bullets, &removed, info, &rect) {
            removed.push(info.entity);
            removed.push(other);
            world_setup::spawn_explosion(world, pos, ExplosionSize::Small, audio);
            continue;
        }

        // 3. Tank
        if resolve_tank_hit(
            world,
            rng,
            score,
            progress,
            powerup_chance_on_kill,
            player_spawn,
            info,
            pos,
            &rect,
            audio,
            despawn_buffer,
        ) {
            removed.push(info.entity);
        }
    }

    despawn_buffer.extend(removed);
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Bullet versus terrain. Scans the cells under the bullet footprint in
/// row-major order; the first interacting tile consumes the bullet.
/// Water, grass, and ice are transparent to bullets.
#[allow(clippy::too_many_arguments)]
fn resolve_terrain(
    world: &mut World,
    grid: &mut TileGrid,
    rng: &mut ChaCha8Rng,
    powerup_chance_on_brick: f64,
    pos: Position,
    rect: &Rect,
    power: u8,
    audio: &mut Vec<AudioCue>,
) -> bool {
    let (col_min, row_min, col_max, row_max) = tile_span(rect);
    for row in row_min..=row_max {
        for col in col_min..=col_max {
            match grid.tile_at(col, row) {
                Tile::Brick => {
                    audio.push(AudioCue::BrickHit);
                    let crumbled = if power >= 2 {
                        grid.set_tile(col, row, Tile::Empty);
                        true
                    } else {
                        grid.damage_brick(col, row)
                    };
                    if crumbled && rng.gen_bool(powerup_chance_on_brick.clamp(0.0, 1.0)) {
                        world_setup::spawn_powerup(world, rng, Position::tile_origin(col, row));
                    }
                    world_setup::spawn_explosion(world, pos, ExplosionSize::Small, audio);
                    return true;
                }
                Tile::Steel => {
                    audio.push(AudioCue::SteelHit);
                    if power >= 2 {
                        grid.set_tile(col, row, Tile::Empty);
                    }
                    world_setup::spawn_explosion(world, pos, ExplosionSize::Small, audio);
                    return true;
                }
                Tile::Base => {
                    grid.destroy_base(col, row);
                    audio.push(AudioCue::BaseDestroyed);
                    world_setup::spawn_explosion(world, pos, ExplosionSize::Large, audio);
                    return true;
                }
                Tile::Empty | Tile::Water | Tile::Grass | Tile::Ice => {}
            }
        }
    }
    false
}

/// First live bullet overlapping this one, if any. All pairs collide
/// symmetrically, same-owner pairs included.
fn find_bullet_overlap(
    world: &World,
    bullets: &[BulletInfo],
    removed: &[Entity],
    me: &BulletInfo,
    my_rect: &Rect,
) -> Option<Entity> {
    for other in bullets {
        if other.entity == me.entity || removed.contains(&other.entity) {
            continue;
        }
        let other_pos = match world.get::<&Position>(other.entity) {
            Ok(pos) => *pos,
            Err(_) => continue,
        };
        if my_rect.intersects(&Rect::bullet(other_pos, other.direction)) {
            return Some(other.entity);
        }
    }
    None
}

/// Bullet versus tank. The shooter never hits itself; tanks already at
/// zero health this tick are excluded, which makes the destruction path
/// idempotent. A protected tank consumes the bullet without damage.
#[allow(clippy::too_many_arguments)]
fn resolve_tank_hit(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    score: &mut ScoreState,
    progress: &mut LevelProgress,
    powerup_chance_on_kill: f64,
    player_spawn: Position,
    bullet: &BulletInfo,
    bullet_pos: Position,
    rect: &Rect,
    audio: &mut Vec<AudioCue>,
    despawn_buffer: &mut Vec<Entity>,
) -> bool {
    let targets: Vec<(Entity, Position)> = {
        let mut query = world.query::<(&Position, &Tank)>();
        query
            .iter()
            .filter(|(_, (_, tank))| tank.health > 0 && tank.id != bullet.owner_id)
            .map(|(entity, (pos, _))| (entity, *pos))
            .collect()
    };

    for (entity, tank_pos) in targets {
        if !rect.intersects(&Rect::tank(tank_pos)) {
            continue;
        }

        let protected = world
            .get::<&StatusEffects>(entity)
            .map(|s| s.shield_ticks > 0 || s.invincible_ticks > 0 || s.spawn_shield_ticks > 0)
            .unwrap_or(false);
        if protected {
            world_setup::spawn_explosion(world, bullet_pos, ExplosionSize::Small, audio);
            return true;
        }

        let (destroyed, kind) = match world.get::<&mut Tank>(entity) {
            Ok(mut tank) => {
                tank.health -= 1;
                (tank.health == 0, tank.kind)
            }
            Err(_) => continue,
        };

        if destroyed {
            world_setup::spawn_explosion(world, bullet_pos, ExplosionSize::Large, audio);
            if kind.is_enemy() {
                progress.destroyed += 1;
                if bullet.from_player {
                    score.score += profile(kind).points;
                }
                if rng.gen_bool(powerup_chance_on_kill.clamp(0.0, 1.0)) {
                    world_setup::spawn_powerup(world, rng, tank_pos);
                }
                despawn_buffer.push(entity);
            } else {
                score.lives = score.lives.saturating_sub(1);
                if score.lives > 0 {
                    world_setup::respawn_player(world, entity, player_spawn);
                } else {
                    despawn_buffer.push(entity);
                }
            }
        } else {
            world_setup::spawn_explosion(world, bullet_pos, ExplosionSize::Small, audio);
        }
        return true;
    }
    false
}
