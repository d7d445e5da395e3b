//! Power-up pickup system.
//!
//! Resolves player-versus-power-up overlaps and applies each effect
//! exactly once at the moment of pickup. Duration effects only arm
//! counters here; the lifetime system winds them down.

use hecs::{Entity, World};

use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::{AiState, ExplosionSize, PowerUpKind};
use bastion_core::events::AudioCue;
use bastion_core::types::{Position, Rect};
use bastion_terrain::TileGrid;

use crate::progress::{LevelProgress, ScoreState};
use crate::world_setup;

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    grid: &mut TileGrid,
    score: &mut ScoreState,
    progress: &mut LevelProgress,
    freeze_ticks: &mut u32,
    audio: &mut Vec<AudioCue>,
) {
    let player = {
        let mut query = world.query::<(&PlayerTag, &Position)>();
        query
            .iter()
            .next()
            .map(|(entity, (_tag, pos))| (entity, Rect::tank(*pos)))
    };
    let Some((player_entity, player_rect)) = player else {
        return;
    };

    let collected: Vec<(Entity, PowerUpKind)> = {
        let mut query = world.query::<(&Position, &PowerUp)>();
        query
            .iter()
            .filter(|(_, (pos, _))| player_rect.intersects(&Rect::tank(**pos)))
            .map(|(entity, (_, power_up))| (entity, power_up.kind))
            .collect()
    };

    for (entity, kind) in collected {
        apply_effect(
            world,
            grid,
            kind,
            player_entity,
            score,
            progress,
            freeze_ticks,
            audio,
        );
        score.score += POWERUP_PICKUP_POINTS;
        audio.push(AudioCue::PowerUp { kind });
        let _ = world.despawn(entity);
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_effect(
    world: &mut World,
    grid: &mut TileGrid,
    kind: PowerUpKind,
    player: Entity,
    score: &mut ScoreState,
    progress: &mut LevelProgress,
    freeze_ticks: &mut u32,
    audio: &mut Vec<AudioCue>,
) {
    match kind {
        PowerUpKind::Shield => {
            if let Ok(mut status) = world.get::<&mut StatusEffects>(player) {
                status.shield_ticks = SHIELD_DURATION_TICKS;
            }
        }
        PowerUpKind::Helmet => {
            if let Ok(mut status) = world.get::<&mut StatusEffects>(player) {
                status.invincible_ticks = INVINCIBLE_DURATION_TICKS;
            }
        }
        PowerUpKind::Freeze => {
            *freeze_ticks = FREEZE_DURATION_TICKS;
            for (_entity, (_tag, ai)) in world.query_mut::<(&EnemyTag, &mut AiController)>() {
                ai.state = AiState::Frozen;
            }
        }
        PowerUpKind::ExtraLife => {
            score.lives += 1;
        }
        PowerUpKind::Grenade => {
            // Wipe the field. Counts toward the quota, but awards flat
            // points rather than kind values.
            let victims: Vec<(Entity, Position)> = {
                let mut query = world.query::<(&EnemyTag, &Position, &Tank)>();
                query
                    .iter()
                    .filter(|(_, (_, _, tank))| tank.health > 0)
                    .map(|(entity, (_, pos, _))| (entity, *pos))
                    .collect()
            };
            for (entity, pos) in victims {
                let center = Position::new(pos.x + TILE_SIZE / 2.0, pos.y + TILE_SIZE / 2.0);
                world_setup::spawn_explosion(world, center, ExplosionSize::Large, audio);
                score.score += GRENADE_POINTS_PER_KILL;
                progress.destroyed += 1;
                let _ = world.despawn(entity);
            }
        }
        PowerUpKind::Clock => {
            // Collected for the points; no timed bonus is modeled.
        }
        PowerUpKind::Shovel => {
            grid.upgrade_walls_around_base();
        }
        PowerUpKind::Star => {
            let level = match world.get::<&mut PlayerState>(player) {
                Ok(mut state) => {
                    state.upgrade_level = (state.upgrade_level + 1).min(PLAYER_UPGRADE_MAX);
                    state.upgrade_level
                }
                Err(_) => return,
            };
            if let Ok(mut tank) = world.get::<&mut Tank>(player) {
                if level >= 2 {
                    tank.reload_ticks = UPGRADED_RELOAD_TICKS;
                }
                if level >= 3 {
                    tank.power = 2;
                }
                if level >= 4 {
                    tank.speed = UPGRADED_SPEED;
                }
            }
        }
    }
}
