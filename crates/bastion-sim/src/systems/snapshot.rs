//! Snapshot system: queries the ECS world and builds a complete
//! GameSnapshot for the render collaborator.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use bastion_core::components::*;
use bastion_core::constants::{POWERUP_BLINK_INTERVAL_TICKS, POWERUP_BLINK_WINDOW_TICKS};
use bastion_core::enums::{AiState, GamePhase};
use bastion_core::events::AudioCue;
use bastion_core::state::*;
use bastion_core::types::{Position, SimTime};
use bastion_terrain::TileGrid;

use crate::progress::{LevelProgress, ScoreState};

/// Build a complete GameSnapshot from the current world state.
#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    grid: &TileGrid,
    time: &SimTime,
    phase: GamePhase,
    level_number: u32,
    score: &ScoreState,
    progress: &LevelProgress,
    audio_cues: Vec<AudioCue>,
) -> GameSnapshot {
    GameSnapshot {
        time: *time,
        phase,
        terrain: build_terrain(grid),
        tanks: build_tanks(world),
        bullets: build_bullets(world),
        power_ups: build_power_ups(world),
        explosions: build_explosions(world),
        hud: HudView {
            score: score.score,
            lives: score.lives,
            level: level_number,
            enemies_remaining: progress.quota.saturating_sub(progress.destroyed),
        },
        audio_cues,
    }
}

fn build_terrain(grid: &TileGrid) -> TerrainView {
    let mut tiles = Vec::with_capacity((grid.width() * grid.height()).max(0) as usize);
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            tiles.push(grid.tile_at(col, row));
        }
    }
    TerrainView {
        width: grid.width(),
        height: grid.height(),
        tiles,
    }
}

fn build_tanks(world: &World) -> Vec<TankView> {
    let mut tanks: Vec<TankView> = world
        .query::<(&Position, &Tank, &StatusEffects, Option<&AiController>)>()
        .iter()
        .filter(|(_, (_, tank, _, _))| tank.health > 0)
        .map(|(_, (pos, tank, status, ai))| TankView {
            id: tank.id,
            kind: tank.kind,
            position: *pos,
            facing: tank.facing,
            health: tank.health,
            shielded: status.shield_ticks > 0 || status.spawn_shield_ticks > 0,
            invulnerable: status.invincible_ticks > 0,
            frozen: ai.map(|ai| ai.state == AiState::Frozen).unwrap_or(false),
        })
        .collect();

    tanks.sort_by_key(|t| t.id);
    tanks
}

fn build_bullets(world: &World) -> Vec<BulletView> {
    world
        .query::<(&Position, &Bullet)>()
        .iter()
        .map(|(_, (pos, bullet))| BulletView {
            position: *pos,
            direction: bullet.direction,
        })
        .collect()
}

fn build_power_ups(world: &World) -> Vec<PowerUpView> {
    world
        .query::<(&Position, &PowerUp)>()
        .iter()
        .map(|(_, (pos, power_up))| PowerUpView {
            position: *pos,
            kind: power_up.kind,
            visible: blink_visible(power_up.ticks_remaining),
        })
        .collect()
}

/// Steady while plenty of lifetime remains; blinks through the final
/// stretch before expiry.
fn blink_visible(ticks_remaining: u32) -> bool {
    ticks_remaining > POWERUP_BLINK_WINDOW_TICKS
        || (ticks_remaining / POWERUP_BLINK_INTERVAL_TICKS) % 2 == 0
}

fn build_explosions(world: &World) -> Vec<ExplosionView> {
    world
        .query::<(&Position, &Explosion)>()
        .iter()
        .map(|(_, (pos, explosion))| ExplosionView {
            position: *pos,
            size: explosion.size,
            frame: explosion.frame,
        })
        .collect()
}
