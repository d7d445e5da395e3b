//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Tank body state, shared by the player and all enemy variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    /// Stable identifier for attribution (bullet ownership, views).
    /// Survives as a plain number even after the entity is despawned.
    pub id: u32,
    pub kind: TankKind,
    pub facing: Direction,
    /// Hits remaining. Zero means destroyed; never goes negative.
    pub health: u32,
    /// Movement speed (px/tick).
    pub speed: f64,
    /// Bullet power: 1 = normal, 2 = pierces steel.
    pub power: u8,
    /// Ticks between shots.
    pub reload_ticks: u32,
    /// Ticks until the next shot is allowed. Decrements once per tick.
    pub cooldown: u32,
}

/// Marks the player's tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerTag;

/// Player-only progression state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Star upgrade level, 1..=4. Affects reload, power, and speed.
    pub upgrade_level: u8,
}

/// Marks an AI-controlled enemy tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyTag;

/// Per-enemy AI bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiController {
    pub state: AiState,
    /// Wandering ticks remaining before the next retarget.
    pub dwell_ticks: u32,
}

/// Transient protection timers. A tank ignores bullet damage while any
/// counter is nonzero; the bullet is still consumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    pub shield_ticks: u32,
    pub invincible_ticks: u32,
    pub spawn_shield_ticks: u32,
}

/// A bullet in flight. The owner is referenced by tank id only, never by
/// a live handle — a destroyed owner degrades attribution to neutral.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub direction: Direction,
    /// Travel speed (px/tick).
    pub speed: f64,
    /// 1 = normal, 2 = destroys steel.
    pub power: u8,
    /// Tank id of the shooter, for self-hit exemption and magazine limits.
    pub owner_id: u32,
    /// Whether the shooter was the player at fire time (score attribution).
    pub from_player: bool,
}

/// A collectible power-up on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Ticks until self-expiry. Blinks near the end.
    pub ticks_remaining: u32,
}

/// Presentation-only explosion animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub size: ExplosionSize,
    pub frame: u32,
    /// Ticks accumulated toward the next frame.
    pub counter: u32,
}
