//! Game state snapshot — the complete visible state handed to the render
//! collaborator each tick. Read-only; building it never mutates the world.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioCue;
use crate::types::{Position, SimTime};

/// Complete per-tick view of the simulation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub terrain: TerrainView,
    pub tanks: Vec<TankView>,
    pub bullets: Vec<BulletView>,
    pub power_ups: Vec<PowerUpView>,
    pub explosions: Vec<ExplosionView>,
    pub hud: HudView,
    pub audio_cues: Vec<AudioCue>,
}

/// The tile grid for drawing. Row-major, `tiles.len() == width * height`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerrainView {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
}

/// A live tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub id: u32,
    pub kind: TankKind,
    pub position: Position,
    pub facing: Direction,
    pub health: u32,
    pub shielded: bool,
    pub invulnerable: bool,
    pub frozen: bool,
}

/// A bullet in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub direction: Direction,
}

/// An uncollected power-up. `visible` carries the expiry blink state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpView {
    pub position: Position,
    pub kind: PowerUpKind,
    pub visible: bool,
}

/// A running explosion animation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionView {
    pub position: Position,
    pub size: ExplosionSize,
    pub frame: u32,
}

/// Scalar HUD values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Quota minus destroyed: not-yet-spawned plus on-field enemies.
    pub enemies_remaining: u32,
}
