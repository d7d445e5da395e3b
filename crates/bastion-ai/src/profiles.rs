//! Kind-specific tank parameters.
//!
//! Consolidates the per-variant numbers in one table so spawn code and
//! combat scoring read from the same source.

use bastion_core::constants::ENEMY_FIRE_CHANCE;
use bastion_core::enums::TankKind;

/// Parameter set for one tank kind.
pub struct TankProfile {
    /// Movement speed (px/tick).
    pub speed: f64,
    /// Hits to destroy.
    pub health: u32,
    /// Ticks between shots.
    pub reload_ticks: u32,
    /// Bullet power: 1 = normal, 2 = pierces steel.
    pub power: u8,
    /// Points awarded to the player for destroying this kind.
    pub points: u64,
    /// Per-tick fire attempt probability (enemies only).
    pub fire_chance: f64,
}

/// Get the profile for a tank kind.
pub fn profile(kind: TankKind) -> TankProfile {
    match kind {
        TankKind::Player => TankProfile {
            speed: 2.0,
            health: 1,
            reload_ticks: 60,
            power: 1,
            points: 0,
            fire_chance: 0.0,
        },
        TankKind::Basic => TankProfile {
            speed: 1.0,
            health: 1,
            reload_ticks: 120,
            power: 1,
            points: 100,
            fire_chance: ENEMY_FIRE_CHANCE,
        },
        TankKind::Fast => TankProfile {
            speed: 1.5,
            health: 1,
            reload_ticks: 90,
            power: 1,
            points: 200,
            fire_chance: ENEMY_FIRE_CHANCE,
        },
        TankKind::Power => TankProfile {
            speed: 0.8,
            health: 1,
            reload_ticks: 72,
            power: 2,
            points: 300,
            fire_chance: ENEMY_FIRE_CHANCE,
        },
        TankKind::Armor => TankProfile {
            speed: 0.7,
            health: 4,
            reload_ticks: 120,
            power: 1,
            points: 400,
            fire_chance: ENEMY_FIRE_CHANCE,
        },
    }
}
