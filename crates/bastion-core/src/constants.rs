//! Simulation constants and tuning parameters.
//!
//! All durations are integer tick counts at the fixed tick rate, so the
//! simulation is deterministic and testable without a real clock.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World geometry ---

/// Side length of one grid cell in world pixels.
pub const TILE_SIZE: f64 = 32.0;

/// Default grid dimensions for generated levels (640x480 world pixels).
pub const DEFAULT_GRID_WIDTH: i32 = 20;
pub const DEFAULT_GRID_HEIGHT: i32 = 15;

// --- Terrain ---

/// Bullet hits required to crumble a fresh brick cell.
pub const BRICK_HITS: u8 = 4;

// --- Tanks ---

/// Starting player lives.
pub const PLAYER_LIVES: u32 = 3;

/// Maximum player upgrade level (Star power-up).
pub const PLAYER_UPGRADE_MAX: u8 = 4;

/// Reload at upgrade level 2+.
pub const UPGRADED_RELOAD_TICKS: u32 = 48;

/// Movement speed at upgrade level 4 (px/tick).
pub const UPGRADED_SPEED: f64 = 3.0;

/// At most this many bullets from one tank may be in flight at once.
pub const MAX_LIVE_BULLETS_PER_TANK: usize = 2;

// --- Bullets ---

/// Bullet travel speed (px/tick).
pub const BULLET_SPEED: f64 = 4.0;

// --- Status effect durations (ticks) ---

/// Shield power-up duration.
pub const SHIELD_DURATION_TICKS: u32 = 600;

/// Helmet invincibility duration.
pub const INVINCIBLE_DURATION_TICKS: u32 = 600;

/// Post-respawn grace period.
pub const SPAWN_PROTECTION_TICKS: u32 = 180;

/// Game-wide enemy freeze duration.
pub const FREEZE_DURATION_TICKS: u32 = 600;

// --- Power-ups ---

/// Uncollected power-ups expire after this many ticks.
pub const POWERUP_LIFETIME_TICKS: u32 = 600;

/// Blink during the final stretch of the lifetime.
pub const POWERUP_BLINK_WINDOW_TICKS: u32 = 180;

/// Visibility toggles every this many ticks while blinking.
pub const POWERUP_BLINK_INTERVAL_TICKS: u32 = 10;

/// Bonus points for collecting any power-up.
pub const POWERUP_PICKUP_POINTS: u64 = 500;

/// Points per enemy destroyed by the Grenade power-up.
pub const GRENADE_POINTS_PER_KILL: u64 = 100;

/// Default drop chance when an enemy is destroyed.
pub const POWERUP_CHANCE_ON_KILL: f64 = 0.30;

/// Default drop chance when a brick cell crumbles.
pub const POWERUP_CHANCE_ON_BRICK: f64 = 0.20;

// --- Explosions ---

/// Animation frame count.
pub const EXPLOSION_FRAMES: u32 = 5;

/// Ticks per animation frame.
pub const EXPLOSION_FRAME_TICKS: u32 = 5;

// --- Wave spawning ---

/// Ticks between enemy spawn attempts.
pub const ENEMY_SPAWN_INTERVAL_TICKS: u32 = 180;

/// Concurrency cap: maximum simultaneously-live enemies.
pub const MAX_LIVE_ENEMIES: u32 = 4;

/// Default spawn quota per level.
pub const DEFAULT_ENEMY_QUOTA: u32 = 20;

/// Default spawn weights for Basic/Fast/Power/Armor.
pub const DEFAULT_KIND_WEIGHTS: [f64; 4] = [0.50, 0.30, 0.15, 0.05];

// --- Enemy AI ---

/// Wandering dwell bounds (ticks) before retargeting.
pub const WANDER_DWELL_MIN_TICKS: u32 = 30;
pub const WANDER_DWELL_MAX_TICKS: u32 = 180;

/// Probability the retarget aims at the player rather than the base.
pub const TARGET_PLAYER_CHANCE: f64 = 0.70;

/// Per-tick fire attempt probability.
pub const ENEMY_FIRE_CHANCE: f64 = 0.02;
