//! Run bookkeeping — score, lives, and the level's spawn ledger.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities, so the counters
//! survive entity churn (a destroyed player tank does not take the score
//! with it).

use bastion_core::constants::PLAYER_LIVES;

/// Player score and remaining lives for the current run.
#[derive(Debug, Clone)]
pub struct ScoreState {
    pub score: u64,
    pub lives: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: PLAYER_LIVES,
        }
    }
}

/// Wave director ledger for one level.
#[derive(Debug, Clone, Default)]
pub struct LevelProgress {
    /// Total enemies this level will ever produce.
    pub quota: u32,
    /// Enemies spawned so far.
    pub spawned: u32,
    /// Enemies destroyed so far (by any cause).
    pub destroyed: u32,
    /// Ticks accumulated toward the next spawn attempt.
    pub spawn_timer: u32,
}

impl LevelProgress {
    pub fn new(quota: u32) -> Self {
        Self {
            quota,
            ..Self::default()
        }
    }

    /// The level is won once the full quota is destroyed and the field
    /// is clear.
    pub fn is_complete(&self, live_enemies: u32) -> bool {
        self.destroyed >= self.quota && live_enemies == 0
    }
}
