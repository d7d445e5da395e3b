//! Player commands sent from the input collaborator to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// Directional and fire intents, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Movement intent, or None when no direction is held.
    pub direction: Option<Direction>,
    /// Fire intent.
    pub fire: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the sampled input intents for subsequent ticks.
    SetInput { direction: Option<Direction>, fire: bool },
    /// Start (or restart) the given level.
    StartLevel { number: u32 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Return to the menu from a terminal phase.
    ReturnToMenu,
}
