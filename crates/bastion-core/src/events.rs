//! Events emitted by the simulation for the audio collaborator.
//!
//! Fire-and-forget cue triggers; the core has no dependency on whether
//! or how they are rendered as sound.

use serde::{Deserialize, Serialize};

use crate::enums::PowerUpKind;

/// Audio cues, drained into each tick's snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioCue {
    /// A new level began.
    GameStart,
    /// A tank fired.
    Shoot,
    /// Any explosion spawned.
    Explosion,
    /// A bullet struck a brick cell.
    BrickHit,
    /// A bullet struck a steel cell.
    SteelHit,
    /// The player collected a power-up.
    PowerUp { kind: PowerUpKind },
    /// The base was destroyed.
    BaseDestroyed,
    /// Terminal loss.
    GameOver,
    /// Quota cleared, field empty.
    LevelComplete,
}
