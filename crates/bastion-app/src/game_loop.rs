//! Fixed-rate driver — runs the simulation engine at 60Hz.
//!
//! Drift-compensated pacing: each tick is scheduled against an absolute
//! deadline, and a loop that falls too far behind resets rather than
//! entering a catch-up spiral. With pacing disabled the loop free-runs
//! for tests and batch simulation.

use std::time::{Duration, Instant};

use bastion_core::constants::TICK_RATE;
use bastion_core::enums::GamePhase;
use bastion_core::events::AudioCue;
use bastion_core::state::GameSnapshot;
use bastion_sim::engine::SimulationEngine;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

pub struct RunOptions {
    /// Stop after this many ticks even if the level is still running.
    pub max_ticks: u64,
    /// Pace ticks against the wall clock; off = free-run.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_ticks: u64::MAX,
            realtime: true,
        }
    }
}

/// Drive the engine until the level ends or the tick budget runs out.
/// Returns the final snapshot.
pub fn run_until_terminal(engine: &mut SimulationEngine, options: &RunOptions) -> GameSnapshot {
    let mut next_tick_time = Instant::now();
    let mut ticks_run: u64 = 0;

    loop {
        let snapshot = engine.tick();
        ticks_run += 1;
        log_cues(&snapshot);

        if matches!(snapshot.phase, GamePhase::GameOver | GamePhase::LevelComplete)
            || ticks_run >= options.max_ticks
        {
            return snapshot;
        }

        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind — reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }
}

/// Forward the tick's audio cues to the log. Routine fire/explosion
/// chatter stays at debug; run-defining events get info.
fn log_cues(snapshot: &GameSnapshot) {
    for cue in &snapshot.audio_cues {
        match cue {
            AudioCue::GameStart => log::info!(
                "level {} started ({} enemies)",
                snapshot.hud.level,
                snapshot.hud.enemies_remaining
            ),
            AudioCue::PowerUp { kind } => log::info!("power-up collected: {kind:?}"),
            AudioCue::BaseDestroyed => log::info!("base destroyed"),
            AudioCue::GameOver => log::info!("game over at tick {}", snapshot.time.tick),
            AudioCue::LevelComplete => log::info!("level complete at tick {}", snapshot.time.tick),
            AudioCue::Shoot | AudioCue::Explosion | AudioCue::BrickHit | AudioCue::SteelHit => {
                log::debug!("cue: {cue:?}")
            }
        }
    }
}
