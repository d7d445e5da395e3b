//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` plus whatever engine
//! state they need. They run in the fixed order dictated by
//! `SimulationEngine::run_systems`; reordering breaks the
//! terrain-before-tank bullet priority and spawn bookkeeping.

pub mod combat;
pub mod enemy_ai;
pub mod lifetimes;
pub mod movement;
pub mod player_input;
pub mod powerups;
pub mod snapshot;
pub mod spawner;
