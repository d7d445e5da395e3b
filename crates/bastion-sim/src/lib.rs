//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameSnapshots for the render collaborator.

pub mod engine;
pub mod progress;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
