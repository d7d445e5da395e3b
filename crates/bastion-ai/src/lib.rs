//! Enemy AI for BASTION.
//!
//! Pure decision helpers for the per-enemy state machine — target
//! selection, direction candidates, dwell rolls — plus kind-driven
//! tank profiles. No ECS dependency; operates on plain data.

pub mod fsm;
pub mod profiles;

pub use bastion_core as core;
