//! Simulation engine for DARKWATER.
//!
//! Owns the hecs ECS world, runs the per-tick system ordering, and produces
//! `SimSnapshot`s for the renderer. Completely headless, enabling
//! deterministic testing.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use darkwater_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
