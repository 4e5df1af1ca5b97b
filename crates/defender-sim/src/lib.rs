//! Simulation engine for Maze Defender.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod components;
pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use defender_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
