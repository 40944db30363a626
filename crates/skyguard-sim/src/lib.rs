//! Simulation engine for SKYGUARD.
//!
//! Owns the hecs ECS world, runs the per-update system pipeline,
//! and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skyguard_core as core;
