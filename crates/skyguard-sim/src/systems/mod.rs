//! ECS systems that operate on the simulation world each update.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or the engine.

pub mod blast;
pub mod cleanup;
pub mod collision;
pub mod damage;
pub mod detonation;
pub mod effects;
pub mod kinematics;
pub mod scoring;
pub mod snapshot;
pub mod wave_spawner;
