//! Player commands sent from the frontend to the simulation.
//!
//! Commands that do not apply in the current phase are ignored.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Game flow ---
    /// Leave the menu and begin wave 1.
    Start,
    /// Return to the menu with a fresh field.
    Reset,
    /// Begin the next wave from the wave-end screen.
    ContinueToNextWave,
    Pause,
    Resume,

    // --- Defense ---
    /// Launch a counter-projectile toward a point above the ground.
    FireAt { x: f64, y: f64 },
}
