//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for `start`.
    #[default]
    Menu,
    /// A wave is in progress.
    Playing,
    /// Playing, frozen by the player.
    Paused,
    /// Wave cleared; waiting for `continue_to_next_wave`.
    WaveEnd,
    /// Every city is gone. Terminal until reset.
    GameOver,
}

/// Blast lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlastPhase {
    #[default]
    Expanding,
    Lingering,
    Fading,
}

/// What a ground impact struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id")]
pub enum HitKind {
    City(u32),
    LaunchSite(u32),
}
