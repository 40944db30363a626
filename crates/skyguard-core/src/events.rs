//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::HitKind;
use crate::types::Position;

/// Gameplay cues, drained into the next snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new wave began releasing projectiles.
    WaveStarted {
        wave: u32,
        projectile_count: u32,
        projectile_speed: f64,
    },
    /// A launch site fired.
    InterceptorLaunched {
        counter_projectile_id: u32,
        site_id: u32,
        target: Position,
    },
    /// A counter-projectile detonated.
    BlastSpawned { blast_id: u32, center: Position },
    /// An enemy projectile was caught inside a blast.
    ProjectileIntercepted { projectile_id: u32, position: Position },
    /// An enemy projectile reached the ground.
    GroundImpact {
        projectile_id: u32,
        position: Position,
        hit: Option<HitKind>,
    },
    CityDestroyed { city_id: u32 },
    LaunchSiteDestroyed { site_id: u32 },
    /// A destroyed city came back through the score bonus.
    CityRevived { city_id: u32 },
    /// Every projectile of the wave is resolved.
    WaveComplete { wave: u32, bonus: u64 },
    GameOver { wave: u32, score: u64 },
}
