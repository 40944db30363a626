//! Game state snapshot: the complete visible state handed to the frontend
//! after each update.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete game state. Every entity list is sorted by ascending id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u64,
    pub wave: u32,
    /// Projectiles of the current wave not yet released.
    pub pending_spawns: usize,
    pub projectiles: Vec<ProjectileView>,
    pub counter_projectiles: Vec<CounterProjectileView>,
    pub blasts: Vec<BlastView>,
    pub cities: Vec<CityView>,
    pub launch_sites: Vec<LaunchSiteView>,
    pub debris: Vec<DebrisView>,
    pub events: Vec<GameEvent>,
}

/// An enemy projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub start: Position,
    pub position: Position,
    pub target: Position,
    /// Fraction of the flight covered (0.0 - 1.0).
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterProjectileView {
    pub id: u32,
    pub site_id: u32,
    pub start: Position,
    pub position: Position,
    pub target: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlastView {
    pub id: u32,
    pub center: Position,
    pub radius: f64,
    pub phase: BlastPhase,
    /// Opacity (0.0 - 1.0), drops only while fading.
    pub alpha: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityView {
    pub id: u32,
    pub x: f64,
    pub alive: bool,
    /// Destruction flash intensity (0.0 - 1.0).
    pub flash_alpha: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchSiteView {
    pub id: u32,
    pub x: f64,
    pub alive: bool,
    pub ammo: u32,
    pub max_ammo: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebrisView {
    pub position: Position,
    pub color: [u8; 3],
    pub size: f64,
    pub alpha: f64,
}
