//! Fundamental geometric and simulation types.
//!
//! Screen-space convention: x grows rightward, y grows downward. The top of
//! the playfield is y = 0 and the ground sits at `GROUND_Y`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position on the playfield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity (units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of `update` steps taken while playing.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        DVec2::from(*self).distance(DVec2::from(*other))
    }

    /// Distance along the x axis only.
    pub fn horizontal_distance_to(&self, other: &Position) -> f64 {
        (other.x - self.x).abs()
    }
}

impl From<Position> for DVec2 {
    fn from(p: Position) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Position::new(v.x, v.y)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        DVec2::new(self.x, self.y).length()
    }
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Move `position` toward `target` by at most `speed * dt`.
///
/// Snaps exactly onto the target when the remaining distance fits inside the
/// step, so repeated calls never overshoot or jitter. Returns `true` when the
/// position is on the target after the step.
pub fn step_toward(position: &mut Position, target: Position, speed: f64, dt: f64) -> bool {
    let to_target = DVec2::from(target) - DVec2::from(*position);
    let remaining = to_target.length();
    let step = speed * dt;

    if remaining <= step {
        *position = target;
        true
    } else {
        *position = (DVec2::from(*position) + to_target / remaining * step).into();
        false
    }
}

/// Fraction of the start→target segment covered by `position`, in [0, 1].
/// A zero-length segment counts as complete.
pub fn segment_progress(start: Position, target: Position, position: Position) -> f64 {
    let total = start.range_to(&target);
    if total > 0.0 {
        (start.range_to(&position) / total).min(1.0)
    } else {
        1.0
    }
}
