//! Entity components stored in the simulation world.
//!
//! Each component owns its per-entity state transitions (flight, blast
//! phases, ammo). Anything that involves more than one entity lives in the
//! simulation systems.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::BlastPhase;
use crate::types::{segment_progress, step_toward, Position, Velocity};

/// Enemy projectile descending toward a fixed ground target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    id: u32,
    start: Position,
    target: Position,
    speed: f64,
    position: Position,
    alive: bool,
}

impl Projectile {
    pub fn new(id: u32, start: Position, target: Position, speed: f64) -> Self {
        Self {
            id,
            start,
            target,
            speed,
            position: start,
            alive: true,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Fly toward the target. Destroyed projectiles stay where they died.
    pub fn advance(&mut self, dt: f64) {
        if !self.alive {
            return;
        }
        step_toward(&mut self.position, self.target, self.speed, dt);
    }

    /// Alive and at or below the ground line.
    pub fn has_landed(&self) -> bool {
        self.alive && self.position.y >= GROUND_Y
    }

    pub fn progress(&self) -> f64 {
        segment_progress(self.start, self.target, self.position)
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

/// Player interceptor flying to a clicked point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterProjectile {
    id: u32,
    site_id: u32,
    start: Position,
    target: Position,
    speed: f64,
    position: Position,
    arrived: bool,
}

impl CounterProjectile {
    pub fn new(id: u32, site_id: u32, start: Position, target: Position, speed: f64) -> Self {
        Self {
            id,
            site_id,
            start,
            target,
            speed,
            position: start,
            arrived: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Launch site that fired this interceptor.
    pub fn site_id(&self) -> u32 {
        self.site_id
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn has_arrived(&self) -> bool {
        self.arrived
    }

    pub fn advance(&mut self, dt: f64) {
        if self.arrived {
            return;
        }
        self.arrived = step_toward(&mut self.position, self.target, self.speed, dt);
    }

    pub fn progress(&self) -> f64 {
        segment_progress(self.start, self.target, self.position)
    }
}

/// Area-of-effect detonation: expands, lingers at full size, then fades out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blast {
    id: u32,
    center: Position,
    max_radius: f64,
    radius: f64,
    phase: BlastPhase,
    /// Seconds left in the current phase.
    timer: f64,
    alpha: f64,
}

impl Blast {
    pub fn new(id: u32, center: Position, max_radius: f64) -> Self {
        Self {
            id,
            center,
            max_radius,
            radius: 0.0,
            phase: BlastPhase::Expanding,
            timer: BLAST_EXPAND_SECS,
            alpha: 1.0,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn phase(&self) -> BlastPhase {
        self.phase
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Step the phase machine. Overshoot past a phase boundary is dropped;
    /// the next phase always starts with its full duration.
    pub fn advance(&mut self, dt: f64) {
        self.timer -= dt;

        match self.phase {
            BlastPhase::Expanding => {
                let t = 1.0 - self.timer / BLAST_EXPAND_SECS;
                self.radius = self.max_radius * t.min(1.0);
                if self.timer <= 0.0 {
                    self.phase = BlastPhase::Lingering;
                    self.timer = BLAST_LINGER_SECS;
                    self.radius = self.max_radius;
                }
            }
            BlastPhase::Lingering => {
                self.radius = self.max_radius;
                if self.timer <= 0.0 {
                    self.phase = BlastPhase::Fading;
                    self.timer = BLAST_FADE_SECS;
                }
            }
            BlastPhase::Fading => {
                let t = 1.0 - self.timer / BLAST_FADE_SECS;
                self.alpha = 1.0 - t.min(1.0);
                if self.timer <= 0.0 {
                    self.alpha = 0.0;
                }
            }
        }
    }

    /// Inclusive disc test. A zero radius still contains its own center.
    pub fn contains_point(&self, point: &Position) -> bool {
        self.center.range_to(point) <= self.radius
    }

    pub fn is_finished(&self) -> bool {
        self.phase == BlastPhase::Fading && self.timer <= 0.0
    }
}

/// Defended city on the ground line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    id: u32,
    x: f64,
    alive: bool,
    flash_timer: f64,
    destroyed_event: bool,
}

impl City {
    pub fn new(id: u32, x: f64) -> Self {
        Self {
            id,
            x,
            alive: true,
            flash_timer: 0.0,
            destroyed_event: false,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Knock the city out. Only the first hit of a life starts the flash and
    /// raises the destroyed event.
    pub fn destroy(&mut self) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.flash_timer = CITY_FLASH_SECS;
        self.destroyed_event = true;
    }

    /// Returns `true` once per destruction, then `false` until destroyed again.
    pub fn take_destroyed_event(&mut self) -> bool {
        std::mem::take(&mut self.destroyed_event)
    }

    /// Count down the destruction flash.
    pub fn advance(&mut self, dt: f64) {
        if self.flash_timer > 0.0 {
            self.flash_timer = (self.flash_timer - dt).max(0.0);
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_timer > 0.0
    }

    pub fn flash_alpha(&self) -> f64 {
        self.flash_timer / CITY_FLASH_SECS
    }

    /// Back to a standing city with no pending flash or event.
    pub fn reset(&mut self) {
        self.alive = true;
        self.flash_timer = 0.0;
        self.destroyed_event = false;
    }
}

/// Ammo-limited interceptor battery.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchSite {
    id: u32,
    x: f64,
    ammo: u32,
    max_ammo: u32,
    alive: bool,
}

impl LaunchSite {
    pub fn new(id: u32, x: f64, max_ammo: u32) -> Self {
        Self {
            id,
            x,
            ammo: max_ammo,
            max_ammo,
            alive: true,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn has_ammo(&self) -> bool {
        self.alive && self.ammo > 0
    }

    /// Spend one round. Returns `false` (and changes nothing) when the site
    /// is destroyed or empty.
    pub fn fire(&mut self) -> bool {
        if !self.has_ammo() {
            return false;
        }
        self.ammo -= 1;
        true
    }

    pub fn refill(&mut self) {
        self.ammo = self.max_ammo;
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }

    pub fn reset(&mut self) {
        self.alive = true;
        self.ammo = self.max_ammo;
    }
}

/// Visual-only particle thrown up by a destroyed city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Debris {
    pub position: Position,
    pub velocity: Velocity,
    pub life: f64,
    pub max_life: f64,
    pub color: [u8; 3],
    pub size: f64,
}

impl Debris {
    /// Integrate one step; gravity pulls toward the ground (positive y).
    pub fn advance(&mut self, dt: f64) {
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;
        self.velocity.y += DEBRIS_GRAVITY * dt;
        self.life -= dt;
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }

    pub fn alpha(&self) -> f64 {
        (self.life / self.max_life).max(0.0)
    }
}
