//! Entity spawn factories for setting up the simulation world.
//!
//! Creates the fixed ground defenses and the transient entities (projectiles,
//! interceptors, blasts, debris) with their component bundles.

use std::f64::consts::PI;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::components::*;
use skyguard_core::constants::*;
use skyguard_core::types::{Position, Velocity};

/// Spawn the six cities and three launch sites at their fixed positions.
/// Ids follow left-to-right list order.
pub fn setup_defenses(world: &mut World) {
    for (i, &x) in CITY_POSITIONS.iter().enumerate() {
        world.spawn((City::new(i as u32, x),));
    }
    for (i, &x) in LAUNCH_SITE_POSITIONS.iter().enumerate() {
        world.spawn((LaunchSite::new(i as u32, x, LAUNCH_SITE_MAX_AMMO),));
    }
}

/// Put a generated projectile into flight.
pub fn spawn_projectile(world: &mut World, projectile: Projectile) -> Entity {
    world.spawn((projectile,))
}

/// Launch an interceptor from the base of a launch site.
pub fn spawn_counter_projectile(
    world: &mut World,
    id: u32,
    site_id: u32,
    site_x: f64,
    target: Position,
) -> Entity {
    let start = Position::new(site_x, GROUND_Y);
    world.spawn((CounterProjectile::new(
        id,
        site_id,
        start,
        target,
        COUNTER_PROJECTILE_SPEED,
    ),))
}

pub fn spawn_blast(world: &mut World, id: u32, center: Position, max_radius: f64) -> Entity {
    world.spawn((Blast::new(id, center, max_radius),))
}

/// Throw up a burst of debris above a destroyed city.
/// Particles fan out over the upper half-plane with random speed and life.
pub fn spawn_debris_burst(world: &mut World, rng: &mut ChaCha8Rng, x: f64) {
    let origin = Position::new(x, GROUND_Y - DEBRIS_ORIGIN_OFFSET);

    for _ in 0..DEBRIS_COUNT {
        let angle = rng.gen_range(0.0..PI);
        let speed = DEBRIS_MIN_SPEED + rng.gen::<f64>() * DEBRIS_SPEED_SPREAD;
        let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let life = DEBRIS_MIN_LIFE_SECS + rng.gen::<f64>() * DEBRIS_LIFE_SPREAD_SECS;
        let color = DEBRIS_PALETTE[rng.gen_range(0..DEBRIS_PALETTE.len())];
        let size = DEBRIS_MIN_SIZE + rng.gen::<f64>() * DEBRIS_SIZE_SPREAD;

        world.spawn((Debris {
            position: origin,
            // Negative y is up.
            velocity: Velocity::new(angle.cos() * speed * side, -angle.sin() * speed),
            life,
            max_life: life,
            color,
            size,
        },));
    }
}

/// Copies of every city, sorted by id.
pub fn cities_by_id(world: &World) -> Vec<City> {
    let mut cities: Vec<City> = world.query::<&City>().iter().map(|(_, c)| *c).collect();
    cities.sort_by_key(|c| c.id());
    cities
}

/// Copies of every launch site, sorted by id.
pub fn launch_sites_by_id(world: &World) -> Vec<LaunchSite> {
    let mut sites: Vec<LaunchSite> = world
        .query::<&LaunchSite>()
        .iter()
        .map(|(_, s)| *s)
        .collect();
    sites.sort_by_key(|s| s.id());
    sites
}
