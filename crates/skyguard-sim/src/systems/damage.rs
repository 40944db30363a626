//! Damage system: applies a collision result to the world.
//!
//! Awards interception points, retires destroyed projectiles, knocks out
//! struck cities (with debris) and launch sites.

use std::collections::HashMap;

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use skyguard_core::components::{Blast, City, LaunchSite, Projectile};
use skyguard_core::constants::SCORE_PROJECTILE_KILL;
use skyguard_core::events::GameEvent;

use crate::systems::collision::CollisionResult;
use crate::world_setup;

/// Apply `result` and return the points earned.
pub fn apply(
    world: &mut World,
    result: &CollisionResult,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) -> u64 {
    if result.is_empty() {
        return 0;
    }

    let blasts: Vec<Blast> = world.query::<&Blast>().iter().map(|(_, b)| *b).collect();
    let mut points = 0;

    // Projectiles
    let lookup: HashMap<u32, hecs::Entity> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, p)| (p.id(), entity))
        .collect();

    for id in &result.destroyed_projectiles {
        let Some(&entity) = lookup.get(id) else {
            continue;
        };
        let Ok(mut projectile) = world.get::<&mut Projectile>(entity) else {
            continue;
        };
        if !projectile.is_alive() {
            continue;
        }

        let position = projectile.position();
        if blasts.iter().any(|b| b.contains_point(&position)) {
            points += SCORE_PROJECTILE_KILL;
            events.push(GameEvent::ProjectileIntercepted {
                projectile_id: *id,
                position,
            });
        }
        projectile.destroy();
    }

    for impact in &result.impacts {
        debug!(
            projectile_id = impact.projectile_id,
            x = impact.position.x,
            hit = ?impact.hit,
            "ground impact"
        );
        events.push(GameEvent::GroundImpact {
            projectile_id: impact.projectile_id,
            position: impact.position,
            hit: impact.hit,
        });
    }

    // Cities
    let hit_cities: Vec<u32> = result.hit_cities().collect();
    let mut debris_sites = Vec::new();
    for (_entity, city) in world.query_mut::<&mut City>() {
        if !hit_cities.contains(&city.id()) {
            continue;
        }
        city.destroy();
        if city.take_destroyed_event() {
            debris_sites.push((city.id(), city.x()));
        }
    }
    debris_sites.sort_by_key(|(id, _)| *id);
    for (city_id, x) in debris_sites {
        world_setup::spawn_debris_burst(world, rng, x);
        events.push(GameEvent::CityDestroyed { city_id });
    }

    // Launch sites
    let hit_sites: Vec<u32> = result.hit_launch_sites().collect();
    let mut destroyed_sites = Vec::new();
    for (_entity, site) in world.query_mut::<&mut LaunchSite>() {
        if site.is_alive() && hit_sites.contains(&site.id()) {
            site.destroy();
            destroyed_sites.push(site.id());
        }
    }
    destroyed_sites.sort_unstable();
    events.extend(
        destroyed_sites
            .into_iter()
            .map(|site_id| GameEvent::LaunchSiteDestroyed { site_id }),
    );

    points
}
