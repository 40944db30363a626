//! Collision resolution: reconciles enemy projectiles against blasts and the
//! ground once per update.
//!
//! Resolution is read-only. It reports what happened and the damage system
//! applies it.

use hecs::World;

use skyguard_core::components::{Blast, City, LaunchSite, Projectile};
use skyguard_core::constants::HIT_RADIUS;
use skyguard_core::enums::HitKind;
use skyguard_core::types::Position;

use crate::world_setup;

/// A projectile that reached the ground this update.
#[derive(Debug, Clone, PartialEq)]
pub struct Impact {
    pub projectile_id: u32,
    pub position: Position,
    /// Ground asset struck, if any was within `HIT_RADIUS`.
    pub hit: Option<HitKind>,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionResult {
    /// Every projectile to remove, in resolution order.
    pub destroyed_projectiles: Vec<u32>,
    /// Ground impacts, in resolution order.
    pub impacts: Vec<Impact>,
}

impl CollisionResult {
    pub fn is_empty(&self) -> bool {
        self.destroyed_projectiles.is_empty()
    }

    pub fn hit_cities(&self) -> impl Iterator<Item = u32> + '_ {
        self.impacts.iter().filter_map(|impact| match impact.hit {
            Some(HitKind::City(id)) => Some(id),
            _ => None,
        })
    }

    pub fn hit_launch_sites(&self) -> impl Iterator<Item = u32> + '_ {
        self.impacts.iter().filter_map(|impact| match impact.hit {
            Some(HitKind::LaunchSite(id)) => Some(id),
            _ => None,
        })
    }
}

/// Gather every entity family from the world in id order and resolve.
pub fn run(world: &World) -> CollisionResult {
    let mut projectiles: Vec<Projectile> = world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| *p)
        .collect();
    projectiles.sort_by_key(|p| p.id());

    let mut blasts: Vec<Blast> = world.query::<&Blast>().iter().map(|(_, b)| *b).collect();
    blasts.sort_by_key(|b| b.id());

    let cities = world_setup::cities_by_id(world);
    let launch_sites = world_setup::launch_sites_by_id(world);

    resolve(&projectiles, &blasts, &cities, &launch_sites)
}

/// Resolve projectiles in the order given.
///
/// A projectile inside any blast is destroyed and never considered for ground
/// impact in the same pass. A landed projectile is always destroyed, hit or
/// miss.
pub fn resolve(
    projectiles: &[Projectile],
    blasts: &[Blast],
    cities: &[City],
    launch_sites: &[LaunchSite],
) -> CollisionResult {
    let mut result = CollisionResult::default();

    for projectile in projectiles.iter().filter(|p| p.is_alive()) {
        let position = projectile.position();

        if blasts.iter().any(|b| b.contains_point(&position)) {
            result.destroyed_projectiles.push(projectile.id());
            continue;
        }

        if projectile.has_landed() {
            result.impacts.push(Impact {
                projectile_id: projectile.id(),
                position,
                hit: find_hit_target(position.x, cities, launch_sites),
            });
            result.destroyed_projectiles.push(projectile.id());
        }
    }

    result
}

/// First alive city, then first alive launch site, within `HIT_RADIUS` of the
/// impact along x. List order wins over proximity.
pub fn find_hit_target(
    impact_x: f64,
    cities: &[City],
    launch_sites: &[LaunchSite],
) -> Option<HitKind> {
    let in_range = |x: f64| (x - impact_x).abs() <= HIT_RADIUS;

    cities
        .iter()
        .find(|c| c.is_alive() && in_range(c.x()))
        .map(|c| HitKind::City(c.id()))
        .or_else(|| {
            launch_sites
                .iter()
                .find(|s| s.is_alive() && in_range(s.x()))
                .map(|s| HitKind::LaunchSite(s.id()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyguard_core::constants::*;

    fn default_cities() -> Vec<City> {
        CITY_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &x)| City::new(i as u32, x))
            .collect()
    }

    fn default_sites() -> Vec<LaunchSite> {
        LAUNCH_SITE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &x)| LaunchSite::new(i as u32, x, LAUNCH_SITE_MAX_AMMO))
            .collect()
    }

    fn landed_at(id: u32, x: f64) -> Projectile {
        let spot = Position::new(x, GROUND_Y);
        Projectile::new(id, spot, spot, INITIAL_PROJECTILE_SPEED)
    }

    fn full_blast(id: u32, center: Position) -> Blast {
        let mut blast = Blast::new(id, center, BLAST_MAX_RADIUS);
        blast.advance(BLAST_EXPAND_SECS);
        blast
    }

    #[test]
    fn test_blast_takes_precedence_over_ground_impact() {
        let projectiles = vec![landed_at(0, 40.0)];
        let blasts = vec![full_blast(0, Position::new(40.0, GROUND_Y - 10.0))];
        let result = resolve(&projectiles, &blasts, &default_cities(), &default_sites());

        assert_eq!(result.destroyed_projectiles, vec![0]);
        assert!(result.impacts.is_empty(), "contained projectile must not impact");
        assert_eq!(result.hit_cities().count(), 0);
    }

    #[test]
    fn test_ground_impact_hits_city() {
        let result = resolve(&[landed_at(5, 50.0)], &[], &default_cities(), &default_sites());
        assert_eq!(result.destroyed_projectiles, vec![5]);
        assert_eq!(result.hit_cities().collect::<Vec<_>>(), vec![0]);
        assert_eq!(result.hit_launch_sites().count(), 0);
    }

    #[test]
    fn test_first_within_radius_not_nearest() {
        // Launch site 0 (x=80) is nearer to x=95 than city 1 (x=120),
        // but cities are scanned first.
        let hit = find_hit_target(95.0, &default_cities(), &default_sites());
        assert_eq!(hit, Some(HitKind::City(1)));
    }

    #[test]
    fn test_dead_city_falls_through_to_launch_site() {
        let mut cities = default_cities();
        cities[1].destroy();
        let hit = find_hit_target(95.0, &cities, &default_sites());
        assert_eq!(hit, Some(HitKind::LaunchSite(0)));
    }

    #[test]
    fn test_hit_radius_is_inclusive() {
        let hit = find_hit_target(40.0 + HIT_RADIUS, &default_cities(), &[]);
        assert_eq!(hit, Some(HitKind::City(0)));
    }

    #[test]
    fn test_miss_still_destroys_projectile() {
        // x=260 is 60 from city 2 and from launch site 1.
        let result = resolve(&[landed_at(9, 260.0)], &[], &default_cities(), &default_sites());
        assert_eq!(result.destroyed_projectiles, vec![9]);
        assert_eq!(result.impacts.len(), 1);
        assert_eq!(result.impacts[0].hit, None);
    }

    #[test]
    fn test_airborne_and_dead_projectiles_are_ignored() {
        let airborne = Projectile::new(
            0,
            Position::new(100.0, 100.0),
            Position::new(100.0, GROUND_Y),
            INITIAL_PROJECTILE_SPEED,
        );
        let mut dead = landed_at(1, 40.0);
        dead.destroy();

        let result = resolve(&[airborne, dead], &[], &default_cities(), &default_sites());
        assert!(result.is_empty());
        assert!(result.impacts.is_empty());
    }

    #[test]
    fn test_multiple_projectiles_keep_order() {
        let projectiles = vec![landed_at(2, 320.0), landed_at(3, 300.0), landed_at(4, 480.0)];
        let blasts = vec![full_blast(0, Position::new(300.0, GROUND_Y))];
        let result = resolve(&projectiles, &blasts, &default_cities(), &default_sites());

        // 320 is 20 from the blast center, 300 is the center.
        assert_eq!(result.destroyed_projectiles, vec![2, 3, 4]);
        assert_eq!(result.impacts.len(), 1);
        assert_eq!(result.impacts[0].hit, Some(HitKind::City(4)));
    }

    #[test]
    fn test_run_does_not_mutate_world() {
        let mut world = World::new();
        world_setup::setup_defenses(&mut world);
        world_setup::spawn_projectile(&mut world, landed_at(0, 40.0));

        let first = run(&world);
        let second = run(&world);
        assert_eq!(first, second);
        assert_eq!(first.hit_cities().collect::<Vec<_>>(), vec![0]);

        let still_alive = world.query::<&Projectile>().iter().all(|(_, p)| p.is_alive());
        assert!(still_alive);
        let cities_alive = world.query::<&City>().iter().all(|(_, c)| c.is_alive());
        assert!(cities_alive);
    }
}
