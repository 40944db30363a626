//! Wave spawning system: derives each wave's difficulty, generates its
//! projectiles, and releases them over the spawn window.

use std::collections::VecDeque;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::components::{City, LaunchSite, Projectile};
use skyguard_core::constants::*;
use skyguard_core::types::Position;

use crate::world_setup;

/// Difficulty parameters for one wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveDescriptor {
    pub number: u32,
    pub projectile_count: u32,
    pub projectile_speed: f64,
    /// Rounds each surviving launch site holds when the wave begins.
    pub launch_site_ammo: u32,
}

/// Linear scaling from wave 1, capped. Wave 0 is treated as wave 1.
pub fn generate_wave(number: u32) -> WaveDescriptor {
    let steps = number.saturating_sub(1);

    let projectile_count = INITIAL_PROJECTILE_COUNT
        .saturating_add(steps.saturating_mul(PROJECTILE_COUNT_INCREMENT))
        .min(MAX_PROJECTILE_COUNT);
    let projectile_speed = (INITIAL_PROJECTILE_SPEED
        + f64::from(steps) * PROJECTILE_SPEED_INCREMENT)
        .min(MAX_PROJECTILE_SPEED);

    WaveDescriptor {
        number,
        projectile_count,
        projectile_speed,
        launch_site_ammo: LAUNCH_SITE_MAX_AMMO,
    }
}

/// Generate a wave's projectiles aimed at the standing ground assets.
///
/// Targets are drawn uniformly with replacement from alive cities then alive
/// launch sites. With nothing left standing the batch is empty. Ids come from
/// `next_projectile_id`.
pub fn create_projectiles(
    wave: &WaveDescriptor,
    cities: &[City],
    launch_sites: &[LaunchSite],
    rng: &mut ChaCha8Rng,
    next_projectile_id: &mut u32,
) -> Vec<Projectile> {
    let targets: Vec<Position> = cities
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| c.x())
        .chain(launch_sites.iter().filter(|s| s.is_alive()).map(|s| s.x()))
        .map(|x| Position::new(x, GROUND_Y))
        .collect();

    if targets.is_empty() {
        return Vec::new();
    }

    (0..wave.projectile_count)
        .map(|_| {
            let target = targets[rng.gen_range(0..targets.len())];
            let start_x = SPAWN_EDGE_MARGIN + rng.gen::<f64>() * (FIELD_WIDTH - 2.0 * SPAWN_EDGE_MARGIN);
            let id = *next_projectile_id;
            *next_projectile_id += 1;
            Projectile::new(id, Position::new(start_x, 0.0), target, wave.projectile_speed)
        })
        .collect()
}

/// `count` evenly spaced release offsets covering `[0, duration]`.
pub fn spawn_times(count: usize, duration: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let interval = duration / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { duration } else { i as f64 * interval })
                .collect()
        }
    }
}

/// Projectiles of the current wave still waiting for their release offset.
#[derive(Debug, Clone, Default)]
pub struct PendingSpawns {
    queue: VecDeque<(f64, Projectile)>,
    elapsed_secs: f64,
}

impl PendingSpawns {
    /// Schedule a new batch, replacing anything still queued.
    /// `offsets` and `projectiles` pair up by index.
    pub fn schedule(&mut self, offsets: Vec<f64>, projectiles: Vec<Projectile>) {
        self.queue = offsets.into_iter().zip(projectiles).collect();
        self.elapsed_secs = 0.0;
    }

    /// Advance the wave clock and return every projectile now due, in order.
    pub fn release_due(&mut self, dt: f64) -> Vec<Projectile> {
        self.elapsed_secs += dt;
        let mut due = Vec::new();
        while let Some(&(offset, projectile)) = self.queue.front() {
            if offset > self.elapsed_secs {
                break;
            }
            self.queue.pop_front();
            due.push(projectile);
        }
        due
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
        self.elapsed_secs = 0.0;
    }
}

/// Release due projectiles into the world.
pub fn run(world: &mut World, pending: &mut PendingSpawns, dt: f64) {
    for projectile in pending.release_due(dt) {
        world_setup::spawn_projectile(world, projectile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn defenses() -> (Vec<City>, Vec<LaunchSite>) {
        let cities = CITY_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &x)| City::new(i as u32, x))
            .collect();
        let sites = LAUNCH_SITE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &x)| LaunchSite::new(i as u32, x, LAUNCH_SITE_MAX_AMMO))
            .collect();
        (cities, sites)
    }

    #[test]
    fn test_first_wave_parameters() {
        let wave = generate_wave(1);
        assert_eq!(wave.number, 1);
        assert_eq!(wave.projectile_count, INITIAL_PROJECTILE_COUNT);
        assert_eq!(wave.projectile_speed, INITIAL_PROJECTILE_SPEED);
        assert_eq!(wave.launch_site_ammo, LAUNCH_SITE_MAX_AMMO);
    }

    #[test]
    fn test_wave_scaling_is_linear_then_capped() {
        let wave3 = generate_wave(3);
        assert_eq!(wave3.projectile_count, 8);
        assert_eq!(wave3.projectile_speed, 80.0);

        let wave100 = generate_wave(100);
        assert_eq!(wave100.projectile_count, MAX_PROJECTILE_COUNT);
        assert_eq!(wave100.projectile_speed, MAX_PROJECTILE_SPEED);

        let huge = generate_wave(u32::MAX);
        assert_eq!(huge.projectile_count, MAX_PROJECTILE_COUNT);
        assert_eq!(huge.projectile_speed, MAX_PROJECTILE_SPEED);

        let mut prev = generate_wave(1);
        for n in 2..40 {
            let wave = generate_wave(n);
            assert!(wave.projectile_count >= prev.projectile_count);
            assert!(wave.projectile_speed >= prev.projectile_speed);
            prev = wave;
        }
    }

    #[test]
    fn test_spawn_times() {
        assert_eq!(spawn_times(5, 4.0), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(spawn_times(1, 5.0), vec![0.0]);
        assert!(spawn_times(0, 5.0).is_empty());

        let times = spawn_times(7, WAVE_SPAWN_DURATION_SECS);
        assert_eq!(times.len(), 7);
        assert_eq!(times[0], 0.0);
        assert_eq!(times[6], WAVE_SPAWN_DURATION_SECS);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_create_projectiles_shape() {
        let (cities, sites) = defenses();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut next_id = 10;
        let wave = generate_wave(4);
        let batch = create_projectiles(&wave, &cities, &sites, &mut rng, &mut next_id);

        assert_eq!(batch.len(), wave.projectile_count as usize);
        assert_eq!(next_id, 10 + wave.projectile_count);
        for (i, p) in batch.iter().enumerate() {
            assert_eq!(p.id(), 10 + i as u32);
            assert_eq!(p.start().y, 0.0);
            assert!(p.start().x >= SPAWN_EDGE_MARGIN);
            assert!(p.start().x < FIELD_WIDTH - SPAWN_EDGE_MARGIN);
            assert_eq!(p.target().y, GROUND_Y);
            assert_eq!(p.speed(), wave.projectile_speed);
            assert!(p.is_alive());
        }
    }

    #[test]
    fn test_create_projectiles_targets_only_standing_assets() {
        let (mut cities, mut sites) = defenses();
        for city in cities.iter_mut().skip(1) {
            city.destroy();
        }
        for site in sites.iter_mut() {
            site.destroy();
        }

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut next_id = 0;
        let batch = create_projectiles(&generate_wave(10), &cities, &sites, &mut rng, &mut next_id);
        assert!(!batch.is_empty());
        assert!(batch.iter().all(|p| p.target().x == CITY_POSITIONS[0]));
    }

    #[test]
    fn test_create_projectiles_empty_without_targets() {
        let (mut cities, mut sites) = defenses();
        cities.iter_mut().for_each(City::destroy);
        sites.iter_mut().for_each(LaunchSite::destroy);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut next_id = 0;
        let batch = create_projectiles(&generate_wave(1), &cities, &sites, &mut rng, &mut next_id);
        assert!(batch.is_empty());
        assert_eq!(next_id, 0);
    }

    #[test]
    fn test_pending_spawns_release_in_order() {
        let spot = Position::new(100.0, GROUND_Y);
        let projectiles: Vec<Projectile> = (0..3).map(|i| Projectile::new(i, spot, spot, 60.0)).collect();
        let mut pending = PendingSpawns::default();
        pending.schedule(spawn_times(3, 2.0), projectiles);

        let first = pending.release_due(0.1);
        assert_eq!(first.iter().map(|p| p.id()).collect::<Vec<_>>(), vec![0]);
        assert_eq!(pending.len(), 2);

        assert!(pending.release_due(0.5).is_empty());

        let rest = pending.release_due(5.0);
        assert_eq!(rest.iter().map(|p| p.id()).collect::<Vec<_>>(), vec![1, 2]);
        assert!(pending.is_empty());
    }
}
