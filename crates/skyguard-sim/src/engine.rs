//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the wave clock, the score and
//! every id counter. It applies player commands, runs all systems, and
//! produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use skyguard_core::commands::PlayerCommand;
use skyguard_core::components::{Blast, City, CounterProjectile, Debris, LaunchSite, Projectile};
use skyguard_core::constants::{GROUND_Y, WAVE_SPAWN_DURATION_SECS};
use skyguard_core::enums::GamePhase;
use skyguard_core::events::GameEvent;
use skyguard_core::state::GameStateSnapshot;
use skyguard_core::types::{Position, SimTime};

use crate::systems;
use crate::systems::snapshot::SnapshotContext;
use crate::systems::wave_spawner::PendingSpawns;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    score: u64,
    wave: u32,
    rng: ChaCha8Rng,
    pending: PendingSpawns,
    /// Highest bonus-city score threshold already paid out.
    last_bonus_threshold: u64,
    next_projectile_id: u32,
    next_counter_projectile_id: u32,
    next_blast_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine sitting at the menu with all defenses standing.
    pub fn new(config: SimConfig) -> Self {
        let mut world = World::new();
        world_setup::setup_defenses(&mut world);

        Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            score: 0,
            wave: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            pending: PendingSpawns::default(),
            last_bonus_threshold: 0,
            next_projectile_id: 0,
            next_counter_projectile_id: 0,
            next_blast_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the start of the next update.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply queued commands, advance the simulation by `dt` seconds if a
    /// wave is in play, and return the resulting snapshot. Events raised since
    /// the previous update are drained into it.
    pub fn update(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            self.time.advance(dt);
            self.run_systems(dt);
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current state without draining pending events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    /// Apply a single player command immediately.
    pub fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Start => self.start(),
            PlayerCommand::Reset => self.reset(),
            PlayerCommand::ContinueToNextWave => self.continue_to_next_wave(),
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
            PlayerCommand::FireAt { x, y } => self.fire_at(x, y),
        }
    }

    /// Leave the menu and begin wave 1.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.phase = GamePhase::Playing;
        info!("game started");
        self.start_next_wave();
    }

    /// Launch a counter-projectile at `(x, y)` from the closest launch site
    /// (by x) that can fire. Ties go to the lowest id. Ignored outside play,
    /// for points on or below the ground, or when no site can fire.
    pub fn fire_at(&mut self, x: f64, y: f64) {
        if self.phase != GamePhase::Playing || y >= GROUND_Y {
            return;
        }

        let mut best: Option<(u32, f64)> = None;
        let mut best_distance = f64::INFINITY;
        for site in world_setup::launch_sites_by_id(&self.world)
            .iter()
            .filter(|s| s.has_ammo())
        {
            let distance = (site.x() - x).abs();
            if distance < best_distance {
                best_distance = distance;
                best = Some((site.id(), site.x()));
            }
        }
        let Some((site_id, site_x)) = best else {
            debug!(x, y, "no launch site can fire");
            return;
        };

        let fired = self
            .world
            .query_mut::<&mut LaunchSite>()
            .into_iter()
            .find(|(_, s)| s.id() == site_id)
            .map(|(_, s)| s.fire())
            .unwrap_or(false);
        if !fired {
            return;
        }

        let id = self.next_counter_projectile_id;
        self.next_counter_projectile_id += 1;
        let target = Position::new(x, y);
        world_setup::spawn_counter_projectile(&mut self.world, id, site_id, site_x, target);

        debug!(counter_projectile_id = id, site_id, x, y, "interceptor launched");
        self.events.push(GameEvent::InterceptorLaunched {
            counter_projectile_id: id,
            site_id,
            target,
        });
    }

    /// Begin the next wave from the wave-end screen.
    pub fn continue_to_next_wave(&mut self) {
        if self.phase != GamePhase::WaveEnd {
            return;
        }
        self.phase = GamePhase::Playing;
        self.start_next_wave();
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// Back to the menu with every city and launch site restored and all
    /// transient entities cleared. Id counters keep counting.
    pub fn reset(&mut self) {
        self.despawn_buffer.clear();
        self.despawn_buffer
            .extend(self.world.query::<&Projectile>().iter().map(|(e, _)| e));
        self.despawn_buffer
            .extend(self.world.query::<&CounterProjectile>().iter().map(|(e, _)| e));
        self.despawn_buffer
            .extend(self.world.query::<&Blast>().iter().map(|(e, _)| e));
        self.despawn_buffer
            .extend(self.world.query::<&Debris>().iter().map(|(e, _)| e));
        for entity in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(entity);
        }

        for (_entity, city) in self.world.query_mut::<&mut City>() {
            city.reset();
        }
        for (_entity, site) in self.world.query_mut::<&mut LaunchSite>() {
            site.reset();
        }

        self.pending.clear();
        self.events.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Menu;
        self.score = 0;
        self.wave = 0;
        self.last_bonus_threshold = 0;
        debug!("simulation reset");
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Current wave number (0 before the first wave).
    pub fn wave_number(&self) -> u32 {
        self.wave
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn alive_city_count(&self) -> usize {
        let mut query = self.world.query::<&City>();
        query.iter().filter(|(_, c)| c.is_alive()).count()
    }

    pub fn alive_launch_site_count(&self) -> usize {
        let mut query = self.world.query::<&LaunchSite>();
        query.iter().filter(|(_, s)| s.is_alive()).count()
    }

    /// Projectiles currently in flight.
    pub fn live_projectile_count(&self) -> usize {
        let mut query = self.world.query::<&Projectile>();
        query.iter().filter(|(_, p)| p.is_alive()).count()
    }

    /// Projectiles of the current wave not yet released.
    pub fn pending_spawn_count(&self) -> usize {
        self.pending.len()
    }

    /// Put a projectile in flight outside the wave schedule (for testing).
    #[cfg(test)]
    pub fn spawn_test_projectile(&mut self, start: Position, target: Position, speed: f64) -> u32 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        world_setup::spawn_projectile(&mut self.world, Projectile::new(id, start, target, speed));
        id
    }

    /// Drop every pending and live projectile (for testing).
    #[cfg(test)]
    pub fn clear_threats(&mut self) {
        self.pending.clear();
        let live: Vec<Entity> = self
            .world
            .query::<&Projectile>()
            .iter()
            .map(|(e, _)| e)
            .collect();
        for entity in live {
            let _ = self.world.despawn(entity);
        }
    }

    /// Knock out a city directly (for testing).
    #[cfg(test)]
    pub fn destroy_city(&mut self, id: u32) {
        for (_entity, city) in self.world.query_mut::<&mut City>() {
            if city.id() == id {
                city.destroy();
            }
        }
    }

    #[cfg(test)]
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Advance the wave counter, restock surviving launch sites, and schedule
    /// the new wave's projectiles.
    fn start_next_wave(&mut self) {
        self.wave += 1;
        let wave = systems::wave_spawner::generate_wave(self.wave);

        for (_entity, site) in self.world.query_mut::<&mut LaunchSite>() {
            if site.is_alive() {
                site.refill();
            }
        }

        let cities = world_setup::cities_by_id(&self.world);
        let launch_sites = world_setup::launch_sites_by_id(&self.world);
        let projectiles = systems::wave_spawner::create_projectiles(
            &wave,
            &cities,
            &launch_sites,
            &mut self.rng,
            &mut self.next_projectile_id,
        );
        let offsets = systems::wave_spawner::spawn_times(projectiles.len(), WAVE_SPAWN_DURATION_SECS);
        self.pending.schedule(offsets, projectiles);

        info!(
            wave = wave.number,
            projectiles = wave.projectile_count,
            speed = wave.projectile_speed,
            "wave started"
        );
        self.events.push(GameEvent::WaveStarted {
            wave: wave.number,
            projectile_count: wave.projectile_count,
            projectile_speed: wave.projectile_speed,
        });
    }

    /// Pay the survivor bonus, hand out bonus cities, and stop the wave.
    fn end_wave(&mut self) {
        let bonus = systems::scoring::wave_end_bonus(&self.world);
        self.score += bonus;

        let revived = systems::scoring::award_bonus_cities(
            &mut self.world,
            self.score,
            &mut self.last_bonus_threshold,
        );
        for city_id in revived {
            info!(city_id, score = self.score, "bonus city awarded");
            self.events.push(GameEvent::CityRevived { city_id });
        }

        self.phase = GamePhase::WaveEnd;
        info!(wave = self.wave, bonus, score = self.score, "wave complete");
        self.events.push(GameEvent::WaveComplete {
            wave: self.wave,
            bonus,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Release projectiles whose spawn offset has elapsed
        systems::wave_spawner::run(&mut self.world, &mut self.pending, dt);
        // 2. Counter-projectile flight
        systems::kinematics::advance_counter_projectiles(&mut self.world, dt);
        // 3. Arrived counter-projectiles become blasts
        systems::detonation::run(
            &mut self.world,
            &mut self.next_blast_id,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 4. Blast phases
        systems::blast::run(&mut self.world, dt);
        // 5. Enemy flight
        systems::kinematics::advance_projectiles(&mut self.world, dt);
        // 6. Collision resolution (read-only)
        let collisions = systems::collision::run(&self.world);
        // 7. Damage and interception score
        self.score += systems::damage::apply(
            &mut self.world,
            &collisions,
            &mut self.rng,
            &mut self.events,
        );
        // 8. Cleanup (destroyed projectiles, finished blasts)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 9. City flashes and debris
        systems::effects::run(&mut self.world, dt, &mut self.despawn_buffer);
        // 10. Wave completion
        if self.pending.is_empty() && self.live_projectile_count() == 0 {
            self.end_wave();
        }
        // 11. Game over overrides wave end
        if self.alive_city_count() == 0 {
            self.phase = GamePhase::GameOver;
            info!(wave = self.wave, score = self.score, "game over");
            self.events.push(GameEvent::GameOver {
                wave: self.wave,
                score: self.score,
            });
        }
    }

    fn build_snapshot(&self, events: Vec<GameEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                score: self.score,
                wave: self.wave,
                pending_spawns: self.pending.len(),
            },
            events,
        )
    }
}
