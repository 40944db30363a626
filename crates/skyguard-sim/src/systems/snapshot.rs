//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::World;

use skyguard_core::components::*;
use skyguard_core::enums::GamePhase;
use skyguard_core::events::GameEvent;
use skyguard_core::state::*;
use skyguard_core::types::SimTime;

use crate::world_setup;

/// Scalar engine state that lives outside the world.
pub struct SnapshotContext {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u64,
    pub wave: u32,
    pub pending_spawns: usize,
}

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    context: SnapshotContext,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: context.time,
        phase: context.phase,
        score: context.score,
        wave: context.wave,
        pending_spawns: context.pending_spawns,
        projectiles: build_projectiles(world),
        counter_projectiles: build_counter_projectiles(world),
        blasts: build_blasts(world),
        cities: build_cities(world),
        launch_sites: build_launch_sites(world),
        debris: build_debris(world),
        events,
    }
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.is_alive())
        .map(|(_, p)| ProjectileView {
            id: p.id(),
            start: p.start(),
            position: p.position(),
            target: p.target(),
            progress: p.progress(),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_counter_projectiles(world: &World) -> Vec<CounterProjectileView> {
    let mut views: Vec<CounterProjectileView> = world
        .query::<&CounterProjectile>()
        .iter()
        .map(|(_, c)| CounterProjectileView {
            id: c.id(),
            site_id: c.site_id(),
            start: c.start(),
            position: c.position(),
            target: c.target(),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_blasts(world: &World) -> Vec<BlastView> {
    let mut views: Vec<BlastView> = world
        .query::<&Blast>()
        .iter()
        .map(|(_, b)| BlastView {
            id: b.id(),
            center: b.center(),
            radius: b.radius(),
            phase: b.phase(),
            alpha: b.alpha(),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_cities(world: &World) -> Vec<CityView> {
    world_setup::cities_by_id(world)
        .iter()
        .map(|c| CityView {
            id: c.id(),
            x: c.x(),
            alive: c.is_alive(),
            flash_alpha: c.flash_alpha(),
        })
        .collect()
}

fn build_launch_sites(world: &World) -> Vec<LaunchSiteView> {
    world_setup::launch_sites_by_id(world)
        .iter()
        .map(|s| LaunchSiteView {
            id: s.id(),
            x: s.x(),
            alive: s.is_alive(),
            ammo: s.ammo(),
            max_ammo: s.max_ammo(),
        })
        .collect()
}

/// Debris has no id of its own; sort on the hecs entity id for a stable order.
fn build_debris(world: &World) -> Vec<DebrisView> {
    let mut particles: Vec<(u32, DebrisView)> = world
        .query::<&Debris>()
        .iter()
        .map(|(entity, d)| {
            (
                entity.id(),
                DebrisView {
                    position: d.position,
                    color: d.color,
                    size: d.size,
                    alpha: d.alpha(),
                },
            )
        })
        .collect();
    particles.sort_by_key(|(id, _)| *id);
    particles.into_iter().map(|(_, view)| view).collect()
}
