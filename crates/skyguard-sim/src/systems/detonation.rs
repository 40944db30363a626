//! Detonation system: turns arrived counter-projectiles into blasts.

use hecs::{Entity, World};
use tracing::debug;

use skyguard_core::components::CounterProjectile;
use skyguard_core::constants::BLAST_MAX_RADIUS;
use skyguard_core::events::GameEvent;
use skyguard_core::types::Position;

use crate::world_setup;

/// Despawn each counter-projectile that reached its target and spawn a blast
/// there. Blast ids follow the counter-projectile id order.
pub fn run(
    world: &mut World,
    next_blast_id: &mut u32,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();
    let mut detonations: Vec<(u32, Position)> = Vec::new();

    for (entity, counter) in world.query_mut::<&CounterProjectile>() {
        if counter.has_arrived() {
            despawn_buffer.push(entity);
            detonations.push((counter.id(), counter.target()));
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    detonations.sort_by_key(|(id, _)| *id);
    for (counter_id, center) in detonations {
        let blast_id = *next_blast_id;
        *next_blast_id += 1;
        world_setup::spawn_blast(world, blast_id, center, BLAST_MAX_RADIUS);
        debug!(blast_id, counter_id, x = center.x, y = center.y, "blast spawned");
        events.push(GameEvent::BlastSpawned { blast_id, center });
    }
}
