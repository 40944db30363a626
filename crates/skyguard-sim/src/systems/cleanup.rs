//! Cleanup system: removes destroyed projectiles and finished blasts.

use hecs::{Entity, World};

use skyguard_core::components::{Blast, Projectile};

/// Despawn projectiles that are no longer alive and blasts whose fade is done.
/// Uses a pre-allocated buffer to avoid per-update allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if !projectile.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, blast) in world.query_mut::<&Blast>() {
        if blast.is_finished() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
