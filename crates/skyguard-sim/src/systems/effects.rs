//! Visual aftermath: city destruction flashes and debris particles.

use hecs::{Entity, World};

use skyguard_core::components::{City, Debris};

/// Decay city flash timers, move debris, and drop particles that burned out.
pub fn run(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    for (_entity, city) in world.query_mut::<&mut City>() {
        city.advance(dt);
    }

    despawn_buffer.clear();
    for (entity, debris) in world.query_mut::<&mut Debris>() {
        debris.advance(dt);
        if debris.is_dead() {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
