//! Kinematic integration system.
//!
//! Moves enemy projectiles and counter-projectiles toward their targets.
//! Each component clamps its own step, so nothing overshoots regardless of dt.

use hecs::World;

use skyguard_core::components::{CounterProjectile, Projectile};

/// Advance every live enemy projectile.
pub fn advance_projectiles(world: &mut World, dt: f64) {
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.advance(dt);
    }
}

/// Advance every counter-projectile still in flight.
pub fn advance_counter_projectiles(world: &mut World, dt: f64) {
    for (_entity, counter) in world.query_mut::<&mut CounterProjectile>() {
        counter.advance(dt);
    }
}
