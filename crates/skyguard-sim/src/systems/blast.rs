//! Blast system: steps every blast through its expand/linger/fade phases.

use hecs::World;

use skyguard_core::components::Blast;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, blast) in world.query_mut::<&mut Blast>() {
        blast.advance(dt);
    }
}
