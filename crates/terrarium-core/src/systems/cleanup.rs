//! Cleanup system - removes entities whose fade-out has finished

use hecs::{Entity, World};

use crate::components::Fading;

pub fn cleanup_system(world: &mut World, delta_seconds: f32) {
    let mut done: Vec<Entity> = Vec::new();

    for (entity, fading) in world.query_mut::<&mut Fading>() {
        fading.remaining -= delta_seconds;
        if fading.remaining <= 0.0 {
            done.push(entity);
        }
    }

    for entity in done {
        let _ = world.despawn(entity);
    }
}
