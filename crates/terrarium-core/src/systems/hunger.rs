//! Hunger system - burns hunger over time and handles starvation

use hecs::{Entity, World};
use log::debug;

use crate::components::{
    Animal, CoinTimer, DeathCause, Fading, Movement, Wander, DEATH_FADE_SECS,
};
use crate::events::{Outbox, SimEvent};

/// Decay hunger for every living animal. Starved animals stop moving, stop
/// dropping coins, and fade out.
pub fn hunger_system(world: &mut World, delta_seconds: f32, outbox: &mut Outbox) {
    let mut starved: Vec<(Entity, Animal)> = Vec::new();

    for (entity, animal) in world.query_mut::<&mut Animal>() {
        if animal.decay(delta_seconds) {
            starved.push((entity, animal.clone()));
        }
    }

    for (entity, animal) in starved {
        debug!("{} {:?} starved", animal.config().name, entity);
        let _ = world.remove_one::<Movement>(entity);
        let _ = world.remove_one::<Wander>(entity);
        let _ = world.remove_one::<CoinTimer>(entity);
        let _ = world.insert_one(entity, Fading::new(DEATH_FADE_SECS));
        outbox.emit(SimEvent::AnimalDied {
            animal: entity,
            species: animal.species,
            cause: DeathCause::Starved,
        });
    }
}

/// Living animals, including those still on their way to a fade.
pub fn living_animal_count(world: &World) -> usize {
    world
        .query::<&Animal>()
        .iter()
        .filter(|(_, animal)| animal.alive)
        .count()
}
