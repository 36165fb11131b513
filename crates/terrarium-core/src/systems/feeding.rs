//! Feeding system - hungry animals eat food they touch

use hecs::{Entity, World};
use log::debug;
use rand::Rng;
use terrarium_logic::geometry::Vec2;

use crate::components::{Animal, Fading, FeedOutcome, Food, Position, EAT_RADIUS};
use crate::effects::EffectHooks;
use crate::events::{Intent, Outbox, SimEvent};

/// Each hungry animal eats at most one overlapping food item per tick; each
/// item feeds at most one animal. Eaten food is removed at once.
pub fn feeding_system(
    world: &mut World,
    hooks: &EffectHooks,
    rng: &mut impl Rng,
    outbox: &mut Outbox,
) {
    let mut foods: Vec<(Entity, Vec2, f32)> = world
        .query::<(&Food, &Position, Option<&Fading>)>()
        .iter()
        .filter(|(_, (_, _, fading))| fading.is_none())
        .map(|(entity, (food, pos, _))| (entity, pos.0, food.nutrition))
        .collect();
    if foods.is_empty() {
        return;
    }

    let hungry: Vec<(Entity, Vec2)> = world
        .query::<(&Animal, &Position)>()
        .iter()
        .filter(|(_, (animal, _))| animal.alive && animal.is_hungry())
        .map(|(entity, (_, pos))| (entity, pos.0))
        .collect();

    let multiplier = hooks.nutrition_multiplier(world);

    for (animal_entity, at) in hungry {
        let Some(index) = foods
            .iter()
            .position(|(_, food_at, _)| food_at.distance(&at) < EAT_RADIUS)
        else {
            continue;
        };
        let (food_entity, _, nutrition) = foods.swap_remove(index);
        let nutrition = nutrition * multiplier;

        let (outcome, species) = match world.get::<&mut Animal>(animal_entity) {
            Ok(mut animal) => (animal.feed(nutrition), animal.species),
            Err(_) => continue,
        };
        if outcome == FeedOutcome::Ignored {
            continue;
        }

        let _ = world.despawn(food_entity);
        outbox.emit(SimEvent::FoodEaten {
            food: food_entity,
            animal: animal_entity,
            nutrition,
        });

        if outcome == FeedOutcome::Grew {
            debug!("{:?} {:?} grew up", species, animal_entity);
            outbox.emit(SimEvent::AnimalGrew {
                animal: animal_entity,
            });
        }

        if hooks.should_breed(world, rng) {
            outbox.push(Intent::SpawnAnimal {
                species,
                at,
                parent: Some(animal_entity),
            });
        }
    }
}
