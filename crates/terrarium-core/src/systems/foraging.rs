//! Foraging system - hungry animals pick the nearest food and head for it

use hecs::{Entity, World};
use terrarium_logic::geometry::Vec2;

use crate::components::{Animal, Fading, Food, Movement, Position, Wander, SEEK_SPEED};

/// Offer every edible food item to every hungry animal, then steer each
/// animal with a valid target toward it.
pub fn foraging_system(world: &mut World) {
    let foods: Vec<(Entity, Vec2)> = world
        .query::<(&Food, &Position, Option<&Fading>)>()
        .iter()
        .filter(|(_, (_, _, fading))| fading.is_none())
        .map(|(entity, (_, pos, _))| (entity, pos.0))
        .collect();

    let mut steering: Vec<(Entity, Vec2)> = Vec::new();

    for (entity, (animal, pos)) in world.query_mut::<(&mut Animal, &Position)>() {
        if !animal.alive || !animal.is_hungry() {
            continue;
        }

        // Drop targets that were eaten or expired since the last tick
        let mut current = animal
            .food_target
            .and_then(|target| foods.iter().find(|(food, _)| *food == target))
            .map(|(_, at)| pos.0.distance(at));
        if current.is_none() {
            animal.food_target = None;
        }

        for (food, at) in &foods {
            let distance = pos.0.distance(at);
            if animal.seek_food(*food, distance, current) {
                current = Some(distance);
            }
        }

        if let Some(target) = animal.food_target {
            if let Some((_, at)) = foods.iter().find(|(food, _)| *food == target) {
                steering.push((entity, *at));
            }
        }
    }

    for (entity, destination) in steering {
        if let Ok(mut wander) = world.get::<&mut Wander>(entity) {
            wander.interrupt();
        }
        let _ = world.insert_one(entity, Movement::new(destination, SEEK_SPEED));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrarium_logic::foods::FoodKind;

    fn hungry_gecko(world: &mut World, x: f32, y: f32) -> Entity {
        let mut animal = Animal::new(terrarium_logic::animals::Species::Gecko, 1.0);
        animal.hunger = 10.0;
        world.spawn((Position::new(x, y), animal))
    }

    fn food(world: &mut World, x: f32, y: f32) -> Entity {
        world.spawn((Position::new(x, y), Food::new(FoodKind::Cricket, None, 0.0, 2.0)))
    }

    #[test]
    fn test_picks_nearest_food() {
        let mut world = World::new();
        let gecko = hungry_gecko(&mut world, 100.0, 400.0);
        let _far = food(&mut world, 600.0, 400.0);
        let near = food(&mut world, 150.0, 400.0);

        foraging_system(&mut world);

        assert_eq!(world.get::<&Animal>(gecko).unwrap().food_target, Some(near));
        let movement = world.get::<&Movement>(gecko).unwrap();
        assert_eq!(movement.destination, Vec2::new(150.0, 400.0));
        assert_eq!(movement.speed, SEEK_SPEED);
    }

    #[test]
    fn test_sated_animals_ignore_food() {
        let mut world = World::new();
        let gecko = world.spawn((
            Position::new(100.0, 400.0),
            Animal::new(terrarium_logic::animals::Species::Gecko, 1.0),
        ));
        food(&mut world, 110.0, 400.0);

        foraging_system(&mut world);

        assert!(world.get::<&Animal>(gecko).unwrap().food_target.is_none());
        assert!(world.get::<&Movement>(gecko).is_err());
    }

    #[test]
    fn test_retargets_when_food_vanishes() {
        let mut world = World::new();
        let gecko = hungry_gecko(&mut world, 100.0, 400.0);
        let near = food(&mut world, 150.0, 400.0);
        let far = food(&mut world, 400.0, 400.0);

        foraging_system(&mut world);
        world.despawn(near).unwrap();
        foraging_system(&mut world);

        assert_eq!(world.get::<&Animal>(gecko).unwrap().food_target, Some(far));
    }

    #[test]
    fn test_fading_food_is_not_a_target() {
        let mut world = World::new();
        let gecko = hungry_gecko(&mut world, 100.0, 400.0);
        let rotten = food(&mut world, 120.0, 400.0);
        world.insert_one(rotten, Fading::new(0.5)).unwrap();

        foraging_system(&mut world);

        assert!(world.get::<&Animal>(gecko).unwrap().food_target.is_none());
    }
}
