//! Wandering system - idle roaming for animals and helper pets

use hecs::{Entity, World};
use rand::Rng;
use terrarium_logic::geometry::Vec2;

use crate::components::{Animal, Movement, Wander};

enum WanderStep {
    Start(Vec2, f32),
    Clear,
}

/// Pause, pick a random point, walk there, repeat. Animals chasing food are
/// left to the foraging system.
pub fn wandering_system(world: &mut World, rng: &mut impl Rng, delta_seconds: f32) {
    let mut steps: Vec<(Entity, WanderStep)> = Vec::new();

    for (entity, (wander, animal, movement)) in
        world.query_mut::<(&mut Wander, Option<&Animal>, Option<&Movement>)>()
    {
        if animal.map_or(false, |a| a.food_target.is_some()) {
            continue;
        }

        if !wander.moving {
            // Leftover seek movement from a chase that ended
            if movement.is_some() {
                steps.push((entity, WanderStep::Clear));
            }
            if wander.pause_remaining > 0.0 {
                wander.pause_remaining -= delta_seconds;
                continue;
            }
            match wander.target {
                None => {
                    wander.pause_remaining = wander.roll_pause(rng);
                    wander.target = Some(wander.roll_point(rng));
                }
                Some(target) => {
                    wander.moving = true;
                    steps.push((entity, WanderStep::Start(target, wander.roll_speed(rng))));
                }
            }
        } else if movement.is_none() {
            // Arrived
            wander.target = None;
            wander.moving = false;
        }
    }

    for (entity, step) in steps {
        match step {
            WanderStep::Start(target, speed) => {
                let _ = world.insert_one(entity, Movement::new(target, speed));
            }
            WanderStep::Clear => {
                let _ = world.remove_one::<Movement>(entity);
            }
        }
    }
}
