//! Movement system - updates positions for entities with Movement component

use hecs::World;
use terrarium_logic::geometry::Vec2;

use crate::components::{Movement, Position};

/// Within this distance a destination counts as reached.
pub const ARRIVAL_DISTANCE: f32 = 10.0;

/// Move entities toward their destinations, removing Movement on arrival
pub fn movement_system(world: &mut World, delta_seconds: f32) {
    let mut arrived = Vec::new();

    for (entity, (pos, movement)) in world.query_mut::<(&mut Position, &Movement)>() {
        let (next, done) = step_toward(pos.0, movement, delta_seconds);
        pos.0 = next;
        if done {
            arrived.push(entity);
        }
    }

    for entity in arrived {
        let _ = world.remove_one::<Movement>(entity);
    }
}

/// Advance `current` toward the movement destination. Returns the new point
/// and whether the destination was reached.
fn step_toward(current: Vec2, movement: &Movement, delta_seconds: f32) -> (Vec2, bool) {
    let diff = movement.destination - current;
    let distance = diff.length();
    let step = movement.speed * delta_seconds;

    if distance < ARRIVAL_DISTANCE || step >= distance {
        // Snap onto the destination once we would overshoot
        let snapped = if step >= distance {
            movement.destination
        } else {
            current
        };
        return (snapped, true);
    }

    (current + diff.normalize() * step, false)
}
