//! Food system - falling, crawling about, going off

use hecs::{Entity, World};
use rand::Rng;
use terrarium_logic::geometry::{ease_bounce_out, Rect, Vec2};

use crate::components::{
    roll_range, Fading, Food, Position, FOOD_FADE_SECS, FOOD_FALL_SECS, FOOD_TURN_MAX,
    FOOD_TURN_MIN,
};

/// Random heading in radians
pub fn roll_heading(rng: &mut impl Rng) -> f32 {
    rng.gen_range(0.0..std::f32::consts::TAU)
}

/// Bounce `pos` off the edges of `area`, flipping the heading on the axis hit.
fn reflect(pos: &mut Vec2, heading: &mut f32, area: &Rect) {
    let mut dir = Vec2::from_angle(*heading);
    if pos.x < area.min.x || pos.x > area.max.x {
        dir.x = -dir.x;
        pos.x = pos.x.clamp(area.min.x, area.max.x);
    }
    if pos.y < area.min.y || pos.y > area.max.y {
        dir.y = -dir.y;
        pos.y = pos.y.clamp(area.min.y, area.max.y);
    }
    *heading = dir.y.atan2(dir.x);
}

/// Advance every food item. Expired food starts its fade; food that somehow
/// left the field is removed outright.
pub fn food_system(world: &mut World, rng: &mut impl Rng, delta_seconds: f32) {
    let area = Rect::substrate();
    let field = Rect::field();
    let mut expired: Vec<Entity> = Vec::new();
    let mut lost: Vec<Entity> = Vec::new();

    for (entity, (food, pos, fading)) in
        world.query_mut::<(&mut Food, &mut Position, Option<&Fading>)>()
    {
        if fading.is_some() {
            continue;
        }
        food.age += delta_seconds;

        if let Some(fall) = food.fall.as_mut() {
            fall.elapsed += delta_seconds;
            let t = fall.elapsed / FOOD_FALL_SECS;
            pos.0.y = fall.from_y + (fall.to_y - fall.from_y) * ease_bounce_out(t);
            if t >= 1.0 {
                pos.0.y = fall.to_y;
                food.fall = None;
            }
        } else {
            food.turn_remaining -= delta_seconds;
            if food.turn_remaining <= 0.0 {
                food.heading = roll_heading(rng);
                food.turn_remaining = roll_range(rng, FOOD_TURN_MIN, FOOD_TURN_MAX);
            }
            let step = Vec2::from_angle(food.heading) * (food.speed() * delta_seconds);
            pos.0 = pos.0 + step;
            reflect(&mut pos.0, &mut food.heading, &area);
        }

        if !field.contains(&pos.0) {
            lost.push(entity);
        } else if food.is_expired() {
            expired.push(entity);
        }
    }

    for entity in expired {
        let _ = world.insert_one(entity, Fading::new(FOOD_FADE_SECS));
    }
    for entity in lost {
        let _ = world.despawn(entity);
    }
}
