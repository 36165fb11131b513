//! Coin systems - animals dropping coins and coins going stale

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{jitter, Animal, Coin, CoinTimer, Position, COIN_JITTER};
use crate::events::{CoinSource, Intent, Outbox};

/// Next coin interval for `animal`, re-rolled every cycle.
pub fn roll_coin_interval(animal: &Animal, rng: &mut impl Rng) -> f32 {
    animal.config().coin_drop_interval_secs() * jitter(rng, COIN_JITTER)
}

/// Count down each animal's coin timer. When it runs out the animal drops a
/// coin if it is alive, grown, and fed; the timer restarts either way.
pub fn coin_drop_system(
    world: &mut World,
    rng: &mut impl Rng,
    delta_seconds: f32,
    outbox: &mut Outbox,
) {
    for (entity, (animal, timer, pos)) in
        world.query_mut::<(&Animal, &mut CoinTimer, &Position)>()
    {
        timer.remaining -= delta_seconds;
        if timer.remaining > 0.0 {
            continue;
        }
        timer.remaining = roll_coin_interval(animal, rng);

        if animal.can_drop_coin() {
            outbox.push(Intent::DropCoin {
                at: pos.0,
                value: animal.config().coin_value,
                source: CoinSource::Animal(entity),
            });
        }
    }
}

/// Age coins and remove the ones nobody picked up in time.
pub fn coin_system(world: &mut World, delta_seconds: f32) {
    let mut expired: Vec<Entity> = Vec::new();

    for (entity, coin) in world.query_mut::<&mut Coin>() {
        coin.age += delta_seconds;
        if coin.is_expired() {
            expired.push(entity);
        }
    }

    for entity in expired {
        let _ = world.despawn(entity);
    }
}
