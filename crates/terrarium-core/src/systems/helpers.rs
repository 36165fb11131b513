//! Helper system - runs the recurring actions of periodic helper pets

use hecs::{Entity, World};
use terrarium_logic::foods::FoodKind;
use terrarium_logic::geometry::Vec2;
use terrarium_logic::helpers::HelperEffect;

use crate::components::{Coin, HelperPet, Position};
use crate::events::{CoinSource, Intent, Outbox};

/// Tick every armed helper timer and queue what fires.
pub fn helper_system(world: &mut World, delta_seconds: f32, outbox: &mut Outbox) {
    let mut fired: Vec<(Entity, Vec2, HelperEffect)> = Vec::new();

    for (entity, (helper, pos)) in world.query_mut::<(&mut HelperPet, &Position)>() {
        let effect = helper.effect();
        if let Some(timer) = helper.effect_timer.as_mut() {
            if timer.tick(delta_seconds) {
                fired.push((entity, pos.0, effect));
            }
        }
    }

    for (pet, at, effect) in fired {
        match effect {
            HelperEffect::AutoFeeder { .. } => outbox.push(Intent::SpawnFood {
                at,
                kind: FoodKind::Cricket,
            }),
            HelperEffect::CoinCollector { collect_radius, .. } => {
                for coin in coins_within(world, at, collect_radius) {
                    outbox.push(Intent::CollectCoin { coin });
                }
            }
            HelperEffect::Scavenger { coin_value, .. } => outbox.push(Intent::DropCoin {
                at,
                value: coin_value,
                source: CoinSource::Helper(pet),
            }),
            _ => {}
        }
    }
}

fn coins_within(world: &World, at: Vec2, radius: f32) -> Vec<Entity> {
    world
        .query::<(&Coin, &Position)>()
        .iter()
        .filter(|(_, (_, pos))| pos.0.distance(&at) < radius)
        .map(|(entity, _)| entity)
        .collect()
}
