//! Integration tests: whole levels played through the public engine API

use hecs::Entity;
use terrarium_core::prelude::*;
use terrarium_logic::animals::Species;
use terrarium_logic::helpers::HelperKind;
use terrarium_logic::outcome::LevelOutcome;

const DT: f32 = 0.1;

// ── Helpers ─────────────────────────────────────────────────────────────

fn engine(level: u32, starter: Option<Species>, helpers: Vec<HelperKind>) -> TerrariumEngine {
    TerrariumEngine::new(TerrariumConfig {
        seed: 7,
        level,
        starter_species: starter,
        owned_helpers: helpers,
    })
}

/// Tick for `seconds`, returning every event with the sim time it was seen.
fn run(engine: &mut TerrariumEngine, seconds: f32) -> Vec<(f64, SimEvent)> {
    let mut seen = Vec::new();
    let ticks = (seconds / DT).round() as usize;
    for _ in 0..ticks {
        engine.update(DT);
        let now = engine.sim_time();
        seen.extend(engine.drain_events().into_iter().map(|e| (now, e)));
    }
    seen
}

fn keep_fed(engine: &mut TerrariumEngine) {
    for (_, animal) in engine.world.query_mut::<&mut Animal>() {
        if animal.alive {
            animal.hunger = animal.config().max_hunger;
        }
    }
}

fn set_hunger(engine: &mut TerrariumEngine, animal: Entity, hunger: f32) {
    engine.world.get::<&mut Animal>(animal).unwrap().hunger = hunger;
}

fn position_of(engine: &TerrariumEngine, entity: Entity) -> (f32, f32) {
    let pos = engine.world.get::<&Position>(entity).unwrap();
    (pos.0.x, pos.0.y)
}

/// Drop a cricket on a hungry animal and tick until it is eaten.
fn feed_once(engine: &mut TerrariumEngine, animal: Entity) -> Vec<SimEvent> {
    set_hunger(engine, animal, 10.0);
    let (x, y) = position_of(engine, animal);
    engine.drop_food(x, y).expect("cricket is free");

    let mut events = Vec::new();
    for _ in 0..100 {
        engine.update(DT);
        events.extend(engine.drain_events());
        if events
            .iter()
            .any(|e| matches!(e, SimEvent::FoodEaten { animal: a, .. } if *a == animal))
        {
            break;
        }
    }
    events
}

fn grant_coins(engine: &mut TerrariumEngine, value: u32) {
    let coin = engine.world.spawn((Position::new(500.0, 500.0), Coin::new(value)));
    assert!(engine.click_coin(coin));
}

fn level_ended(events: &[(f64, SimEvent)]) -> Vec<(f64, LevelOutcome)> {
    events
        .iter()
        .filter_map(|(t, e)| match e {
            SimEvent::LevelEnded(outcome) => Some((*t, *outcome)),
            _ => None,
        })
        .collect()
}

// ── Economy ─────────────────────────────────────────────────────────────

#[test]
fn level_one_purchases_drain_the_balance() {
    let mut engine = engine(1, None, Vec::new());
    assert_eq!(engine.coins(), 200);

    assert!(engine.buy_animal(Species::Gecko).is_some());
    assert_eq!(engine.coins(), 100);
    assert!(engine.buy_animal(Species::Gecko).is_some());
    assert_eq!(engine.coins(), 0);
    assert!(engine.buy_animal(Species::Gecko).is_none());
    assert_eq!(engine.coins(), 0);
    assert_eq!(engine.living_animal_count(), 2);

    let balances: Vec<u32> = engine
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            SimEvent::CoinsChanged { balance } => Some(balance),
            _ => None,
        })
        .collect();
    assert_eq!(balances, vec![100, 0]);
}

#[test]
fn egg_pieces_sell_once_and_win_after_delay() {
    let mut engine = engine(1, None, Vec::new());
    grant_coins(&mut engine, 2000);
    assert_eq!(engine.coins(), 2200);

    assert!(engine.buy_egg_piece(0));
    assert!(!engine.buy_egg_piece(0));
    assert!(!engine.buy_egg_piece(3));
    assert!(engine.buy_egg_piece(1));
    assert!(engine.buy_egg_piece(2));
    assert_eq!(engine.coins(), 2200 - 300 - 500 - 800);
    assert!(engine.ledger().all_eggs_bought());
    engine.drain_events();

    // Not reported before the delay
    engine.update(0.3);
    assert!(engine.outcome().is_none());
    assert!(!engine
        .drain_events()
        .iter()
        .any(|e| matches!(e, SimEvent::LevelEnded(_))));

    let events = run(&mut engine, 2.0);
    let ended = level_ended(&events);
    assert_eq!(ended.len(), 1, "win reported exactly once");
    assert_eq!(
        ended[0].1,
        LevelOutcome::Won {
            level: 1,
            final_level: false
        }
    );
    assert!(engine.is_resolved());
}

#[test]
fn coin_pickup_credits_the_ledger() {
    let mut engine = engine(1, None, Vec::new());
    let coin = engine.world.spawn((Position::new(400.0, 450.0), Coin::new(15)));
    assert_eq!(engine.coins_on_field().len(), 1);

    assert!(engine.click_coin(coin));
    assert_eq!(engine.coins(), 215);
    assert!(engine.coins_on_field().is_empty());

    // Second click on the same coin does nothing
    assert!(!engine.click_coin(coin));
    assert_eq!(engine.coins(), 215);
}

// ── Animal lifecycle ────────────────────────────────────────────────────

#[test]
fn unfed_gecko_starves_without_ending_the_level() {
    let mut engine = engine(1, Some(Species::Gecko), Vec::new());
    engine.drain_events();

    let events = run(&mut engine, 45.0);
    let deaths: Vec<f64> = events
        .iter()
        .filter_map(|(t, e)| match e {
            SimEvent::AnimalDied {
                cause: DeathCause::Starved,
                ..
            } => Some(*t),
            _ => None,
        })
        .collect();
    assert_eq!(deaths.len(), 1);
    // Hunger rate jitter keeps the death inside this window
    assert!(deaths[0] > 28.0 && deaths[0] < 40.0, "died at {}", deaths[0]);

    // Still 200 coins, enough to restock
    assert_eq!(engine.living_animal_count(), 0);
    assert!(engine.outcome().is_none());
    assert!(level_ended(&events).is_empty());
}

#[test]
fn game_over_only_after_last_animal_dies_and_balance_is_short() {
    let mut engine = engine(1, Some(Species::Gecko), Vec::new());
    assert!(engine.buy_animal(Species::Frog).is_some());
    assert_eq!(engine.coins(), 0);
    engine.drain_events();

    let events = run(&mut engine, 60.0);

    let last_death = events
        .iter()
        .filter(|(_, e)| matches!(e, SimEvent::AnimalDied { .. }))
        .map(|(t, _)| *t)
        .fold(0.0, f64::max);
    let deaths = events
        .iter()
        .filter(|(_, e)| matches!(e, SimEvent::AnimalDied { .. }))
        .count();
    assert_eq!(deaths, 2);

    let ended = level_ended(&events);
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].1, LevelOutcome::GameOver { level: 1 });
    assert!(
        ended[0].0 >= last_death + 0.9,
        "game over at {} came too soon after last death at {}",
        ended[0].0,
        last_death
    );
}

#[test]
fn babies_and_hungry_animals_never_drop_coins() {
    let mut engine = engine(1, Some(Species::Gecko), Vec::new());
    engine.drain_events();

    // A baby stays a baby without food and is never paid out
    let events = run(&mut engine, 25.0);
    assert!(!events
        .iter()
        .any(|(_, e)| matches!(e, SimEvent::CoinDropped { .. })));

    // A hungry adult whose timer keeps firing is skipped too
    let mut adult = Animal::new(Species::Gecko, 1.0);
    adult.stage = LifeStage::Adult;
    let adult = engine.world.spawn((
        Position::new(500.0, 500.0),
        adult,
        CoinTimer { remaining: 0.05 },
    ));
    for _ in 0..100 {
        set_hunger(&mut engine, adult, 10.0);
        engine.update(DT);
        assert!(!engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, SimEvent::CoinDropped { .. })));
    }
}

#[test]
fn feeding_grows_a_baby_into_a_coin_dropper() {
    let mut engine = engine(1, None, Vec::new());
    let gecko = engine.buy_animal(Species::Gecko).unwrap();
    engine.world.remove_one::<Wander>(gecko).unwrap();
    engine.drain_events();

    let mut grew_on = None;
    for feed in 1..=3 {
        let events = feed_once(&mut engine, gecko);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, SimEvent::FoodEaten { animal, .. } if *animal == gecko)),
            "feed {} was not eaten",
            feed
        );
        if events
            .iter()
            .any(|e| matches!(e, SimEvent::AnimalGrew { animal } if *animal == gecko))
        {
            grew_on.get_or_insert(feed);
        }
    }
    assert_eq!(grew_on, Some(3));
    assert!(engine.world.get::<&Animal>(gecko).unwrap().is_adult());

    // Fed adults pay out
    let mut dropped = None;
    for _ in 0..150 {
        keep_fed(&mut engine);
        engine.update(DT);
        for event in engine.drain_events() {
            if let SimEvent::CoinDropped { coin, value, .. } = event {
                dropped.get_or_insert((coin, value));
            }
        }
        if dropped.is_some() {
            break;
        }
    }
    let (coin, value) = dropped.expect("adult gecko dropped a coin");
    assert_eq!(value, Species::Gecko.config().coin_value);

    let before = engine.coins();
    assert!(engine.click_coin(coin));
    assert_eq!(engine.coins(), before + value);
}

// ── Poachers ────────────────────────────────────────────────────────────

fn wait_for_poacher(engine: &mut TerrariumEngine) -> Entity {
    for _ in 0..1200 {
        keep_fed(engine);
        engine.update(DT);
        for event in engine.drain_events() {
            if let SimEvent::PoacherSpawned { poacher, .. } = event {
                return poacher;
            }
        }
    }
    panic!("no poacher appeared");
}

#[test]
fn level_one_has_no_poachers() {
    let mut engine = engine(1, Some(Species::Gecko), Vec::new());
    for _ in 0..1200 {
        keep_fed(&mut engine);
        engine.update(DT);
    }
    assert!(engine.active_poachers().is_empty());
}

#[test]
fn clicking_repels_a_poacher_exactly_once() {
    let mut engine = engine(2, Some(Species::Gecko), Vec::new());
    let poacher = wait_for_poacher(&mut engine);
    assert_eq!(engine.active_poachers(), vec![poacher]);

    let clicks = engine.level().poacher.unwrap().clicks_to_repel;
    for _ in 0..clicks {
        assert!(engine.click_poacher(poacher));
    }
    assert!(!engine.click_poacher(poacher), "retreating poachers ignore clicks");

    let mut events = engine.drain_events();
    for _ in 0..30 {
        keep_fed(&mut engine);
        engine.update(DT);
        events.extend(engine.drain_events());
    }
    let repelled = events
        .iter()
        .filter(|e| matches!(e, SimEvent::PoacherRepelled { .. }))
        .count();
    assert_eq!(repelled, 1);
    assert!(!events.iter().any(|e| matches!(e, SimEvent::AnimalGrabbed { .. })));
    assert_eq!(engine.living_animal_count(), 1);
    assert!(engine.world.get::<&Poacher>(poacher).is_err(), "despawned after retreat");
}

#[test]
fn ignored_poacher_steals_the_animal() {
    let mut engine = engine(2, Some(Species::Gecko), Vec::new());
    let (gecko, _, _) = engine.animals()[0];
    engine.world.remove_one::<Wander>(gecko).unwrap();
    let poacher = wait_for_poacher(&mut engine);

    let mut grabbed = false;
    let mut poached = false;
    for _ in 0..900 {
        keep_fed(&mut engine);
        engine.update(DT);
        for event in engine.drain_events() {
            match event {
                SimEvent::AnimalGrabbed { poacher: p, animal } => {
                    assert_eq!((p, animal), (poacher, gecko));
                    grabbed = true;
                }
                SimEvent::AnimalDied {
                    animal,
                    cause: DeathCause::Poached,
                    ..
                } => {
                    assert!(grabbed, "death reported before the grab");
                    assert_eq!(animal, gecko);
                    poached = true;
                }
                _ => {}
            }
        }
        if poached {
            break;
        }
    }
    assert!(poached);
    assert_eq!(engine.living_animal_count(), 0);
    // 200 coins still buys a replacement
    engine.update(2.0);
    assert!(engine.outcome().is_none());
}

#[test]
fn grab_in_progress_finishes_after_the_level_ends() {
    let mut engine = engine(2, Some(Species::Gecko), Vec::new());
    let (gecko, _, _) = engine.animals()[0];
    engine.world.remove_one::<Wander>(gecko).unwrap();
    let poacher = wait_for_poacher(&mut engine);

    let mut grabbed = false;
    for _ in 0..900 {
        keep_fed(&mut engine);
        engine.update(DT);
        grabbed = engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, SimEvent::AnimalGrabbed { .. }));
        if grabbed {
            break;
        }
    }
    assert!(grabbed);
    assert!(engine.force_win().is_some());
    let frozen_at = engine.sim_time();
    engine.drain_events();

    let events = run(&mut engine, 1.5);
    assert!(events.iter().any(|(_, e)| matches!(
        e,
        SimEvent::AnimalDied { animal, cause: DeathCause::Poached, .. } if *animal == gecko
    )));
    assert!(!engine.world.contains(gecko));
    assert!(!engine.world.contains(poacher));
    assert_eq!(engine.sim_time(), frozen_at);
}

// ── Helper pets ─────────────────────────────────────────────────────────

#[test]
fn mantis_repels_without_clicks() {
    let mut engine = engine(2, Some(Species::Gecko), vec![HelperKind::Mantis]);
    let (gecko, _, _) = engine.animals()[0];
    engine.world.remove_one::<Wander>(gecko).unwrap();
    // Far from the poacher's entry line, out of reach until the guard is done
    engine.world.get::<&mut Position>(gecko).unwrap().0.y = 640.0;
    let poacher = wait_for_poacher(&mut engine);

    let mut repelled = false;
    for _ in 0..50 {
        keep_fed(&mut engine);
        engine.update(DT);
        repelled |= engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, SimEvent::PoacherRepelled { poacher: p } if *p == poacher));
    }
    assert!(repelled);
    assert_eq!(engine.living_animal_count(), 1);
}

#[test]
fn scorpion_slows_poachers() {
    let mut engine = engine(2, Some(Species::Gecko), vec![HelperKind::Scorpion]);
    let (gecko, _, _) = engine.animals()[0];
    engine.world.remove_one::<Wander>(gecko).unwrap();
    // Far below the entry line so the poacher is still walking when measured
    engine.world.get::<&mut Position>(gecko).unwrap().0.y = 640.0;
    let poacher = wait_for_poacher(&mut engine);

    let base = engine.level().poacher.unwrap().speed;
    let speed = engine.world.get::<&Poacher>(poacher).unwrap().speed();
    assert!((speed - base * 0.7).abs() < 1e-3, "speed {}", speed);

    // Past the entrance, then one second of walking
    for _ in 0..20 {
        keep_fed(&mut engine);
        engine.update(DT);
    }
    assert_eq!(
        engine.world.get::<&Poacher>(poacher).unwrap().state,
        PoacherState::Seeking
    );
    let (x0, y0) = position_of(&engine, poacher);
    for _ in 0..10 {
        keep_fed(&mut engine);
        engine.update(DT);
    }
    let (x1, y1) = position_of(&engine, poacher);
    let walked = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    assert!((walked - base * 0.7).abs() < 0.5, "walked {}", walked);
}

#[test]
fn snail_boosts_nearby_coin_drops() {
    let mut engine = engine(1, None, vec![HelperKind::Snail]);
    let snail_at = engine
        .world
        .query::<(&HelperPet, &Position)>()
        .iter()
        .find(|(_, (pet, _))| pet.kind == HelperKind::Snail)
        .map(|(_, (_, pos))| pos.0)
        .expect("snail placed");

    let mut adult = Animal::new(Species::Gecko, 1.0);
    adult.stage = LifeStage::Adult;
    engine.world.spawn((
        Position(snail_at),
        adult,
        CoinTimer { remaining: 0.05 },
    ));
    engine.drain_events();

    keep_fed(&mut engine);
    engine.update(DT);
    let values: Vec<u32> = engine
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            SimEvent::CoinDropped { value, .. } => Some(value),
            _ => None,
        })
        .collect();
    // round(15 * 1.5)
    assert_eq!(values, vec![23]);
}

#[test]
fn snake_breeds_a_baby_of_the_same_species() {
    let mut engine = engine(1, None, vec![HelperKind::Snake]);
    let gecko = engine.buy_animal(Species::Gecko).unwrap();
    engine.world.remove_one::<Wander>(gecko).unwrap();
    engine.drain_events();

    let mut bred = None;
    for _ in 0..100 {
        keep_fed(&mut engine);
        let events = feed_once(&mut engine, gecko);
        bred = events.iter().find_map(|e| match e {
            SimEvent::AnimalBred { parent, child } => Some((*parent, *child)),
            _ => None,
        });
        if bred.is_some() {
            assert!(events.iter().any(|e| matches!(
                e,
                SimEvent::AnimalSpawned { species: Species::Gecko, .. }
            )));
            break;
        }
    }
    let (parent, child) = bred.expect("a 10% breed chance never hit in 100 feeds");
    assert_eq!(parent, gecko);
    let baby = engine.world.get::<&Animal>(child).unwrap();
    assert_eq!(baby.species, Species::Gecko);
    assert_eq!(baby.stage, LifeStage::Baby);
    drop(baby);
    assert_eq!(engine.living_animal_count(), 2);
}

#[test]
fn beetle_doubles_nutrition() {
    let mut engine = engine(1, None, vec![HelperKind::Beetle]);
    let gecko = engine.buy_animal(Species::Gecko).unwrap();
    engine.world.remove_one::<Wander>(gecko).unwrap();
    engine.drain_events();

    let events = feed_once(&mut engine, gecko);
    let nutrition = events.iter().find_map(|e| match e {
        SimEvent::FoodEaten { nutrition, .. } => Some(*nutrition),
        _ => None,
    });
    assert_eq!(nutrition, Some(50.0));
}

#[test]
fn millipede_drops_unboosted_coins() {
    let mut engine = engine(1, None, vec![HelperKind::Millipede, HelperKind::Snail]);
    engine.drain_events();

    let events = run(&mut engine, 10.5);
    let values: Vec<u32> = events
        .iter()
        .filter_map(|(_, e)| match e {
            SimEvent::CoinDropped { value, .. } => Some(*value),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec![1]);
}

#[test]
fn tortoise_feeds_for_free() {
    let mut engine = engine(1, None, vec![HelperKind::Tortoise]);
    let coins = engine.coins();
    engine.update(20.05);
    assert_eq!(engine.food_count(), 1);
    assert_eq!(engine.coins(), coins);
}
