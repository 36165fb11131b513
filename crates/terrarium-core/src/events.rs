//! Intents and notifications.
//!
//! Systems never reach across to other entity kinds or the economy. They
//! push [`Intent`]s into the [`Outbox`]; the engine drains and applies them
//! at the end of the tick. Anything an observer (HUD, harness, tests) should
//! hear about is pushed as a [`SimEvent`].

use hecs::Entity;
use terrarium_logic::animals::Species;
use terrarium_logic::foods::FoodKind;
use terrarium_logic::geometry::Vec2;
use terrarium_logic::outcome::LevelOutcome;

use crate::components::DeathCause;

/// Who produced a coin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinSource {
    Animal(Entity),
    Helper(Entity),
}

/// A state change requested by a system, applied by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Spawn a coin. Animal drops are subject to the coin boost hook.
    DropCoin {
        at: Vec2,
        value: u32,
        source: CoinSource,
    },
    /// Spawn a free food item.
    SpawnFood { at: Vec2, kind: FoodKind },
    /// Collect a coin on the player's behalf.
    CollectCoin { coin: Entity },
    /// Spawn a baby animal without charging for it.
    SpawnAnimal {
        species: Species,
        at: Vec2,
        parent: Option<Entity>,
    },
}

/// Observable notification
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    CoinDropped {
        coin: Entity,
        x: f32,
        y: f32,
        value: u32,
    },
    CoinCollected {
        value: u32,
        x: f32,
        y: f32,
    },
    AnimalSpawned {
        animal: Entity,
        species: Species,
    },
    AnimalGrew {
        animal: Entity,
    },
    AnimalBred {
        parent: Entity,
        child: Entity,
    },
    AnimalDied {
        animal: Entity,
        species: Species,
        cause: DeathCause,
    },
    FoodEaten {
        food: Entity,
        animal: Entity,
        nutrition: f32,
    },
    PoacherSpawned {
        poacher: Entity,
        target: Option<Entity>,
    },
    PoacherRepelled {
        poacher: Entity,
    },
    AnimalGrabbed {
        poacher: Entity,
        animal: Entity,
    },
    CoinsChanged {
        balance: u32,
    },
    EggPieceBought {
        index: usize,
    },
    LevelEnded(LevelOutcome),
}

/// Per-tick queue of intents and notifications
#[derive(Debug, Default)]
pub struct Outbox {
    intents: Vec<Intent>,
    events: Vec<SimEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn take_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    pub fn take_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_intents(&self) -> bool {
        !self.intents.is_empty()
    }
}
