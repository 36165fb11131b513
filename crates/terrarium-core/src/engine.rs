//! Simulation engine - main entry point for running one terrarium level

use hecs::{Entity, World};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use terrarium_logic::animals::Species;
use terrarium_logic::economy::{EconomyLedger, LedgerEvent};
use terrarium_logic::foods::{FoodKind, DEFAULT_FOOD};
use terrarium_logic::geometry::{
    in_shop_strip, Rect, Vec2, FIELD_WIDTH, SUBSTRATE_BOTTOM, SUBSTRATE_MARGIN, SUBSTRATE_TOP,
};
use terrarium_logic::helpers::HelperKind;
use terrarium_logic::levels::{level_config, LevelConfig};
use terrarium_logic::outcome::{LevelManager, LevelOutcome};

use crate::components::*;
use crate::effects::{install_effect, EffectHooks, InstallContext};
use crate::events::{CoinSource, Intent, Outbox, SimEvent};
use crate::systems::*;

/// Helpers spawn this far in from the side walls.
const HELPER_SPAWN_INSET_X: f32 = 60.0;
/// Helpers spawn this far in from the substrate edges.
const HELPER_SPAWN_INSET_Y: f32 = 30.0;

/// Everything needed to set up a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrariumConfig {
    /// RNG seed; the same seed and inputs replay the same level
    pub seed: u64,
    /// 1-based level number. Unknown levels fall back to level 1.
    pub level: u32,
    /// Free baby animal placed at level start, if unlocked
    pub starter_species: Option<Species>,
    /// Helper pets carried over from earlier levels
    pub owned_helpers: Vec<HelperKind>,
}

impl Default for TerrariumConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            level: 1,
            starter_species: Some(Species::Gecko),
            owned_helpers: Vec::new(),
        }
    }
}

/// Main simulation engine
pub struct TerrariumEngine {
    /// ECS world containing all entities
    pub world: World,
    /// Seconds simulated since the level started
    sim_time: f64,
    level: &'static LevelConfig,
    rng: StdRng,
    ledger: EconomyLedger,
    level_manager: LevelManager,
    poacher_ai: PoacherAi,
    hooks: EffectHooks,
    outbox: Outbox,
    events: Vec<SimEvent>,
    selected_food: FoodKind,
}

impl TerrariumEngine {
    /// Set up a level: starting balance, helpers with their effects installed,
    /// and the starter animal.
    pub fn new(config: TerrariumConfig) -> Self {
        let level = level_config(config.level);
        let mut engine = Self {
            world: World::new(),
            sim_time: 0.0,
            level,
            rng: StdRng::seed_from_u64(config.seed),
            ledger: EconomyLedger::new(level.start_coins),
            level_manager: LevelManager::new(level.level),
            poacher_ai: PoacherAi::new(level.poacher),
            hooks: EffectHooks::new(),
            outbox: Outbox::new(),
            events: Vec::new(),
            selected_food: DEFAULT_FOOD,
        };

        for kind in &config.owned_helpers {
            engine.spawn_helper(*kind);
        }

        if let Some(species) = config.starter_species {
            if species.is_unlocked(level.level) {
                let at = engine.random_substrate_point();
                engine.spawn_animal(species, at, None);
            }
        }

        info!(
            "Level {} started with {} coins, {} helper(s), poachers {}",
            level.level,
            level.start_coins,
            config.owned_helpers.len(),
            if level.poacher.is_some() { "on" } else { "off" },
        );
        engine.flush_events();
        engine
    }

    /// Update the simulation by delta_seconds
    pub fn update(&mut self, delta_seconds: f32) {
        // A resolved level is frozen apart from poachers finishing their exit
        if self.level_manager.resolved().is_some() {
            poacher_exit_system(&mut self.world, delta_seconds, &mut self.outbox);
            self.flush_events();
            return;
        }
        self.sim_time += delta_seconds as f64;

        if let Some(outcome) = self.level_manager.tick(delta_seconds) {
            self.resolve(outcome);
            self.flush_events();
            return;
        }

        hunger_system(&mut self.world, delta_seconds, &mut self.outbox);
        foraging_system(&mut self.world);
        wandering_system(&mut self.world, &mut self.rng, delta_seconds);
        movement_system(&mut self.world, delta_seconds);
        food_system(&mut self.world, &mut self.rng, delta_seconds);
        feeding_system(&mut self.world, &self.hooks, &mut self.rng, &mut self.outbox);
        coin_drop_system(&mut self.world, &mut self.rng, delta_seconds, &mut self.outbox);
        coin_system(&mut self.world, delta_seconds);
        helper_system(&mut self.world, delta_seconds, &mut self.outbox);
        self.poacher_ai.update(&mut self.world, &mut self.rng, delta_seconds, &mut self.outbox);
        poacher_system(&mut self.world, delta_seconds, &mut self.outbox);
        cleanup_system(&mut self.world, delta_seconds);

        self.apply_intents();

        let living = self.living_animal_count();
        if self.level_manager.check_game_over(living, self.ledger.coins()) {
            info!(
                "Level {} lost: no animals and {} coins",
                self.level.level,
                self.ledger.coins()
            );
        }

        self.flush_events();
    }

    fn apply_intents(&mut self) {
        for intent in self.outbox.take_intents() {
            match intent {
                Intent::DropCoin { at, value, source } => {
                    let value = match source {
                        CoinSource::Animal(_) => {
                            let boost = self.hooks.coin_multiplier(&self.world, at);
                            (value as f32 * boost).round() as u32
                        }
                        CoinSource::Helper(_) => value,
                    };
                    self.spawn_coin(at, value);
                }
                Intent::SpawnFood { at, kind } => {
                    self.spawn_food(at, kind);
                }
                Intent::CollectCoin { coin } => {
                    self.collect_coin(coin);
                }
                Intent::SpawnAnimal {
                    species,
                    at,
                    parent,
                } => {
                    let at = Rect::substrate().inset(SUBSTRATE_MARGIN).clamp(at);
                    self.spawn_animal(species, at, parent);
                }
            }
        }
    }

    /// Move ledger notifications and queued events into the public queue.
    fn flush_events(&mut self) {
        for event in self.ledger.drain_events() {
            self.outbox.emit(match event {
                LedgerEvent::CoinsChanged(balance) => SimEvent::CoinsChanged { balance },
                LedgerEvent::EggPieceBought(index) => SimEvent::EggPieceBought { index },
            });
        }
        self.events.extend(self.outbox.take_events());
    }

    fn resolve(&mut self, outcome: LevelOutcome) {
        match outcome {
            LevelOutcome::Won { level, final_level } => {
                info!("Level {} won (final: {})", level, final_level)
            }
            LevelOutcome::GameOver { level } => info!("Level {} game over", level),
        }
        self.outbox.emit(SimEvent::LevelEnded(outcome));
    }

    fn random_substrate_point(&mut self) -> Vec2 {
        random_point(&mut self.rng, &Rect::substrate().inset(SUBSTRATE_MARGIN))
    }

    fn spawn_animal(&mut self, species: Species, at: Vec2, parent: Option<Entity>) -> Entity {
        let animal = Animal::new(species, jitter(&mut self.rng, HUNGER_JITTER));
        let coin_timer = CoinTimer {
            remaining: roll_coin_interval(&animal, &mut self.rng),
        };
        let wander = Wander::new(
            (WANDER_SPEED_MIN, WANDER_SPEED_MAX),
            (WANDER_PAUSE_MIN, WANDER_PAUSE_MAX),
            Rect::substrate().inset(SUBSTRATE_MARGIN),
        );
        let entity = self.world.spawn((Position(at), animal, coin_timer, wander));

        self.outbox.emit(SimEvent::AnimalSpawned {
            animal: entity,
            species,
        });
        if let Some(parent) = parent {
            debug!("{:?} {:?} bred {:?}", species, parent, entity);
            self.outbox.emit(SimEvent::AnimalBred {
                parent,
                child: entity,
            });
        }
        entity
    }

    fn spawn_helper(&mut self, kind: HelperKind) -> Entity {
        let spawn_area = Rect::new(
            Vec2::new(HELPER_SPAWN_INSET_X, SUBSTRATE_TOP + HELPER_SPAWN_INSET_Y),
            Vec2::new(
                FIELD_WIDTH - HELPER_SPAWN_INSET_X,
                SUBSTRATE_BOTTOM - HELPER_SPAWN_INSET_Y,
            ),
        );
        let at = random_point(&mut self.rng, &spawn_area);
        let wander = Wander::new(
            (HELPER_SPEED, HELPER_SPEED),
            (HELPER_PAUSE_MIN, HELPER_PAUSE_MAX),
            Rect::substrate().inset(SUBSTRATE_MARGIN),
        );
        let pet = self.world.spawn((Position(at), HelperPet::new(kind), wander));

        let mut ctx = InstallContext {
            world: &mut self.world,
            hooks: &mut self.hooks,
            poacher_ai: &mut self.poacher_ai,
        };
        install_effect(&mut ctx, pet);
        pet
    }

    fn spawn_food(&mut self, at: Vec2, kind: FoodKind) -> Entity {
        let x = at.x.clamp(SUBSTRATE_MARGIN, FIELD_WIDTH - SUBSTRATE_MARGIN);
        // Everything lands on the substrate floor
        let settle_y = SUBSTRATE_BOTTOM - FOOD_SETTLE_OFFSET;
        let fall = (at.y < settle_y).then_some(Fall {
            from_y: at.y,
            to_y: settle_y,
            elapsed: 0.0,
        });
        let start_y = if fall.is_some() { at.y } else { settle_y };

        let heading = roll_heading(&mut self.rng);
        let turn = roll_range(&mut self.rng, FOOD_TURN_MIN, FOOD_TURN_MAX);
        self.world.spawn((
            Position::new(x, start_y),
            Food::new(kind, fall, heading, turn),
        ))
    }

    fn spawn_coin(&mut self, at: Vec2, value: u32) -> Entity {
        let coin = self.world.spawn((Position(at), Coin::new(value)));
        self.outbox.emit(SimEvent::CoinDropped {
            coin,
            x: at.x,
            y: at.y,
            value,
        });
        coin
    }

    fn collect_coin(&mut self, coin: Entity) -> bool {
        let (value, at) = match self.world.query_one_mut::<(&Coin, &Position)>(coin) {
            Ok((coin, pos)) => (coin.value, pos.0),
            Err(_) => return false,
        };
        let _ = self.world.despawn(coin);
        self.ledger.add_coins(value);
        self.outbox.emit(SimEvent::CoinCollected {
            value,
            x: at.x,
            y: at.y,
        });
        true
    }

    // ── Player commands ──

    /// Buy a baby animal. Fails if the species is locked or unaffordable.
    pub fn buy_animal(&mut self, species: Species) -> Option<Entity> {
        if !species.is_unlocked(self.level.level) {
            return None;
        }
        if !self.ledger.spend_coins(species.config().cost) {
            return None;
        }
        let at = self.random_substrate_point();
        let entity = self.spawn_animal(species, at, None);
        debug!("Bought {:?} {:?}", species, entity);
        self.flush_events();
        Some(entity)
    }

    /// Choose what `drop_food` drops. Locked foods are refused.
    pub fn select_food(&mut self, kind: FoodKind) -> bool {
        if !kind.is_unlocked(self.level.level) {
            return false;
        }
        self.selected_food = kind;
        true
    }

    pub fn selected_food(&self) -> FoodKind {
        self.selected_food
    }

    /// Drop the selected food at a click point. Clicks off the field, on the
    /// shop strip, and unaffordable food are refused.
    pub fn drop_food(&mut self, x: f32, y: f32) -> Option<Entity> {
        let at = Vec2::new(x, y);
        if !Rect::field().contains(&at) || in_shop_strip(&at) {
            return None;
        }
        let kind = self.selected_food;
        if !self.ledger.spend_coins(kind.config().cost) {
            return None;
        }
        let food = self.spawn_food(at, kind);
        self.flush_events();
        Some(food)
    }

    /// Pick up a coin. Stale handles are ignored.
    pub fn click_coin(&mut self, coin: Entity) -> bool {
        let collected = self.collect_coin(coin);
        self.flush_events();
        collected
    }

    /// Hit a poacher once. Returns false for stale handles and for poachers
    /// already on their way out.
    pub fn click_poacher(&mut self, poacher: Entity) -> bool {
        let outcome = damage_poacher(&mut self.world, poacher, &mut self.outbox);
        self.flush_events();
        matches!(
            outcome,
            Some(DamageOutcome::Damaged { .. } | DamageOutcome::Repelled)
        )
    }

    /// Buy an egg piece at the level's price. A completed egg wins the level.
    pub fn buy_egg_piece(&mut self, index: usize) -> bool {
        let Some(price) = self.level.egg_cost(index) else {
            return false;
        };
        if !self.ledger.purchase_egg_piece(index, price) {
            return false;
        }
        info!(
            "Egg piece {} bought ({}/{})",
            index + 1,
            self.ledger.egg_pieces_completed(),
            self.level.egg_costs.len()
        );
        self.level_manager.check_win(&self.ledger);
        self.flush_events();
        true
    }

    /// Debug shortcut: win the level now.
    pub fn force_win(&mut self) -> Option<LevelOutcome> {
        let outcome = self.level_manager.force_win()?;
        self.resolve(outcome);
        self.flush_events();
        Some(outcome)
    }

    // ── Queries ──

    /// Take every event since the last call
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn level(&self) -> &'static LevelConfig {
        self.level
    }

    pub fn coins(&self) -> u32 {
        self.ledger.coins()
    }

    pub fn ledger(&self) -> &EconomyLedger {
        &self.ledger
    }

    pub fn outcome(&self) -> Option<LevelOutcome> {
        self.level_manager.resolved()
    }

    pub fn is_resolved(&self) -> bool {
        self.level_manager.resolved().is_some()
    }

    pub fn poacher_ai(&self) -> &PoacherAi {
        &self.poacher_ai
    }

    pub fn living_animal_count(&self) -> usize {
        living_animal_count(&self.world)
    }

    /// Living animals with their positions
    pub fn animals(&self) -> Vec<(Entity, Species, Vec2)> {
        self.world
            .query::<(&Animal, &Position)>()
            .iter()
            .filter(|(_, (animal, _))| animal.alive)
            .map(|(entity, (animal, pos))| (entity, animal.species, pos.0))
            .collect()
    }

    /// Living animals currently showing the hungry cue
    pub fn hungry_animals(&self) -> Vec<(Entity, Vec2)> {
        self.world
            .query::<(&Animal, &Position)>()
            .iter()
            .filter(|(_, (animal, _))| animal.shows_thought_bubble())
            .map(|(entity, (_, pos))| (entity, pos.0))
            .collect()
    }

    pub fn coins_on_field(&self) -> Vec<(Entity, Vec2, u32)> {
        self.world
            .query::<(&Coin, &Position)>()
            .iter()
            .map(|(entity, (coin, pos))| (entity, pos.0, coin.value))
            .collect()
    }

    pub fn food_count(&self) -> usize {
        self.world.query::<&Food>().iter().count()
    }

    pub fn helper_count(&self) -> usize {
        self.world.query::<&HelperPet>().iter().count()
    }

    /// Poachers that can still be clicked
    pub fn active_poachers(&self) -> Vec<Entity> {
        self.world
            .query::<&Poacher>()
            .iter()
            .filter(|(_, poacher)| !poacher.is_terminal())
            .map(|(entity, _)| entity)
            .collect()
    }
}

impl Default for TerrariumEngine {
    fn default() -> Self {
        Self::new(TerrariumConfig::default())
    }
}
