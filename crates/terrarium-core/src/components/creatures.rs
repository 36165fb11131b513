//! Terrarium inhabitants and the things they leave lying around:
//! Animal, Food, Coin.

use hecs::Entity;
use serde::{Deserialize, Serialize};
use terrarium_logic::animals::{AnimalConfig, Species};
use terrarium_logic::foods::FoodKind;

/// Below this fraction of max hunger an animal is hungry.
pub const HUNGER_THRESHOLD: f32 = 0.3;
/// Per-animal hunger rate spread, fixed at spawn.
pub const HUNGER_JITTER: f32 = 0.15;
/// Coin interval spread, re-rolled every cycle.
pub const COIN_JITTER: f32 = 0.3;
/// Normal cruising speed range while wandering.
pub const WANDER_SPEED_MIN: f32 = 50.0;
pub const WANDER_SPEED_MAX: f32 = 80.0;
/// Pause range between wander legs, seconds.
pub const WANDER_PAUSE_MIN: f32 = 1.0;
pub const WANDER_PAUSE_MAX: f32 = 3.0;
/// Speed when heading for food.
pub const SEEK_SPEED: f32 = WANDER_SPEED_MAX * 1.3;
/// Seconds a starved animal lingers before removal.
pub const DEATH_FADE_SECS: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeStage {
    Baby,
    Adult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Starved,
    Poached,
}

/// Result of offering food to an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Dead animals do not eat
    Ignored,
    Fed,
    /// This feeding completed the baby stage
    Grew,
}

/// A living (or freshly dead) terrarium animal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub species: Species,
    /// Current hunger, 0 (starved) to max_hunger (full)
    pub hunger: f32,
    pub stage: LifeStage,
    /// Feedings received as a baby
    pub feed_count: u32,
    pub alive: bool,
    /// Hunger rate multiplier fixed at spawn
    pub hunger_jitter: f32,
    /// Food this animal is heading for. Non-owning; checked every tick.
    #[serde(skip)]
    pub food_target: Option<Entity>,
}

impl Animal {
    pub fn new(species: Species, hunger_jitter: f32) -> Self {
        Self {
            species,
            hunger: species.config().max_hunger,
            stage: LifeStage::Baby,
            feed_count: 0,
            alive: true,
            hunger_jitter,
            food_target: None,
        }
    }

    pub fn config(&self) -> &'static AnimalConfig {
        self.species.config()
    }

    pub fn is_hungry(&self) -> bool {
        self.hunger < self.config().max_hunger * HUNGER_THRESHOLD
    }

    pub fn hunger_percent(&self) -> f32 {
        self.hunger / self.config().max_hunger
    }

    pub fn is_adult(&self) -> bool {
        self.stage == LifeStage::Adult
    }

    /// Whether the "feed me" cue should be visible.
    pub fn shows_thought_bubble(&self) -> bool {
        self.alive && self.is_hungry()
    }

    /// Current display scale for the life stage.
    pub fn display_scale(&self) -> f32 {
        match self.stage {
            LifeStage::Baby => self.config().baby_scale,
            LifeStage::Adult => self.config().adult_scale,
        }
    }

    /// Whether a coin drop may happen right now.
    pub fn can_drop_coin(&self) -> bool {
        self.alive && self.is_adult() && !self.is_hungry()
    }

    /// Burn hunger for `delta_seconds`. Returns true on the call that starves
    /// the animal; a dead animal never starves again.
    pub fn decay(&mut self, delta_seconds: f32) -> bool {
        if !self.alive {
            return false;
        }
        let cfg = self.config();
        self.hunger -= cfg.hunger_rate * self.hunger_jitter * delta_seconds;
        if self.hunger <= 0.0 {
            self.hunger = 0.0;
            self.kill();
            return true;
        }
        if !self.is_hungry() {
            self.food_target = None;
        }
        false
    }

    pub fn feed(&mut self, nutrition: f32) -> FeedOutcome {
        if !self.alive {
            return FeedOutcome::Ignored;
        }
        let cfg = self.config();
        self.hunger = (self.hunger + nutrition.max(0.0)).min(cfg.max_hunger);
        self.food_target = None;

        if self.stage == LifeStage::Baby {
            self.feed_count += 1;
            if self.feed_count >= cfg.feeds_to_grow {
                self.stage = LifeStage::Adult;
                return FeedOutcome::Grew;
            }
        }
        FeedOutcome::Fed
    }

    /// Offer a food item `distance` away. `current_distance` is the distance
    /// to the current target if it is still valid. Only a strictly closer
    /// food replaces the target.
    pub fn seek_food(
        &mut self,
        candidate: Entity,
        distance: f32,
        current_distance: Option<f32>,
    ) -> bool {
        if !self.alive || !self.is_hungry() {
            return false;
        }
        if let Some(current) = current_distance {
            if distance >= current {
                return false;
            }
        }
        self.food_target = Some(candidate);
        true
    }

    /// Mark dead. Returns false if it already was.
    pub fn kill(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.food_target = None;
        true
    }
}

/// Countdown to an animal's next coin drop attempt
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoinTimer {
    pub remaining: f32,
}

/// Seconds a dropped food item lives.
pub const FOOD_LIFETIME_SECS: f32 = 30.0;
/// Fade-out before an expired food item is removed.
pub const FOOD_FADE_SECS: f32 = 0.5;
/// Time to fall from the drop point to the substrate.
pub const FOOD_FALL_SECS: f32 = 0.4;
/// Food settles this far above the substrate bottom.
pub const FOOD_SETTLE_OFFSET: f32 = 16.0;
/// An animal this close to food eats it.
pub const EAT_RADIUS: f32 = 24.0;
/// Heading change interval range while roaming, seconds.
pub const FOOD_TURN_MIN: f32 = 1.0;
pub const FOOD_TURN_MAX: f32 = 3.0;

/// In-progress fall from the drop point
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fall {
    pub from_y: f32,
    pub to_y: f32,
    pub elapsed: f32,
}

/// A dropped food item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub kind: FoodKind,
    pub nutrition: f32,
    /// Seconds since it was dropped
    pub age: f32,
    /// `Some` while still falling
    pub fall: Option<Fall>,
    /// Roam direction in radians
    pub heading: f32,
    /// Seconds until the heading is re-rolled
    pub turn_remaining: f32,
}

impl Food {
    pub fn new(kind: FoodKind, fall: Option<Fall>, heading: f32, turn_remaining: f32) -> Self {
        Self {
            kind,
            nutrition: kind.config().nutrition,
            age: 0.0,
            fall,
            heading,
            turn_remaining,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.fall.is_none()
    }

    pub fn speed(&self) -> f32 {
        self.kind.config().speed
    }

    pub fn is_expired(&self) -> bool {
        self.age >= FOOD_LIFETIME_SECS
    }
}

/// Seconds before an uncollected coin disappears.
pub const COIN_LIFETIME_SECS: f32 = 15.0;
/// Age at which the expiry fade starts.
pub const COIN_FADE_START_SECS: f32 = 12.0;
/// Lowest alpha reached while fading.
pub const COIN_MIN_ALPHA: f32 = 0.2;
/// Spawn flourish: rise and fall over this long.
pub const COIN_FLOAT_SECS: f32 = 0.5;
pub const COIN_FLOAT_HEIGHT: f32 = 30.0;

/// Cosmetic value tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinTier {
    Bronze,
    Silver,
    Gold,
}

impl CoinTier {
    pub fn from_value(value: u32) -> Self {
        if value >= 100 {
            CoinTier::Gold
        } else if value >= 25 {
            CoinTier::Silver
        } else {
            CoinTier::Bronze
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coin {
    pub value: u32,
    /// Seconds since it spawned
    pub age: f32,
}

impl Coin {
    pub fn new(value: u32) -> Self {
        Self { value, age: 0.0 }
    }

    pub fn is_expired(&self) -> bool {
        self.age >= COIN_LIFETIME_SECS
    }

    /// Display alpha: opaque until the fade starts, then down to 0.2.
    pub fn alpha(&self) -> f32 {
        if self.age <= COIN_FADE_START_SECS {
            return 1.0;
        }
        let remaining = COIN_LIFETIME_SECS - self.age;
        (remaining / (COIN_LIFETIME_SECS - COIN_FADE_START_SECS)).max(COIN_MIN_ALPHA)
    }

    /// Vertical offset of the spawn flourish (negative is up).
    pub fn float_offset(&self) -> f32 {
        if self.age >= COIN_FLOAT_SECS {
            return 0.0;
        }
        let half = COIN_FLOAT_SECS / 2.0;
        let t = if self.age < half {
            self.age / half
        } else {
            (COIN_FLOAT_SECS - self.age) / half
        };
        -COIN_FLOAT_HEIGHT * t
    }

    pub fn tier(&self) -> CoinTier {
        CoinTier::from_value(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gecko() -> Animal {
        Animal::new(Species::Gecko, 1.0)
    }

    #[test]
    fn test_starves_exactly_once() {
        // max 100, 3/s, no jitter → dead on the 34th second
        let mut animal = gecko();
        let mut deaths = 0;
        for second in 1..=40 {
            if animal.decay(1.0) {
                deaths += 1;
                assert_eq!(second, 34);
            }
            assert!(animal.hunger >= 0.0);
        }
        assert_eq!(deaths, 1);
        assert!(!animal.alive);
        assert_eq!(animal.hunger, 0.0);
    }

    #[test]
    fn test_hunger_strictly_decreases() {
        let mut animal = gecko();
        let mut last = animal.hunger;
        for _ in 0..30 {
            animal.decay(0.5);
            assert!(animal.hunger < last);
            last = animal.hunger;
        }
    }

    #[test]
    fn test_grows_after_third_feed() {
        let mut animal = gecko();
        assert_eq!(animal.feed(10.0), FeedOutcome::Fed);
        assert_eq!(animal.feed(10.0), FeedOutcome::Fed);
        assert_eq!(animal.stage, LifeStage::Baby);
        assert_eq!(animal.feed(10.0), FeedOutcome::Grew);
        assert_eq!(animal.stage, LifeStage::Adult);
        // Adults keep eating but no longer count feeds
        assert_eq!(animal.feed(10.0), FeedOutcome::Fed);
        assert_eq!(animal.feed_count, 3);
        assert!((animal.display_scale() - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_feed_caps_at_max() {
        let mut animal = gecko();
        animal.hunger = 90.0;
        animal.feed(25.0);
        assert_eq!(animal.hunger, 100.0);
    }

    #[test]
    fn test_feed_dead_is_ignored() {
        let mut animal = gecko();
        animal.kill();
        let before = animal.clone();
        assert_eq!(animal.feed(50.0), FeedOutcome::Ignored);
        assert_eq!(animal.hunger, before.hunger);
        assert_eq!(animal.feed_count, before.feed_count);
        assert!(!animal.kill());
        assert!(!animal.decay(100.0));
    }

    #[test]
    fn test_hungry_threshold() {
        let mut animal = gecko();
        animal.hunger = 30.0;
        assert!(!animal.is_hungry());
        animal.hunger = 29.9;
        assert!(animal.is_hungry());
        assert!(animal.shows_thought_bubble());
    }

    #[test]
    fn test_seek_food_prefers_strictly_closer() {
        let mut world = hecs::World::new();
        let near = world.spawn(());
        let far = world.spawn(());

        let mut animal = gecko();
        // Not hungry: refuses
        assert!(!animal.seek_food(far, 100.0, None));

        animal.hunger = 10.0;
        assert!(animal.seek_food(far, 100.0, None));
        assert!(!animal.seek_food(near, 100.0, Some(100.0)));
        assert!(animal.seek_food(near, 40.0, Some(100.0)));
        assert_eq!(animal.food_target, Some(near));
    }

    #[test]
    fn test_sated_animal_drops_target() {
        let mut world = hecs::World::new();
        let food = world.spawn(());
        let mut animal = gecko();
        animal.hunger = 10.0;
        animal.seek_food(food, 5.0, None);
        animal.hunger = 80.0;
        animal.decay(0.1);
        assert!(animal.food_target.is_none());
    }

    #[test]
    fn test_coin_drop_gate() {
        let mut animal = gecko();
        assert!(!animal.can_drop_coin()); // baby
        animal.stage = LifeStage::Adult;
        assert!(animal.can_drop_coin());
        animal.hunger = 5.0;
        assert!(!animal.can_drop_coin()); // hungry
    }

    #[test]
    fn test_coin_fade() {
        let mut coin = Coin::new(15);
        assert_eq!(coin.alpha(), 1.0);
        coin.age = 13.5;
        assert!((coin.alpha() - 0.5).abs() < 0.001);
        coin.age = 14.9;
        assert!((coin.alpha() - COIN_MIN_ALPHA).abs() < 0.001);
        assert!(!coin.is_expired());
        coin.age = 15.0;
        assert!(coin.is_expired());
    }

    #[test]
    fn test_coin_float_offset() {
        let mut coin = Coin::new(1);
        assert_eq!(coin.float_offset(), 0.0);
        coin.age = 0.25;
        assert!((coin.float_offset() + COIN_FLOAT_HEIGHT).abs() < 0.001);
        coin.age = 0.6;
        assert_eq!(coin.float_offset(), 0.0);
    }

    #[test]
    fn test_coin_tiers() {
        assert_eq!(CoinTier::from_value(1), CoinTier::Bronze);
        assert_eq!(CoinTier::from_value(30), CoinTier::Silver);
        assert_eq!(CoinTier::from_value(250), CoinTier::Gold);
    }
}
