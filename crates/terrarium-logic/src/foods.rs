//! Food catalog - what the player can drop into the terrarium.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Cricket,
    Mealworm,
    Roach,
}

impl FoodKind {
    pub const ALL: [FoodKind; 3] = [FoodKind::Cricket, FoodKind::Mealworm, FoodKind::Roach];

    pub fn config(self) -> &'static FoodConfig {
        match self {
            FoodKind::Cricket => &CRICKET,
            FoodKind::Mealworm => &MEALWORM,
            FoodKind::Roach => &ROACH,
        }
    }

    pub fn is_unlocked(self, level: u32) -> bool {
        self.config().unlock_level <= level
    }
}

/// Static tuning for one food type.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodConfig {
    pub key: &'static str,
    pub name: &'static str,
    pub cost: u32,
    /// Hunger units restored when eaten
    pub nutrition: f32,
    pub unlock_level: u32,
    /// Crawl speed in units per second
    pub speed: f32,
}

static CRICKET: FoodConfig = FoodConfig {
    key: "cricket",
    name: "Cricket",
    cost: 0,
    nutrition: 25.0,
    unlock_level: 1,
    speed: 40.0,
};

static MEALWORM: FoodConfig = FoodConfig {
    key: "mealworm",
    name: "Mealworm",
    cost: 5,
    nutrition: 50.0,
    unlock_level: 2,
    speed: 25.0,
};

static ROACH: FoodConfig = FoodConfig {
    key: "roach",
    name: "Dubia Roach",
    cost: 15,
    nutrition: 100.0,
    unlock_level: 4,
    speed: 30.0,
};

/// The free default food, also what the auto-feeder drops.
pub const DEFAULT_FOOD: FoodKind = FoodKind::Cricket;
