//! Animal species catalog - purchase costs, income, hunger and growth tuning.

use serde::{Deserialize, Serialize};

/// Purchasable animal species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Gecko,
    Frog,
    Chameleon,
    Salamander,
    Dragon,
}

impl Species {
    /// Every species in shop order.
    pub const ALL: [Species; 5] = [
        Species::Gecko,
        Species::Frog,
        Species::Chameleon,
        Species::Salamander,
        Species::Dragon,
    ];

    pub fn config(self) -> &'static AnimalConfig {
        match self {
            Species::Gecko => &GECKO,
            Species::Frog => &FROG,
            Species::Chameleon => &CHAMELEON,
            Species::Salamander => &SALAMANDER,
            Species::Dragon => &DRAGON,
        }
    }

    pub fn key(self) -> &'static str {
        self.config().key
    }

    /// Look up a species by its catalog key (`"gecko"`, `"dragon"`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn is_unlocked(self, level: u32) -> bool {
        self.config().unlock_level <= level
    }
}

/// Static tuning for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimalConfig {
    pub key: &'static str,
    pub name: &'static str,
    pub cost: u32,
    /// Base time between coin drops, milliseconds
    pub coin_drop_interval_ms: u32,
    pub coin_value: u32,
    /// Hunger units lost per second
    pub hunger_rate: f32,
    pub max_hunger: f32,
    pub unlock_level: u32,
    /// Display scale once grown
    pub adult_scale: f32,
    /// Display scale as a baby
    pub baby_scale: f32,
    /// Feedings needed before a baby becomes an adult (always >= 1)
    pub feeds_to_grow: u32,
}

impl AnimalConfig {
    pub fn coin_drop_interval_secs(&self) -> f32 {
        self.coin_drop_interval_ms as f32 / 1000.0
    }
}

static GECKO: AnimalConfig = AnimalConfig {
    key: "gecko",
    name: "Small Gecko",
    cost: 100,
    coin_drop_interval_ms: 8000,
    coin_value: 15,
    hunger_rate: 3.0,
    max_hunger: 100.0,
    unlock_level: 1,
    adult_scale: 0.1,
    baby_scale: 0.06,
    feeds_to_grow: 3,
};

static FROG: AnimalConfig = AnimalConfig {
    key: "frog",
    name: "Tree Frog",
    cost: 200,
    coin_drop_interval_ms: 10_000,
    coin_value: 30,
    hunger_rate: 3.5,
    max_hunger: 100.0,
    unlock_level: 1,
    adult_scale: 0.1,
    baby_scale: 0.06,
    feeds_to_grow: 3,
};

static CHAMELEON: AnimalConfig = AnimalConfig {
    key: "chameleon",
    name: "Chameleon",
    cost: 500,
    coin_drop_interval_ms: 15_000,
    coin_value: 80,
    hunger_rate: 4.0,
    max_hunger: 100.0,
    unlock_level: 2,
    adult_scale: 0.12,
    baby_scale: 0.07,
    feeds_to_grow: 4,
};

static SALAMANDER: AnimalConfig = AnimalConfig {
    key: "salamander",
    name: "Salamander",
    cost: 750,
    coin_drop_interval_ms: 12_000,
    coin_value: 100,
    hunger_rate: 4.5,
    max_hunger: 100.0,
    unlock_level: 3,
    adult_scale: 0.12,
    baby_scale: 0.07,
    feeds_to_grow: 4,
};

static DRAGON: AnimalConfig = AnimalConfig {
    key: "dragon",
    name: "Bearded Dragon",
    cost: 1500,
    coin_drop_interval_ms: 18_000,
    coin_value: 250,
    hunger_rate: 5.0,
    max_hunger: 100.0,
    unlock_level: 4,
    adult_scale: 0.15,
    baby_scale: 0.09,
    feeds_to_grow: 5,
};

/// Species available for purchase at `level`.
pub fn unlocked_species(level: u32) -> impl Iterator<Item = Species> {
    Species::ALL.into_iter().filter(move |s| s.is_unlocked(level))
}

/// Cost of the cheapest animal purchasable at `level`, `None` if nothing is
/// unlocked yet.
pub fn cheapest_unlocked_cost(level: u32) -> Option<u32> {
    unlocked_species(level).map(|s| s.config().cost).min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_invariants() {
        for species in Species::ALL {
            let cfg = species.config();
            assert!(cfg.feeds_to_grow >= 1, "{} feeds_to_grow", cfg.key);
            assert!(cfg.hunger_rate > 0.0, "{} hunger_rate", cfg.key);
            assert!(cfg.max_hunger > 0.0);
            assert!(cfg.baby_scale < cfg.adult_scale);
        }
    }

    #[test]
    fn test_key_roundtrip() {
        for species in Species::ALL {
            assert_eq!(Species::from_key(species.key()), Some(species));
        }
        assert_eq!(Species::from_key("unicorn"), None);
    }

    #[test]
    fn test_unlocks_by_level() {
        let level1: Vec<_> = unlocked_species(1).collect();
        assert_eq!(level1, vec![Species::Gecko, Species::Frog]);
        assert_eq!(unlocked_species(4).count(), 5);
        assert!(!Species::Chameleon.is_unlocked(1));
        assert!(Species::Chameleon.is_unlocked(2));
    }

    #[test]
    fn test_cheapest_unlocked_cost() {
        assert_eq!(cheapest_unlocked_cost(1), Some(100));
        assert_eq!(cheapest_unlocked_cost(5), Some(100));
        assert_eq!(cheapest_unlocked_cost(0), None);
    }

    #[test]
    fn test_interval_secs() {
        assert!((Species::Gecko.config().coin_drop_interval_secs() - 8.0).abs() < f32::EPSILON);
    }
}
