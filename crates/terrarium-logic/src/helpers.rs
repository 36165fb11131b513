//! Helper pet catalog.
//!
//! Every helper carries exactly one [`HelperEffect`]; the variant is the role
//! and its fields are the tuning. The engine installs effects by matching on
//! the variant, so adding a role means adding a variant here and an installer
//! in `terrarium-core`.

use serde::{Deserialize, Serialize};

/// Ownable helper pets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelperKind {
    Tortoise,
    HermitCrab,
    Mantis,
    Snail,
    Beetle,
    Scorpion,
    Snake,
    Millipede,
}

impl HelperKind {
    pub const ALL: [HelperKind; 8] = [
        HelperKind::Tortoise,
        HelperKind::HermitCrab,
        HelperKind::Mantis,
        HelperKind::Snail,
        HelperKind::Beetle,
        HelperKind::Scorpion,
        HelperKind::Snake,
        HelperKind::Millipede,
    ];

    pub fn config(self) -> &'static HelperPetConfig {
        match self {
            HelperKind::Tortoise => &TORTOISE,
            HelperKind::HermitCrab => &HERMIT_CRAB,
            HelperKind::Mantis => &MANTIS,
            HelperKind::Snail => &SNAIL,
            HelperKind::Beetle => &BEETLE,
            HelperKind::Scorpion => &SCORPION,
            HelperKind::Snake => &SNAKE,
            HelperKind::Millipede => &MILLIPEDE,
        }
    }

    pub fn role(self) -> HelperRole {
        self.config().effect.role()
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.config().key == key)
    }
}

/// What a helper does, without its tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelperRole {
    AutoFeeder,
    CoinCollector,
    Guard,
    CoinBooster,
    FoodUpgrader,
    Intimidator,
    Breeder,
    Scavenger,
}

/// A helper's rule modification and its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HelperEffect {
    /// Drops a free cricket at the pet every `interval_ms`.
    AutoFeeder { interval_ms: u32 },
    /// Collects every live coin within `collect_radius` of the pet.
    CoinCollector { collect_radius: f32, scan_interval_ms: u32 },
    /// Damages active poachers once per `damage_interval_ms`.
    Guard { damage_interval_ms: u32 },
    /// Coin drops within `boost_radius` of the pet are worth more.
    CoinBooster { boost_radius: f32, boost_multiplier: f32 },
    /// All food restores more hunger.
    FoodUpgrader { nutrition_multiplier: f32 },
    /// Poachers move at `slow_factor` of their speed.
    Intimidator { slow_factor: f32 },
    /// Chance that a fed animal produces a baby of its species.
    Breeder { breed_chance: f32 },
    /// Emits a coin at the pet every `coin_interval_ms`.
    Scavenger { coin_interval_ms: u32, coin_value: u32 },
}

impl HelperEffect {
    pub fn role(&self) -> HelperRole {
        match self {
            HelperEffect::AutoFeeder { .. } => HelperRole::AutoFeeder,
            HelperEffect::CoinCollector { .. } => HelperRole::CoinCollector,
            HelperEffect::Guard { .. } => HelperRole::Guard,
            HelperEffect::CoinBooster { .. } => HelperRole::CoinBooster,
            HelperEffect::FoodUpgrader { .. } => HelperRole::FoodUpgrader,
            HelperEffect::Intimidator { .. } => HelperRole::Intimidator,
            HelperEffect::Breeder { .. } => HelperRole::Breeder,
            HelperEffect::Scavenger { .. } => HelperRole::Scavenger,
        }
    }

    /// Period of the effect's recurring action, `None` for passive hooks.
    pub fn period_ms(&self) -> Option<u32> {
        match *self {
            HelperEffect::AutoFeeder { interval_ms } => Some(interval_ms),
            HelperEffect::CoinCollector { scan_interval_ms, .. } => Some(scan_interval_ms),
            HelperEffect::Scavenger { coin_interval_ms, .. } => Some(coin_interval_ms),
            _ => None,
        }
    }
}

/// Static description of one helper pet.
#[derive(Debug, Clone, PartialEq)]
pub struct HelperPetConfig {
    pub kind: HelperKind,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: HelperEffect,
}

static TORTOISE: HelperPetConfig = HelperPetConfig {
    kind: HelperKind::Tortoise,
    key: "tortoise",
    name: "Tortoise",
    description: "Drops crickets automatically every 20s",
    effect: HelperEffect::AutoFeeder { interval_ms: 20_000 },
};

static HERMIT_CRAB: HelperPetConfig = HelperPetConfig {
    kind: HelperKind::HermitCrab,
    key: "hermit_crab",
    name: "Hermit Crab",
    description: "Automatically picks up nearby coins",
    effect: HelperEffect::CoinCollector {
        collect_radius: 120.0,
        scan_interval_ms: 500,
    },
};

static MANTIS: HelperPetConfig = HelperPetConfig {
    kind: HelperKind::Mantis,
    key: "mantis",
    name: "Praying Mantis",
    description: "Attacks the poacher hand (1 click/sec)",
    effect: HelperEffect::Guard {
        damage_interval_ms: 1000,
    },
};

static SNAIL: HelperPetConfig = HelperPetConfig {
    kind: HelperKind::Snail,
    key: "snail",
    name: "Snail",
    description: "Nearby animals drop +50% coin value",
    effect: HelperEffect::CoinBooster {
        boost_radius: 150.0,
        boost_multiplier: 1.5,
    },
};

static BEETLE: HelperPetConfig = HelperPetConfig {
    kind: HelperKind::Beetle,
    key: "beetle",
    name: "Beetle",
    description: "Food fills 2x hunger",
    effect: HelperEffect::FoodUpgrader {
        nutrition_multiplier: 2.0,
    },
};

static SCORPION: HelperPetConfig = HelperPetConfig {
    kind: HelperKind::Scorpion,
    key: "scorpion",
    name: "Scorpion",
    description: "Poacher hand moves 30% slower",
    effect: HelperEffect::Intimidator { slow_factor: 0.7 },
};

static SNAKE: HelperPetConfig = HelperPetConfig {
    kind: HelperKind::Snake,
    key: "snake",
    name: "Tree Snake",
    description: "10% chance an animal duplicates when fed",
    effect: HelperEffect::Breeder { breed_chance: 0.1 },
};

static MILLIPEDE: HelperPetConfig = HelperPetConfig {
    kind: HelperKind::Millipede,
    key: "millipede",
    name: "Millipede",
    description: "Produces 1 coin every 10s on its own",
    effect: HelperEffect::Scavenger {
        coin_interval_ms: 10_000,
        coin_value: 1,
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_one_pet_per_role() {
        let roles: HashSet<_> = HelperKind::ALL.iter().map(|k| k.role()).collect();
        assert_eq!(roles.len(), HelperKind::ALL.len());
    }

    #[test]
    fn test_config_kind_matches() {
        for kind in HelperKind::ALL {
            assert_eq!(kind.config().kind, kind);
            assert_eq!(HelperKind::from_key(kind.config().key), Some(kind));
        }
    }

    #[test]
    fn test_periodic_effects() {
        assert_eq!(HelperKind::Tortoise.config().effect.period_ms(), Some(20_000));
        assert_eq!(HelperKind::HermitCrab.config().effect.period_ms(), Some(500));
        assert_eq!(HelperKind::Millipede.config().effect.period_ms(), Some(10_000));
        assert_eq!(HelperKind::Snail.config().effect.period_ms(), None);
        assert_eq!(HelperKind::Mantis.config().effect.period_ms(), None);
    }

    #[test]
    fn test_intimidator_slows() {
        match HelperKind::Scorpion.config().effect {
            HelperEffect::Intimidator { slow_factor } => assert!(slow_factor < 1.0),
            other => panic!("unexpected effect {:?}", other),
        }
    }
}
