//! Level catalog - starting coins, egg piece prices and poacher tuning.

use serde::{Deserialize, Serialize};

/// Number of levels in a full game.
pub const TOTAL_LEVELS: u32 = 5;

/// Egg pieces to buy per level.
pub const EGG_PIECES: usize = 3;

/// Threat tuning for a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoacherConfig {
    /// Clicks needed to drive a poacher off
    pub clicks_to_repel: u32,
    /// Milliseconds between spawn attempts
    pub frequency_ms: u32,
    /// Movement speed in units per second
    pub speed: f32,
    /// How many poachers may be active at once
    pub max_overlapping: usize,
}

impl PoacherConfig {
    pub fn frequency_secs(&self) -> f32 {
        self.frequency_ms as f32 / 1000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    pub start_coins: u32,
    pub egg_costs: [u32; EGG_PIECES],
    /// `None` disables the threat for the level
    pub poacher: Option<PoacherConfig>,
}

impl LevelConfig {
    pub fn is_final(&self) -> bool {
        self.level >= TOTAL_LEVELS
    }

    pub fn egg_cost(&self, index: usize) -> Option<u32> {
        self.egg_costs.get(index).copied()
    }

    pub fn total_egg_cost(&self) -> u32 {
        self.egg_costs.iter().sum()
    }
}

static LEVELS: [LevelConfig; TOTAL_LEVELS as usize] = [
    LevelConfig {
        level: 1,
        start_coins: 200,
        egg_costs: [300, 500, 800],
        poacher: None,
    },
    LevelConfig {
        level: 2,
        start_coins: 200,
        egg_costs: [500, 800, 1200],
        poacher: Some(PoacherConfig {
            clicks_to_repel: 3,
            frequency_ms: 90_000,
            speed: 30.0,
            max_overlapping: 1,
        }),
    },
    LevelConfig {
        level: 3,
        start_coins: 300,
        egg_costs: [800, 1200, 2000],
        poacher: Some(PoacherConfig {
            clicks_to_repel: 5,
            frequency_ms: 70_000,
            speed: 45.0,
            max_overlapping: 1,
        }),
    },
    LevelConfig {
        level: 4,
        start_coins: 300,
        egg_costs: [1500, 2500, 4000],
        poacher: Some(PoacherConfig {
            clicks_to_repel: 8,
            frequency_ms: 50_000,
            speed: 60.0,
            max_overlapping: 2,
        }),
    },
    LevelConfig {
        level: 5,
        start_coins: 400,
        egg_costs: [3000, 5000, 8000],
        poacher: Some(PoacherConfig {
            clicks_to_repel: 12,
            frequency_ms: 40_000,
            speed: 75.0,
            max_overlapping: 2,
        }),
    },
];

/// Configuration for a 1-based level. Out-of-range levels get level 1.
pub fn level_config(level: u32) -> &'static LevelConfig {
    level
        .checked_sub(1)
        .and_then(|i| LEVELS.get(i as usize))
        .unwrap_or(&LEVELS[0])
}

/// All levels in play order.
pub fn all_levels() -> &'static [LevelConfig] {
    &LEVELS
}
