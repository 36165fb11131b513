//! Level win/loss determination.
//!
//! A level is won once every egg piece is bought and lost once the terrarium
//! is empty and the player cannot afford to restock it. Either outcome is
//! latched the moment it is detected and reported after a short delay, so a
//! burst of notifications in one tick still resolves the level exactly once.

use crate::animals::cheapest_unlocked_cost;
use crate::economy::EconomyLedger;
use crate::levels::TOTAL_LEVELS;

/// Seconds between detecting a win and reporting it.
pub const WIN_DELAY_SECS: f32 = 0.5;
/// Seconds between detecting a loss and reporting it.
pub const GAME_OVER_DELAY_SECS: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// All egg pieces bought. `final_level` tells the next screen whether to
    /// show the game win or the pet-selection step.
    Won { level: u32, final_level: bool },
    /// No animals left and none affordable.
    GameOver { level: u32 },
}

#[derive(Debug, Clone, Copy)]
struct PendingOutcome {
    outcome: LevelOutcome,
    remaining: f32,
}

#[derive(Debug, Clone)]
pub struct LevelManager {
    level: u32,
    win_triggered: bool,
    game_over_triggered: bool,
    pending: Option<PendingOutcome>,
    resolved: Option<LevelOutcome>,
}

impl LevelManager {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            win_triggered: false,
            game_over_triggered: false,
            pending: None,
            resolved: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    fn won(&self) -> LevelOutcome {
        LevelOutcome::Won {
            level: self.level,
            final_level: self.level >= TOTAL_LEVELS,
        }
    }

    fn decided(&self) -> bool {
        self.win_triggered || self.game_over_triggered
    }

    /// Latch a win if every egg piece is bought. Returns true only on the
    /// call that latches it.
    pub fn check_win(&mut self, ledger: &EconomyLedger) -> bool {
        if self.decided() || !ledger.all_eggs_bought() {
            return false;
        }
        self.win_triggered = true;
        self.pending = Some(PendingOutcome {
            outcome: self.won(),
            remaining: WIN_DELAY_SECS,
        });
        true
    }

    /// Latch a loss if no animal is alive and the cheapest animal unlocked at
    /// this level is out of reach. Never fires while an animal lives.
    pub fn check_game_over(&mut self, living_animals: usize, balance: u32) -> bool {
        if self.decided() || living_animals > 0 {
            return false;
        }
        let stuck = cheapest_unlocked_cost(self.level).map_or(true, |cost| balance < cost);
        if !stuck {
            return false;
        }
        self.game_over_triggered = true;
        self.pending = Some(PendingOutcome {
            outcome: LevelOutcome::GameOver { level: self.level },
            remaining: GAME_OVER_DELAY_SECS,
        });
        true
    }

    /// Resolve the level as won immediately, skipping the delay.
    pub fn force_win(&mut self) -> Option<LevelOutcome> {
        if self.decided() {
            return None;
        }
        self.win_triggered = true;
        let outcome = self.won();
        self.resolved = Some(outcome);
        Some(outcome)
    }

    /// Advance the pending transition. Returns the outcome on the tick its
    /// delay elapses and never again.
    pub fn tick(&mut self, delta_seconds: f32) -> Option<LevelOutcome> {
        let pending = self.pending.as_mut()?;
        pending.remaining -= delta_seconds;
        if pending.remaining > 0.0 {
            return None;
        }
        let outcome = pending.outcome;
        self.pending = None;
        self.resolved = Some(outcome);
        Some(outcome)
    }

    /// The reported outcome, once its delay has elapsed.
    pub fn resolved(&self) -> Option<LevelOutcome> {
        self.resolved
    }

    pub fn win_triggered(&self) -> bool {
        self.win_triggered
    }

    pub fn game_over_triggered(&self) -> bool {
        self.game_over_triggered
    }
}
