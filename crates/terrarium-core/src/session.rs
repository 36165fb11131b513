//! Game session - level progression and the helper pet roster.
//!
//! The roster is the only state that outlives a level. A [`GameSession`]
//! owns it, builds a fresh [`TerrariumEngine`] for each level, and after a
//! win offers helper pets to add before moving on.

use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use terrarium_logic::animals::Species;
use terrarium_logic::helpers::HelperKind;
use terrarium_logic::outcome::LevelOutcome;

use crate::engine::{TerrariumConfig, TerrariumEngine};

/// Pets offered after a win, at most.
pub const DEFAULT_PET_CHOICES: usize = 2;

/// Helper pets owned in the current game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRoster {
    owned: Vec<HelperKind>,
}

impl PetRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pet. Owning the same pet twice is not possible.
    pub fn add(&mut self, kind: HelperKind) -> bool {
        if self.has(kind) {
            return false;
        }
        self.owned.push(kind);
        true
    }

    pub fn has(&self, kind: HelperKind) -> bool {
        self.owned.contains(&kind)
    }

    pub fn owned(&self) -> &[HelperKind] {
        &self.owned
    }

    pub fn unowned(&self) -> Vec<HelperKind> {
        HelperKind::ALL
            .iter()
            .copied()
            .filter(|kind| !self.has(*kind))
            .collect()
    }

    /// A shuffled pick of unowned pets: at least one while any remain, never
    /// more than `max_choices`.
    pub fn random_choices(&self, rng: &mut impl Rng, max_choices: usize) -> Vec<HelperKind> {
        let mut unowned = self.unowned();
        if unowned.is_empty() {
            return unowned;
        }
        unowned.shuffle(rng);
        let count = max_choices.min(unowned.len()).max(1);
        unowned.truncate(count);
        unowned
    }

    pub fn reset(&mut self) {
        self.owned.clear();
    }
}

/// Where the session stands between levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// A level is being played (or about to be started)
    Playing,
    /// Won a level; waiting for a pet choice
    ChoosingPet,
    /// Lost; only a restart continues
    GameOver,
    /// Won the final level
    Finished,
}

/// One playthrough from level 1 to the end
pub struct GameSession {
    seed: u64,
    level: u32,
    roster: PetRoster,
    starter_species: Option<Species>,
    phase: SessionPhase,
    rng: StdRng,
    engine: Option<TerrariumEngine>,
}

impl GameSession {
    pub fn new_game(seed: u64) -> Self {
        Self {
            seed,
            level: 1,
            roster: PetRoster::new(),
            starter_species: Some(Species::Gecko),
            phase: SessionPhase::Playing,
            rng: StdRng::seed_from_u64(seed),
            engine: None,
        }
    }

    /// Resume from a saved roster at `level`.
    pub fn resume(seed: u64, level: u32, roster: PetRoster) -> Self {
        Self {
            level,
            roster,
            ..Self::new_game(seed)
        }
    }

    /// Free animal granted at each level start; `None` for none.
    pub fn set_starter_species(&mut self, species: Option<Species>) {
        self.starter_species = species;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn roster(&self) -> &PetRoster {
        &self.roster
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn engine(&self) -> Option<&TerrariumEngine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut TerrariumEngine> {
        self.engine.as_mut()
    }

    /// Config for the current level, carrying the roster into it.
    pub fn level_config(&self) -> TerrariumConfig {
        TerrariumConfig {
            seed: self.seed.wrapping_add(self.level as u64),
            level: self.level,
            starter_species: self.starter_species,
            owned_helpers: self.roster.owned().to_vec(),
        }
    }

    /// Build the engine for the current level.
    pub fn start_level(&mut self) -> &mut TerrariumEngine {
        self.phase = SessionPhase::Playing;
        let config = self.level_config();
        self.engine.insert(TerrariumEngine::new(config))
    }

    /// Fold a resolved level outcome into the session phase. Returns the
    /// outcome the first time it is seen.
    pub fn poll_outcome(&mut self) -> Option<LevelOutcome> {
        if self.phase != SessionPhase::Playing {
            return None;
        }
        let outcome = self.engine.as_ref()?.outcome()?;
        self.phase = match outcome {
            LevelOutcome::Won {
                final_level: true, ..
            } => SessionPhase::Finished,
            LevelOutcome::Won { .. } => SessionPhase::ChoosingPet,
            LevelOutcome::GameOver { .. } => SessionPhase::GameOver,
        };
        info!("Session at level {} now {:?}", self.level, self.phase);
        Some(outcome)
    }

    /// Pets to pick from after a win. Empty outside the pet choice step or
    /// once every pet is owned.
    pub fn pet_choices(&mut self, max_choices: usize) -> Vec<HelperKind> {
        if self.phase != SessionPhase::ChoosingPet {
            return Vec::new();
        }
        self.roster.random_choices(&mut self.rng, max_choices)
    }

    /// Take `kind` and move on to the next level.
    pub fn choose_pet(&mut self, kind: HelperKind) -> bool {
        if self.phase != SessionPhase::ChoosingPet || !self.roster.add(kind) {
            return false;
        }
        info!("Adopted {} for level {}", kind.config().name, self.level + 1);
        self.advance();
        true
    }

    /// Move on after a win when no pet is left to choose.
    pub fn continue_without_pet(&mut self) -> bool {
        if self.phase != SessionPhase::ChoosingPet || !self.roster.unowned().is_empty() {
            return false;
        }
        self.advance();
        true
    }

    fn advance(&mut self) {
        self.level += 1;
        self.phase = SessionPhase::Playing;
        self.engine = None;
    }

    /// Back to level 1 with an empty roster.
    pub fn restart(&mut self) {
        info!("Session restarted");
        self.level = 1;
        self.roster.reset();
        self.phase = SessionPhase::Playing;
        self.engine = None;
    }
}
