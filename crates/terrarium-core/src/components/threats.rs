//! The poacher: a hand that reaches into the terrarium to steal an animal.

use hecs::Entity;
use serde::{Deserialize, Serialize};
use terrarium_logic::levels::PoacherConfig;

use super::Countdown;

/// Seconds the entrance slide takes.
pub const ENTER_SECS: f32 = 1.5;
/// Within this distance of its target the poacher grabs it.
pub const CAPTURE_RADIUS: f32 = 20.0;
/// Duration of the grab exit before both leave the field.
pub const GRAB_EXIT_SECS: f32 = 1.0;
/// Duration of the repelled exit.
pub const RETREAT_EXIT_SECS: f32 = 0.8;
/// Spawn height, just above the field.
pub const SPAWN_Y: f32 = -40.0;
/// Height terminal exits travel to.
pub const EXIT_Y: f32 = -100.0;
/// Horizontal spawn range.
pub const SPAWN_X_MIN: f32 = 100.0;
pub const SPAWN_X_MAX: f32 = 924.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoacherState {
    /// Sliding into the field
    Entering,
    /// Closing in on the target
    Seeking,
    /// Terminal: leaving with the target
    Grabbing,
    /// Terminal: driven off
    Retreating,
}

/// Result of a click on a poacher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already grabbing or retreating
    Ignored,
    Damaged { remaining: u32 },
    /// This hit drove it off
    Repelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poacher {
    pub clicks_remaining: u32,
    pub max_clicks: u32,
    pub base_speed: f32,
    pub speed_multiplier: f32,
    /// Animal being hunted. Non-owning; checked every tick.
    #[serde(skip)]
    pub target: Option<Entity>,
    pub state: PoacherState,
    /// Seconds spent in the current state
    pub state_time: f32,
    /// Entrance slide endpoints
    pub enter_from_y: f32,
    pub enter_to_y: f32,
    /// Height when the current terminal exit began
    pub exit_from_y: f32,
    /// Passive damage installed by a guard helper
    pub auto_damage: Option<Countdown>,
}

impl Poacher {
    pub fn new(config: &PoacherConfig, enter_to_y: f32) -> Self {
        Self {
            clicks_remaining: config.clicks_to_repel,
            max_clicks: config.clicks_to_repel,
            base_speed: config.speed,
            speed_multiplier: 1.0,
            target: None,
            state: PoacherState::Entering,
            state_time: 0.0,
            enter_from_y: SPAWN_Y,
            enter_to_y,
            exit_from_y: SPAWN_Y,
            auto_damage: None,
        }
    }

    pub fn speed(&self) -> f32 {
        self.base_speed * self.speed_multiplier
    }

    /// Scale speed relative to the configured base. Repeated calls replace,
    /// not compound.
    pub fn set_speed_multiplier(&mut self, factor: f32) {
        self.speed_multiplier = factor.max(0.0);
    }

    pub fn set_target(&mut self, animal: Entity) {
        self.target = Some(animal);
    }

    /// Passive damage every `interval_ms`; 0 removes it.
    pub fn set_auto_damage_interval(&mut self, interval_ms: u32) {
        self.auto_damage = (interval_ms > 0).then(|| Countdown::from_ms(interval_ms));
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, PoacherState::Grabbing | PoacherState::Retreating)
    }

    /// Fraction of health left, for the health bar.
    pub fn health_fraction(&self) -> f32 {
        if self.max_clicks == 0 {
            return 0.0;
        }
        self.clicks_remaining as f32 / self.max_clicks as f32
    }

    /// One click of damage. Reaching zero forces a retreat wherever the
    /// poacher is.
    pub fn take_damage(&mut self, current_y: f32) -> DamageOutcome {
        if self.is_terminal() {
            return DamageOutcome::Ignored;
        }
        self.clicks_remaining = self.clicks_remaining.saturating_sub(1);
        if self.clicks_remaining == 0 {
            self.enter_terminal(PoacherState::Retreating, current_y);
            return DamageOutcome::Repelled;
        }
        DamageOutcome::Damaged {
            remaining: self.clicks_remaining,
        }
    }

    /// Switch to grabbing. Fails once terminal.
    pub fn begin_grab(&mut self, current_y: f32) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.enter_terminal(PoacherState::Grabbing, current_y);
        true
    }

    fn enter_terminal(&mut self, state: PoacherState, current_y: f32) {
        self.state = state;
        self.state_time = 0.0;
        self.exit_from_y = current_y;
        self.auto_damage = None;
    }

    /// Length of the current terminal exit, `None` while still active.
    pub fn exit_duration(&self) -> Option<f32> {
        match self.state {
            PoacherState::Grabbing => Some(GRAB_EXIT_SECS),
            PoacherState::Retreating => Some(RETREAT_EXIT_SECS),
            _ => None,
        }
    }
}
