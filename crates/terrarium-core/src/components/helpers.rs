//! Helper pet component.

use serde::{Deserialize, Serialize};
use terrarium_logic::helpers::{HelperEffect, HelperKind};

use super::Countdown;

/// Helper wandering speed, units per second.
pub const HELPER_SPEED: f32 = 40.0;
/// Pause range between helper wander legs, seconds.
pub const HELPER_PAUSE_MIN: f32 = 2.0;
pub const HELPER_PAUSE_MAX: f32 = 5.0;

/// An owned helper pet present in the terrarium
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelperPet {
    pub kind: HelperKind,
    /// Recurring action timer for periodic roles
    pub effect_timer: Option<Countdown>,
}

impl HelperPet {
    pub fn new(kind: HelperKind) -> Self {
        Self {
            kind,
            effect_timer: None,
        }
    }

    pub fn effect(&self) -> HelperEffect {
        self.kind.config().effect
    }
}
