//! Common components used across multiple entity types.

use rand::Rng;
use serde::{Deserialize, Serialize};
use terrarium_logic::geometry::{Rect, Vec2};

/// Spatial position component - where an entity is on the play field
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Movement component - present only while entity is moving
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Movement {
    /// Target position
    pub destination: Vec2,
    /// Movement speed in units per second
    pub speed: f32,
}

impl Movement {
    pub fn new(destination: Vec2, speed: f32) -> Self {
        Self { destination, speed }
    }
}

/// Idle roaming: pause, pick a random point, walk there, repeat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wander {
    pub speed_min: f32,
    pub speed_max: f32,
    pub pause_min: f32,
    pub pause_max: f32,
    /// Seconds left in the current pause
    pub pause_remaining: f32,
    /// Point picked for the next leg
    pub target: Option<Vec2>,
    /// A Movement toward `target` has been issued
    pub moving: bool,
    /// Where random points are drawn from
    pub area: Rect,
}

impl Wander {
    pub fn new(speed: (f32, f32), pause: (f32, f32), area: Rect) -> Self {
        Self {
            speed_min: speed.0,
            speed_max: speed.1,
            pause_min: pause.0,
            pause_max: pause.1,
            pause_remaining: 0.0,
            target: None,
            moving: false,
            area,
        }
    }

    /// Forget the current leg so the next idle tick starts a fresh pause.
    pub fn interrupt(&mut self) {
        self.pause_remaining = 0.0;
        self.target = None;
        self.moving = false;
    }

    pub fn roll_pause(&self, rng: &mut impl Rng) -> f32 {
        roll_range(rng, self.pause_min, self.pause_max)
    }

    pub fn roll_speed(&self, rng: &mut impl Rng) -> f32 {
        roll_range(rng, self.speed_min, self.speed_max)
    }

    pub fn roll_point(&self, rng: &mut impl Rng) -> Vec2 {
        random_point(rng, &self.area)
    }
}

/// Repeating countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    /// Seconds between firings
    pub interval: f32,
    /// Seconds until the next firing
    pub remaining: f32,
}

impl Countdown {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            remaining: interval,
        }
    }

    pub fn from_ms(interval_ms: u32) -> Self {
        Self::new(interval_ms as f32 / 1000.0)
    }

    /// Advance by `delta_seconds`. Returns true when the timer fires; fires
    /// at most once per call and carries any overshoot into the next period.
    pub fn tick(&mut self, delta_seconds: f32) -> bool {
        if self.interval <= 0.0 {
            return false;
        }
        self.remaining -= delta_seconds;
        if self.remaining > 0.0 {
            return false;
        }
        self.remaining += self.interval;
        true
    }
}

/// Entity on its way out: despawned once the countdown reaches zero.
/// Entities carrying it are no longer part of the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fading {
    pub remaining: f32,
}

impl Fading {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }
}

/// Uniform roll in `[min, max]`, tolerating a degenerate range.
pub fn roll_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// Uniform random point inside `area`.
pub fn random_point(rng: &mut impl Rng, area: &Rect) -> Vec2 {
    Vec2::new(
        roll_range(rng, area.min.x, area.max.x),
        roll_range(rng, area.min.y, area.max.y),
    )
}

/// `1 ± spread` multiplier
pub fn jitter(rng: &mut impl Rng, spread: f32) -> f32 {
    1.0 + roll_range(rng, -spread, spread)
}
