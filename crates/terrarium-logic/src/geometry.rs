//! Play-field geometry: 2D vectors, the terrarium layout, and the
//! substrate rectangle where animals, food and helpers live.

use serde::{Deserialize, Serialize};

/// Width of the play field in world units.
pub const FIELD_WIDTH: f32 = 1024.0;
/// Height of the play field in world units.
pub const FIELD_HEIGHT: f32 = 768.0;
/// Height of the shop strip along the bottom edge.
pub const SHOP_BAR_HEIGHT: f32 = 100.0;
/// Top edge of the substrate (40% down the field, rounded).
pub const SUBSTRATE_TOP: f32 = 307.0;
/// Bottom edge of the substrate (just above the shop strip).
pub const SUBSTRATE_BOTTOM: f32 = FIELD_HEIGHT - SHOP_BAR_HEIGHT;
/// Margin kept from the substrate edges when picking random points.
pub const SUBSTRATE_MARGIN: f32 = 20.0;

/// 2D position vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }

    /// Unit vector pointing along `angle` radians.
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// The substrate region of the standard terrarium layout.
    pub fn substrate() -> Self {
        Self::new(
            Vec2::new(0.0, SUBSTRATE_TOP),
            Vec2::new(FIELD_WIDTH, SUBSTRATE_BOTTOM),
        )
    }

    /// The whole play field, shop strip included.
    pub fn field() -> Self {
        Self::new(Vec2::ZERO, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn contains(&self, point: &Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Shrink every edge by `margin`. Collapses to the center line when the
    /// margin exceeds half the extent.
    pub fn inset(&self, margin: f32) -> Self {
        let cx = (self.min.x + self.max.x) * 0.5;
        let cy = (self.min.y + self.max.y) * 0.5;
        Self {
            min: Vec2::new((self.min.x + margin).min(cx), (self.min.y + margin).min(cy)),
            max: Vec2::new((self.max.x - margin).max(cx), (self.max.y - margin).max(cy)),
        }
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Whether a click at `point` lands on the shop strip rather than the field.
pub fn in_shop_strip(point: &Vec2) -> bool {
    point.y > FIELD_HEIGHT - SHOP_BAR_HEIGHT
}

/// Bounce-out easing used by falling food, `t` in [0, 1].
pub fn ease_bounce_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

/// Sine-out easing used by the poacher entrance, `t` in [0, 1].
pub fn ease_sine_out(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * std::f32::consts::FRAC_PI_2).sin()
}
