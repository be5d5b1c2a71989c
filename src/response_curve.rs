//! Dead-zone response curve mapping head-turn offsets to cursor velocity.

use crate::constants::{DEAD_ZONE, MAX_ANGLE, RESPONSE_GAIN};

/// Screen axis a turn offset drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Inverted, the camera image is mirrored relative to the user
    Horizontal,
    /// Not inverted
    Vertical,
}

/// Parameters of the response curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseCurve {
    /// Half-width of the band around centre that produces no motion
    pub dead_zone: f64,
    /// Offset at which the un-doubled linear ramp reaches 1
    pub max_angle: f64,
}

impl Default for ResponseCurve {
    fn default() -> Self {
        Self {
            dead_zone: DEAD_ZONE,
            max_angle: MAX_ANGLE,
        }
    }
}

impl ResponseCurve {
    #[must_use]
    pub const fn new(dead_zone: f64, max_angle: f64) -> Self {
        Self { dead_zone, max_angle }
    }

    /// Map a turn offset to a velocity in `[-1, 1]`.
    ///
    /// Zero inside the dead zone, then a linear ramp twice as steep as the
    /// span from the dead-zone edge to `max_angle`, saturating at 1.
    #[must_use]
    pub fn apply(&self, offset: f64, axis: Axis) -> f64 {
        let abs = offset.abs();
        if abs < self.dead_zone {
            return 0.0;
        }

        let linear = (abs - self.dead_zone) / (self.max_angle - self.dead_zone);
        let magnitude = (linear * RESPONSE_GAIN).min(1.0);
        let signed = magnitude.copysign(offset);

        match axis {
            Axis::Horizontal => -signed,
            Axis::Vertical => signed,
        }
    }
}

/// Apply the default response curve
#[must_use]
pub fn map_turn(offset: f64, axis: Axis) -> f64 {
    ResponseCurve::default().apply(offset, axis)
}
