//! Cursor motion integration, run once per display refresh.
//!
//! The integrator owns the cursor position. It reads the most recent
//! velocity every tick regardless of whether a new landmark frame arrived,
//! so motion stays smooth when the detector runs slower than the display.

use crate::constants::{CURSOR_SPEED, FRAME_UNIT_MS, MAX_ACCELERATION};
use std::time::Instant;

/// Drawable area the cursor is confined to, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> CursorPosition {
        CursorPosition {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }

    /// Clamp a position into `[0, width] x [0, height]`
    #[must_use]
    pub fn clamp(&self, position: CursorPosition) -> CursorPosition {
        CursorPosition {
            x: position.x.clamp(0.0, self.width.max(0.0)),
            y: position.y.clamp(0.0, self.height.max(0.0)),
        }
    }
}

/// Cursor location in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
}

impl CursorPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Normalized cursor velocity, each component in `[-1, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Speed shaping parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSettings {
    /// Pixels per frame unit at full deflection, before acceleration
    pub speed: f64,
    /// Length of one frame unit in milliseconds
    pub frame_unit_ms: f64,
    /// Upper bound of the acceleration multiplier
    pub max_acceleration: f64,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            speed: CURSOR_SPEED,
            frame_unit_ms: FRAME_UNIT_MS,
            max_acceleration: MAX_ACCELERATION,
        }
    }
}

/// Acceleration multiplier: larger deflection moves faster, capped
#[must_use]
pub fn acceleration(velocity: Velocity, max_acceleration: f64) -> f64 {
    (1.0 + velocity.x.abs() + velocity.y.abs()).min(max_acceleration)
}

/// Integrates velocity into a clamped cursor position
#[derive(Debug, Clone)]
pub struct MotionIntegrator {
    settings: MotionSettings,
    viewport: Viewport,
    position: CursorPosition,
    last_tick: Instant,
}

impl MotionIntegrator {
    /// Start at the viewport centre, measuring the first tick from `started_at`
    #[must_use]
    pub fn new(settings: MotionSettings, viewport: Viewport, started_at: Instant) -> Self {
        Self {
            settings,
            viewport,
            position: viewport.center(),
            last_tick: started_at,
        }
    }

    #[must_use]
    pub const fn position(&self) -> CursorPosition {
        self.position
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Move the cursor directly, clamped to the viewport
    pub fn set_position(&mut self, position: CursorPosition) {
        self.position = self.viewport.clamp(position);
    }

    /// Adopt a new viewport and pull the cursor back inside it
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.position = viewport.clamp(self.position);
    }

    /// Advance one display refresh tick and return the new position
    pub fn tick(&mut self, now: Instant, velocity: Velocity) -> CursorPosition {
        let elapsed_ms = now.saturating_duration_since(self.last_tick).as_secs_f64() * 1000.0;
        self.last_tick = now;
        let delta = elapsed_ms / self.settings.frame_unit_ms;
        self.step(velocity, delta)
    }

    /// Advance by an explicit number of frame units
    pub fn step(&mut self, velocity: Velocity, delta: f64) -> CursorPosition {
        let accel = acceleration(velocity, self.settings.max_acceleration);
        let scale = self.settings.speed * delta * accel;

        let next = CursorPosition {
            x: self.position.x + velocity.x * scale,
            y: self.position.y + velocity.y * scale,
        };
        self.position = self.viewport.clamp(next);
        self.position
    }
}
