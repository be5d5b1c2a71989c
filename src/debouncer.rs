//! Gesture debouncing: continuous ratios in, discrete click events out.
//!
//! Each gesture is a two-state machine with separate enter and release
//! levels. Both gestures share one click cooldown so a smile and an
//! eyebrow raise can never fire inside the same window; the eyebrow raise
//! additionally has its own longer cooldown.

use crate::constants::{
    CLICK_COOLDOWN_MS, EYEBROW_COOLDOWN_MS, EYEBROW_RELEASE, EYEBROW_THRESHOLD, SMILE_RELEASE,
    SMILE_THRESHOLD,
};
use log::debug;
use std::time::{Duration, Instant};

/// Facial gesture vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Mouth widening, mapped to a primary click
    Smile,
    /// Eyebrows lifting away from the eyes, mapped to a secondary click
    EyebrowRaise,
}

impl Gesture {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Smile => "smile",
            Self::EyebrowRaise => "eyebrow raise",
        }
    }
}

/// Whether a gesture is currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Active,
}

/// A gesture that crossed its threshold and passed all cooldowns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub gesture: Gesture,
    pub at: Instant,
}

/// Thresholds and cooldowns for both gestures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    pub smile_threshold: f64,
    pub smile_release: f64,
    pub eyebrow_threshold: f64,
    pub eyebrow_release: f64,
    pub click_cooldown: Duration,
    pub eyebrow_cooldown: Duration,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            smile_threshold: SMILE_THRESHOLD,
            smile_release: SMILE_RELEASE,
            eyebrow_threshold: EYEBROW_THRESHOLD,
            eyebrow_release: EYEBROW_RELEASE,
            click_cooldown: Duration::from_millis(CLICK_COOLDOWN_MS),
            eyebrow_cooldown: Duration::from_millis(EYEBROW_COOLDOWN_MS),
        }
    }
}

/// Hysteresis and cooldown state for the smile and eyebrow gestures
#[derive(Debug, Clone, Default)]
pub struct GestureDebouncer {
    thresholds: GestureThresholds,
    smile: GestureState,
    eyebrows: GestureState,
    last_click: Option<Instant>,
    last_eyebrow_raise: Option<Instant>,
}

impl GestureDebouncer {
    #[must_use]
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn smile_state(&self) -> GestureState {
        self.smile
    }

    #[must_use]
    pub const fn eyebrow_state(&self) -> GestureState {
        self.eyebrows
    }

    #[must_use]
    pub const fn last_click(&self) -> Option<Instant> {
        self.last_click
    }

    /// Return both gestures to idle and forget cooldown history
    pub fn reset(&mut self) {
        self.smile = GestureState::Idle;
        self.eyebrows = GestureState::Idle;
        self.last_click = None;
        self.last_eyebrow_raise = None;
    }

    /// Evaluate one frame's ratios. Smile is evaluated first.
    pub fn update(&mut self, now: Instant, smile_ratio: f64, eyebrow_ratio: f64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        let t = self.thresholds;

        if smile_ratio > t.smile_threshold
            && self.smile == GestureState::Idle
            && elapsed_beyond(self.last_click, now, t.click_cooldown)
        {
            debug!("Smile fired at ratio {:.3}", smile_ratio);
            self.smile = GestureState::Active;
            self.last_click = Some(now);
            events.push(GestureEvent {
                gesture: Gesture::Smile,
                at: now,
            });
        } else if smile_ratio <= t.smile_release {
            self.smile = GestureState::Idle;
        }

        if eyebrow_ratio > t.eyebrow_threshold
            && self.eyebrows == GestureState::Idle
            && elapsed_beyond(self.last_click, now, t.click_cooldown)
            && elapsed_beyond(self.last_eyebrow_raise, now, t.eyebrow_cooldown)
        {
            debug!("Eyebrow raise fired at ratio {:.3}", eyebrow_ratio);
            self.eyebrows = GestureState::Active;
            self.last_click = Some(now);
            self.last_eyebrow_raise = Some(now);
            events.push(GestureEvent {
                gesture: Gesture::EyebrowRaise,
                at: now,
            });
        } else if eyebrow_ratio <= t.eyebrow_release {
            self.eyebrows = GestureState::Idle;
        }

        events
    }
}

/// True when `last` is unset or strictly more than `window` before `now`
fn elapsed_beyond(last: Option<Instant>, now: Instant, window: Duration) -> bool {
    last.map_or(true, |at| now.saturating_duration_since(at) > window)
}
