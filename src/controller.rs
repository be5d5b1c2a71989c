//! The gesture cursor controller: one owner for all per-session state.
//!
//! Two entry points run at independent cadences and never overlap:
//! [`GestureCursorController::on_landmarks`] once per detector result and
//! [`GestureCursorController::on_display_refresh`] once per display
//! refresh. They share the last known velocity, so the cursor keeps moving
//! smoothly between detector frames and keeps its last velocity when the
//! face is lost.

use crate::{
    constants::{CLICK_COLOR, FLASH_DURATION_MS, IDLE_COLOR, RIGHT_CLICK_COLOR},
    debouncer::{Gesture, GestureDebouncer, GestureEvent, GestureThresholds},
    error::{Error, FrameError},
    extractor::{CalibrationStage, FrameOutcome, GestureExtractor},
    filters::{NoFilter, VelocityFilter},
    landmarks::LandmarkSet,
    motion::{CursorPosition, MotionIntegrator, MotionSettings, Velocity},
    pointer::{CursorIndicator, PointerEvent, PointerEventKind, PointerTarget},
    response_curve::ResponseCurve,
};
use log::{debug, error, info, warn};
use std::time::{Duration, Instant};

/// Severity of the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// The one-line human-readable status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

/// Indicator colours for idle and for each gesture flash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorColors {
    pub idle: String,
    pub click: String,
    pub right_click: String,
}

impl Default for IndicatorColors {
    fn default() -> Self {
        Self {
            idle: IDLE_COLOR.to_string(),
            click: CLICK_COLOR.to_string(),
            right_click: RIGHT_CLICK_COLOR.to_string(),
        }
    }
}

impl IndicatorColors {
    fn for_gesture(&self, gesture: Gesture) -> &str {
        match gesture {
            Gesture::Smile => &self.click,
            Gesture::EyebrowRaise => &self.right_click,
        }
    }
}

/// Everything tunable about the controller
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub curve: ResponseCurve,
    pub thresholds: GestureThresholds,
    pub motion: MotionSettings,
    pub flash_duration: Duration,
    pub colors: IndicatorColors,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            curve: ResponseCurve::default(),
            thresholds: GestureThresholds::default(),
            motion: MotionSettings::default(),
            flash_duration: Duration::from_millis(FLASH_DURATION_MS),
            colors: IndicatorColors::default(),
        }
    }
}

#[derive(Debug, Clone)]
struct Flash {
    color: String,
    /// `None` when the flash would outlast the clock; it then never reverts
    until: Option<Instant>,
}

/// Owns extractor, debouncer, integrator and the pointer target
pub struct GestureCursorController<T: PointerTarget> {
    target: T,
    extractor: GestureExtractor,
    debouncer: GestureDebouncer,
    integrator: MotionIntegrator,
    filter: Box<dyn VelocityFilter>,
    colors: IndicatorColors,
    flash_duration: Duration,
    velocity: Velocity,
    tracking: bool,
    flash: Option<Flash>,
    status: Status,
    clicks: usize,
    context_menus: usize,
}

impl<T: PointerTarget> GestureCursorController<T> {
    /// Create a controller with the cursor at the centre of the target's viewport
    pub fn new(target: T, settings: ControllerSettings, now: Instant) -> Self {
        let viewport = target.viewport();
        info!(
            "Controller using {} target, viewport {}x{}",
            target.name(),
            viewport.width,
            viewport.height
        );

        Self {
            extractor: GestureExtractor::new(settings.curve),
            debouncer: GestureDebouncer::new(settings.thresholds),
            integrator: MotionIntegrator::new(settings.motion, viewport, now),
            filter: Box::new(NoFilter),
            colors: settings.colors,
            flash_duration: settings.flash_duration,
            velocity: Velocity::ZERO,
            tracking: false,
            flash: None,
            status: Status {
                level: StatusLevel::Info,
                text: "Idle".to_string(),
            },
            clicks: 0,
            context_menus: 0,
            target,
        }
    }

    /// Smooth velocity with `filter` before it reaches the integrator
    #[must_use]
    pub fn with_filter(mut self, filter: Box<dyn VelocityFilter>) -> Self {
        info!("Velocity filter: {}", filter.name());
        self.filter = filter;
        self
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub const fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub const fn position(&self) -> CursorPosition {
        self.integrator.position()
    }

    pub const fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub const fn extractor(&self) -> &GestureExtractor {
        &self.extractor
    }

    pub const fn debouncer(&self) -> &GestureDebouncer {
        &self.debouncer
    }

    /// Primary and secondary clicks fired so far
    pub const fn click_counts(&self) -> (usize, usize) {
        (self.clicks, self.context_menus)
    }

    /// Current indicator colour, flash colour while a flash is showing
    pub fn indicator_color(&self) -> &str {
        self.flash
            .as_ref()
            .map_or(self.colors.idle.as_str(), |f| f.color.as_str())
    }

    /// Begin accepting landmark frames
    pub fn start_tracking(&mut self) {
        if self.tracking {
            return;
        }
        self.tracking = true;
        self.set_status(StatusLevel::Info, "Tracking started, hold a neutral face");
    }

    /// Stop accepting frames and forget calibration and gesture state
    pub fn stop_tracking(&mut self) {
        if !self.tracking {
            return;
        }
        self.tracking = false;
        self.extractor.reset_calibration();
        self.debouncer.reset();
        self.filter.reset();
        self.velocity = Velocity::ZERO;
        self.set_status(StatusLevel::Info, "Tracking stopped");
    }

    /// Record a setup failure of some subsystem; the rest keeps running
    pub fn report_setup_failure(&mut self, subsystem: &str, err: &Error) {
        error!("{} setup failed: {}", subsystem, err);
        self.set_status(StatusLevel::Error, format!("{subsystem} unavailable: {err}"));
    }

    /// Handle one detector result.
    ///
    /// Returns `None` when tracking is not active and the frame was ignored.
    pub fn on_landmarks(&mut self, now: Instant, landmarks: &LandmarkSet) -> Option<FrameOutcome> {
        if !self.tracking {
            return None;
        }

        let outcome = self.extractor.process(landmarks);
        match &outcome {
            FrameOutcome::NoFace => {
                self.set_status(StatusLevel::Warning, "No face detected");
            }
            FrameOutcome::Calibrating { stage, .. } => {
                let text = match stage {
                    CalibrationStage::MouthWidth => "Calibrating mouth, keep a neutral face",
                    CalibrationStage::EyebrowDistance => "Calibrating eyebrows, keep a neutral face",
                };
                self.set_status(StatusLevel::Info, text);
            }
            FrameOutcome::Tracked(reading) => {
                self.velocity = self.filter.apply(Velocity::new(reading.move_x, reading.move_y));
                let events = self.debouncer.update(now, reading.smile_ratio, reading.eyebrow_ratio);
                if events.is_empty() {
                    self.set_status(StatusLevel::Info, "Tracking face");
                }
                for event in events {
                    self.fire(event);
                }
            }
            FrameOutcome::Failed(err) => self.drop_frame(err),
        }

        Some(outcome)
    }

    /// Report a frame that failed before reaching the extractor
    pub fn on_frame_error(&mut self, err: &FrameError) {
        if self.tracking {
            self.drop_frame(err);
        }
    }

    /// Advance the cursor by one display refresh and publish it
    pub fn on_display_refresh(&mut self, now: Instant) -> CursorPosition {
        if self
            .flash
            .as_ref()
            .is_some_and(|f| f.until.is_some_and(|until| now >= until))
        {
            self.flash = None;
        }

        let viewport = self.target.viewport();
        if viewport != self.integrator.viewport() {
            debug!("Viewport changed to {}x{}", viewport.width, viewport.height);
            self.integrator.resize(viewport);
        }

        let position = self.integrator.tick(now, self.velocity);
        let indicator = CursorIndicator {
            position,
            color: self.indicator_color().to_string(),
        };

        if let Err(e) = self.target.render_indicator(&indicator) {
            self.target_failed(&e);
        }
        if let Err(e) = self
            .target
            .dispatch(PointerEvent::new(PointerEventKind::Move, position))
        {
            self.target_failed(&e);
        }

        position
    }

    fn fire(&mut self, event: GestureEvent) {
        let position = self.integrator.position();
        let (kind, label) = match event.gesture {
            Gesture::Smile => {
                self.clicks += 1;
                (PointerEventKind::Click, "Left click")
            }
            Gesture::EyebrowRaise => {
                self.context_menus += 1;
                (PointerEventKind::ContextMenu, "Right click")
            }
        };

        self.flash = Some(Flash {
            color: self.colors.for_gesture(event.gesture).to_string(),
            until: event.at.checked_add(self.flash_duration),
        });

        match self.target.dispatch(PointerEvent::new(kind, position)) {
            Ok(()) => self.set_status(
                StatusLevel::Info,
                format!(
                    "{label} ({}) at ({:.0}, {:.0})",
                    event.gesture.as_str(),
                    position.x,
                    position.y
                ),
            ),
            Err(e) => self.target_failed(&e),
        }
    }

    fn drop_frame(&mut self, err: &FrameError) {
        warn!("Dropping frame: {}", err);
        self.set_status(StatusLevel::Warning, format!("Frame skipped: {err}"));
    }

    fn target_failed(&mut self, err: &Error) {
        warn!("{} target error: {}", self.target.name(), err);
        self.set_status(StatusLevel::Error, format!("Pointer target error: {err}"));
    }

    fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        let text = text.into();
        if self.status.level == level && self.status.text == text {
            return;
        }
        match level {
            StatusLevel::Info => info!("Status: {}", text),
            StatusLevel::Warning => warn!("Status: {}", text),
            StatusLevel::Error => error!("Status: {}", text),
        }
        self.status = Status { level, text };
    }
}
