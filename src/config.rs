//! Configuration management for the face gesture cursor

use crate::{
    constants::{
        CAMERA_HEIGHT, CAMERA_WIDTH, CLICK_COLOR, CLICK_COOLDOWN_MS, CURSOR_SPEED, DEAD_ZONE,
        DEFAULT_REFRESH_HZ, EYEBROW_COOLDOWN_MS, EYEBROW_RELEASE, EYEBROW_THRESHOLD,
        FLASH_DURATION_MS, FRAME_UNIT_MS, IDLE_COLOR, MAX_ACCELERATION, MAX_ANGLE,
        RIGHT_CLICK_COLOR, SMILE_RELEASE, SMILE_THRESHOLD,
    },
    controller::{ControllerSettings, IndicatorColors},
    debouncer::GestureThresholds,
    filters::{create_filter, VelocityFilter},
    motion::{MotionSettings, Viewport},
    response_curve::ResponseCurve,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

/// Upper bound for any cooldown or flash length in the configuration
pub const MAX_TIMING_MS: u64 = 60_000;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture thresholds and click feedback
    pub gestures: GestureConfig,

    /// Cursor motion shaping
    pub motion: MotionConfig,

    /// Render loop and viewport
    pub display: DisplayConfig,

    /// Nominal camera feeding the detector
    pub camera: CameraConfig,
}

/// Gesture thresholds, cooldowns and indicator colours
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Smile fires above this mouth-width ratio
    pub smile_threshold: f64,

    /// Smile releases at or below this ratio
    pub smile_release: f64,

    /// Eyebrow raise fires above this distance ratio
    pub eyebrow_threshold: f64,

    /// Eyebrow raise releases at or below this ratio
    pub eyebrow_release: f64,

    /// Minimum spacing between any two clicks (ms)
    pub click_cooldown_ms: u64,

    /// Minimum spacing between two eyebrow-raise clicks (ms)
    pub eyebrow_cooldown_ms: u64,

    /// Indicator flash length after a click (ms)
    pub flash_duration_ms: u64,

    /// Indicator colour at rest
    pub idle_color: String,

    /// Indicator colour after a smile click
    pub click_color: String,

    /// Indicator colour after an eyebrow-raise click
    pub right_click_color: String,
}

/// Cursor motion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Pixels per frame unit at full deflection
    pub speed: f64,

    /// Head-turn offsets below this produce no motion
    pub dead_zone: f64,

    /// Head-turn offset where the ramp ends before doubling
    pub max_angle: f64,

    /// Milliseconds per frame unit
    pub frame_unit_ms: f64,

    /// Cap on the acceleration multiplier
    pub max_acceleration: f64,

    /// Velocity smoothing filter (none, exponential[:alpha], moving_average[:window])
    pub velocity_filter: String,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render loop rate
    pub refresh_hz: u32,

    /// Viewport width for the headless target
    pub viewport_width: f64,

    /// Viewport height for the headless target
    pub viewport_height: f64,
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Frame width the detector is fed with
    pub width: u32,

    /// Frame height the detector is fed with
    pub height: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            smile_threshold: SMILE_THRESHOLD,
            smile_release: SMILE_RELEASE,
            eyebrow_threshold: EYEBROW_THRESHOLD,
            eyebrow_release: EYEBROW_RELEASE,
            click_cooldown_ms: CLICK_COOLDOWN_MS,
            eyebrow_cooldown_ms: EYEBROW_COOLDOWN_MS,
            flash_duration_ms: FLASH_DURATION_MS,
            idle_color: IDLE_COLOR.to_string(),
            click_color: CLICK_COLOR.to_string(),
            right_click_color: RIGHT_CLICK_COLOR.to_string(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: CURSOR_SPEED,
            dead_zone: DEAD_ZONE,
            max_angle: MAX_ANGLE,
            frame_unit_ms: FRAME_UNIT_MS,
            max_acceleration: MAX_ACCELERATION,
            velocity_filter: "none".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_hz: DEFAULT_REFRESH_HZ,
            viewport_width: 1920.0,
            viewport_height: 1080.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: CAMERA_WIDTH,
            height: CAMERA_HEIGHT,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Serialize configuration to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Create the velocity filter named in the configuration
    pub fn create_filter(&self) -> Result<Box<dyn VelocityFilter>> {
        create_filter(&self.motion.velocity_filter)
    }

    /// Controller settings derived from this configuration
    #[must_use]
    pub fn controller_settings(&self) -> ControllerSettings {
        let g = &self.gestures;
        ControllerSettings {
            curve: ResponseCurve::new(self.motion.dead_zone, self.motion.max_angle),
            thresholds: GestureThresholds {
                smile_threshold: g.smile_threshold,
                smile_release: g.smile_release,
                eyebrow_threshold: g.eyebrow_threshold,
                eyebrow_release: g.eyebrow_release,
                click_cooldown: Duration::from_millis(g.click_cooldown_ms),
                eyebrow_cooldown: Duration::from_millis(g.eyebrow_cooldown_ms),
            },
            motion: MotionSettings {
                speed: self.motion.speed,
                frame_unit_ms: self.motion.frame_unit_ms,
                max_acceleration: self.motion.max_acceleration,
            },
            flash_duration: Duration::from_millis(g.flash_duration_ms),
            colors: IndicatorColors {
                idle: g.idle_color.clone(),
                click: g.click_color.clone(),
                right_click: g.right_click_color.clone(),
            },
        }
    }

    /// Viewport for the headless pointer target
    #[must_use]
    pub fn headless_viewport(&self) -> Viewport {
        Viewport::new(self.display.viewport_width, self.display.viewport_height)
    }

    /// Period of the render loop
    #[must_use]
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.display.refresh_hz.max(1)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let g = &self.gestures;
        if g.smile_release >= g.smile_threshold {
            return Err(Error::ConfigError(
                "Smile release must be below the smile threshold".to_string(),
            ));
        }
        if g.eyebrow_release >= g.eyebrow_threshold {
            return Err(Error::ConfigError(
                "Eyebrow release must be below the eyebrow threshold".to_string(),
            ));
        }
        if g.smile_release <= 0.0 || g.eyebrow_release <= 0.0 {
            return Err(Error::ConfigError("Release ratios must be positive".to_string()));
        }
        for (name, ms) in [
            ("click_cooldown_ms", g.click_cooldown_ms),
            ("eyebrow_cooldown_ms", g.eyebrow_cooldown_ms),
            ("flash_duration_ms", g.flash_duration_ms),
        ] {
            if ms > MAX_TIMING_MS {
                return Err(Error::ConfigError(format!(
                    "{name} must be at most {MAX_TIMING_MS} ms, got {ms}"
                )));
            }
        }

        let m = &self.motion;
        if !(m.speed > 0.0) {
            return Err(Error::ConfigError("Cursor speed must be greater than 0".to_string()));
        }
        if !(0.0..m.max_angle).contains(&m.dead_zone) {
            return Err(Error::ConfigError(
                "Dead zone must be non-negative and below max angle".to_string(),
            ));
        }
        if !(m.frame_unit_ms > 0.0) {
            return Err(Error::ConfigError("Frame unit must be greater than 0".to_string()));
        }
        if !(m.max_acceleration >= 1.0) {
            return Err(Error::ConfigError(
                "Max acceleration must be at least 1.0".to_string(),
            ));
        }
        create_filter(&m.velocity_filter).map_err(|e| Error::ConfigError(e.to_string()))?;

        if self.display.refresh_hz == 0 {
            return Err(Error::ConfigError("Refresh rate must be greater than 0".to_string()));
        }
        if !(self.display.viewport_width > 0.0 && self.display.viewport_height > 0.0) {
            return Err(Error::ConfigError("Viewport must have a positive size".to_string()));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(Error::ConfigError("Camera resolution must be non-zero".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r##"# Face Gesture Cursor Configuration

# Gesture thresholds (ratios against the neutral-face baseline)
gestures:
  smile_threshold: 1.1
  smile_release: 1.05
  eyebrow_threshold: 1.15
  eyebrow_release: 1.1
  click_cooldown_ms: 500
  eyebrow_cooldown_ms: 1000
  flash_duration_ms: 150
  idle_color: "#ff0000"
  click_color: "#00ff00"
  right_click_color: "#0000ff"

# Cursor motion
motion:
  speed: 50.0
  dead_zone: 0.05
  max_angle: 0.3
  frame_unit_ms: 16.67
  max_acceleration: 3.0
  velocity_filter: "none"

# Render loop; the viewport applies to the headless target only
display:
  refresh_hz: 60
  viewport_width: 1920.0
  viewport_height: 1080.0

# Camera feeding the external detector
camera:
  width: 640
  height: 480
"##;
