//! Constants used throughout the application

/// Face-mesh landmark indices read by the extractor
pub const MOUTH_LEFT_CORNER: usize = 61;
pub const MOUTH_RIGHT_CORNER: usize = 291;
pub const LEFT_EYEBROW: usize = 70;
pub const RIGHT_EYEBROW: usize = 300;
pub const LEFT_EYE_OUTER: usize = 33;
pub const RIGHT_EYE_OUTER: usize = 263;
pub const NOSE_TIP: usize = 4;

/// Number of points in a face-mesh result (without iris refinement)
pub const FACE_MESH_LANDMARKS: usize = 468;

/// Normalized image centre
pub const IMAGE_CENTER: f64 = 0.5;

/// Smile enters active above this mouth-width ratio
pub const SMILE_THRESHOLD: f64 = 1.1;
/// Smile returns to idle at or below this ratio
pub const SMILE_RELEASE: f64 = 1.05;

/// Eyebrow raise enters active above this distance ratio
pub const EYEBROW_THRESHOLD: f64 = 1.15;
/// Eyebrow raise returns to idle at or below this ratio
pub const EYEBROW_RELEASE: f64 = 1.1;

/// Shared minimum spacing between any two clicks (ms)
pub const CLICK_COOLDOWN_MS: u64 = 500;
/// Additional spacing between two eyebrow-raise clicks (ms)
pub const EYEBROW_COOLDOWN_MS: u64 = 1000;
/// How long the indicator shows a gesture colour (ms)
pub const FLASH_DURATION_MS: u64 = 150;

/// Turn offsets smaller than this produce no motion
pub const DEAD_ZONE: f64 = 0.05;
/// Turn offset at which the response curve saturates before doubling
pub const MAX_ANGLE: f64 = 0.3;
/// Steepness multiplier applied after the dead zone
pub const RESPONSE_GAIN: f64 = 2.0;

/// Cursor speed in pixels per frame unit at full deflection
pub const CURSOR_SPEED: f64 = 50.0;
/// Milliseconds in one ~60fps frame unit
pub const FRAME_UNIT_MS: f64 = 16.67;
/// Acceleration multiplier cap
pub const MAX_ACCELERATION: f64 = 3.0;

/// Default display refresh rate (Hz)
pub const DEFAULT_REFRESH_HZ: u32 = 60;

/// Nominal camera resolution the detector is fed with
pub const CAMERA_WIDTH: u32 = 640;
pub const CAMERA_HEIGHT: u32 = 480;

/// Default indicator colours
pub const IDLE_COLOR: &str = "#ff0000";
pub const CLICK_COLOR: &str = "#00ff00";
pub const RIGHT_CLICK_COLOR: &str = "#0000ff";

