//! Hands-free cursor control from facial landmarks.
//!
//! Head turns move the pointer, a smile clicks and an eyebrow raise
//! right-clicks. The library consumes face-mesh landmarks produced by an
//! external detector and runs two independent cadences:
//!
//! 1. Per detector frame: extract smile and eyebrow ratios against a
//!    neutral-face baseline, map the nose offset to a velocity, and
//!    debounce the ratios into click events
//! 2. Per display refresh: integrate the last known velocity into a
//!    clamped cursor position and publish it to a pointer target
//!
//! # Examples
//!
//! ## Driving the controller directly
//!
//! ```no_run
//! use face_gesture_cursor::{
//!     controller::{ControllerSettings, GestureCursorController},
//!     landmarks::LandmarkSet,
//!     motion::Viewport,
//!     pointer::LogPointerTarget,
//! };
//! use std::time::Instant;
//!
//! let target = LogPointerTarget::new(Viewport::new(1920.0, 1080.0));
//! let mut controller =
//!     GestureCursorController::new(target, ControllerSettings::default(), Instant::now());
//! controller.start_tracking();
//!
//! // Feed each detector result as it arrives
//! let landmarks: LandmarkSet = serde_json::from_str("[]").unwrap();
//! controller.on_landmarks(Instant::now(), &landmarks);
//!
//! // And tick the render loop at the display rate
//! let position = controller.on_display_refresh(Instant::now());
//! println!("cursor at ({:.0}, {:.0})", position.x, position.y);
//! ```
//!
//! ## Response curve
//!
//! ```
//! use face_gesture_cursor::response_curve::{map_turn, Axis};
//!
//! // Inside the dead zone nothing moves
//! assert_eq!(map_turn(0.02, Axis::Vertical), 0.0);
//! // Far turns saturate; the horizontal axis is mirrored
//! assert_eq!(map_turn(0.4, Axis::Horizontal), -1.0);
//! ```

/// Landmark types and detector result decoding
pub mod landmarks;

/// Dead-zone response curve for head-turn offsets
pub mod response_curve;

/// Smile, eyebrow and head-turn extraction per frame
pub mod extractor;

/// Gesture hysteresis and click cooldowns
pub mod debouncer;

/// Cursor motion integration per display refresh
pub mod motion;

/// Velocity smoothing filters
pub mod filters;

/// Pointer target trait and the logging target
pub mod pointer;

/// Gesture cursor controller owning all session state
pub mod controller;

/// Landmark stream reader
pub mod frame_source;

/// Utility functions for coordinate conversion
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// X11 pointer target
pub mod cursor_control;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, FrameError, Result};
