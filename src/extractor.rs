//! Gesture and head-orientation extraction from a single landmark frame.
//!
//! Smile and eyebrow measurements are ratios against a baseline captured
//! from the first frames of a session, so the session assumes the user
//! starts with a neutral face. Head turn is read from the nose tip offset
//! to the image centre.

use crate::{
    constants::{
        IMAGE_CENTER, LEFT_EYEBROW, LEFT_EYE_OUTER, MOUTH_LEFT_CORNER, MOUTH_RIGHT_CORNER,
        NOSE_TIP, RIGHT_EYEBROW, RIGHT_EYE_OUTER,
    },
    error::FrameError,
    landmarks::LandmarkSet,
    response_curve::{Axis, ResponseCurve},
};
use log::{debug, info};

/// Which baseline a calibrating frame captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStage {
    /// Neutral mouth-corner distance
    MouthWidth,
    /// Neutral eyebrow-to-eye distance
    EyebrowDistance,
}

/// Measurements from a fully calibrated frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceReading {
    /// Mouth width relative to baseline
    pub smile_ratio: f64,
    /// Eyebrow-to-eye distance relative to baseline
    pub eyebrow_ratio: f64,
    /// Nose offset from image centre, horizontal
    pub turn_x: f64,
    /// Nose offset from image centre, vertical
    pub turn_y: f64,
    /// Horizontal velocity in `[-1, 1]`
    pub move_x: f64,
    /// Vertical velocity in `[-1, 1]`
    pub move_y: f64,
}

/// Result of processing one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The detector found no face; nothing was computed
    NoFace,
    /// The frame was consumed to capture a baseline
    Calibrating {
        stage: CalibrationStage,
        /// Present once the mouth baseline exists
        smile_ratio: Option<f64>,
    },
    /// Ratios and velocity are available
    Tracked(FaceReading),
    /// The frame could not be interpreted and was dropped
    Failed(FrameError),
}

/// Session baselines and the response curve used for head turns
#[derive(Debug, Clone, Default)]
pub struct GestureExtractor {
    baseline_mouth_width: Option<f64>,
    baseline_eyebrow_distance: Option<f64>,
    curve: ResponseCurve,
}

impl GestureExtractor {
    #[must_use]
    pub fn new(curve: ResponseCurve) -> Self {
        Self {
            baseline_mouth_width: None,
            baseline_eyebrow_distance: None,
            curve,
        }
    }

    #[must_use]
    pub const fn baseline_mouth_width(&self) -> Option<f64> {
        self.baseline_mouth_width
    }

    #[must_use]
    pub const fn baseline_eyebrow_distance(&self) -> Option<f64> {
        self.baseline_eyebrow_distance
    }

    #[must_use]
    pub const fn is_calibrated(&self) -> bool {
        self.baseline_mouth_width.is_some() && self.baseline_eyebrow_distance.is_some()
    }

    /// Forget both baselines; the next valid frames recalibrate
    pub fn reset_calibration(&mut self) {
        self.baseline_mouth_width = None;
        self.baseline_eyebrow_distance = None;
    }

    /// Process one frame's landmarks
    pub fn process(&mut self, landmarks: &LandmarkSet) -> FrameOutcome {
        if landmarks.is_empty() {
            return FrameOutcome::NoFace;
        }

        match self.measure(landmarks) {
            Ok(outcome) => outcome,
            Err(e) => FrameOutcome::Failed(e),
        }
    }

    fn measure(&mut self, landmarks: &LandmarkSet) -> Result<FrameOutcome, FrameError> {
        let mouth_width = mouth_width(landmarks)?;

        let Some(baseline_mouth) = self.baseline_mouth_width else {
            check_measurement("mouth width", mouth_width)?;
            info!("Captured baseline mouth width {:.4}", mouth_width);
            self.baseline_mouth_width = Some(mouth_width);
            return Ok(FrameOutcome::Calibrating {
                stage: CalibrationStage::MouthWidth,
                smile_ratio: None,
            });
        };
        let smile_ratio = mouth_width / baseline_mouth;

        let eyebrow_distance = eyebrow_distance(landmarks)?;

        let Some(baseline_eyebrow) = self.baseline_eyebrow_distance else {
            check_measurement("eyebrow distance", eyebrow_distance)?;
            info!("Captured baseline eyebrow distance {:.4}", eyebrow_distance);
            self.baseline_eyebrow_distance = Some(eyebrow_distance);
            return Ok(FrameOutcome::Calibrating {
                stage: CalibrationStage::EyebrowDistance,
                smile_ratio: Some(smile_ratio),
            });
        };
        let eyebrow_ratio = eyebrow_distance / baseline_eyebrow;

        let nose = landmarks.require(NOSE_TIP)?;
        let turn_x = nose.x - IMAGE_CENTER;
        let turn_y = nose.y - IMAGE_CENTER;

        let reading = FaceReading {
            smile_ratio,
            eyebrow_ratio,
            turn_x,
            turn_y,
            move_x: self.curve.apply(turn_x, Axis::Horizontal),
            move_y: self.curve.apply(turn_y, Axis::Vertical),
        };
        debug!(
            "smile {:.3} eyebrow {:.3} turn ({:.3}, {:.3}) move ({:.2}, {:.2})",
            reading.smile_ratio,
            reading.eyebrow_ratio,
            reading.turn_x,
            reading.turn_y,
            reading.move_x,
            reading.move_y
        );

        Ok(FrameOutcome::Tracked(reading))
    }
}

/// Distance between the mouth corners
///
/// # Errors
///
/// Returns [`FrameError::MissingLandmark`] if a mouth corner is absent
pub fn mouth_width(landmarks: &LandmarkSet) -> Result<f64, FrameError> {
    let left = landmarks.require(MOUTH_LEFT_CORNER)?;
    let right = landmarks.require(MOUTH_RIGHT_CORNER)?;
    Ok(left.distance_to(&right))
}

/// Mean eyebrow-to-eye distance over both sides
///
/// # Errors
///
/// Returns [`FrameError::MissingLandmark`] if an eyebrow or eye point is absent
pub fn eyebrow_distance(landmarks: &LandmarkSet) -> Result<f64, FrameError> {
    let left = landmarks
        .require(LEFT_EYEBROW)?
        .distance_to(&landmarks.require(LEFT_EYE_OUTER)?);
    let right = landmarks
        .require(RIGHT_EYEBROW)?
        .distance_to(&landmarks.require(RIGHT_EYE_OUTER)?);
    Ok((left + right) / 2.0)
}

fn check_measurement(what: &'static str, value: f64) -> Result<(), FrameError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FrameError::DegenerateMeasurement { what, value })
    }
}
