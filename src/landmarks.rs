//! Face-mesh landmark types as delivered by the external detector.
//!
//! Coordinates are normalized to `[0, 1]` image space. Indices are
//! positional: the detector always emits the same point at the same index,
//! so the extractor addresses points by the constants in
//! [`crate::constants`].

use crate::error::FrameError;
use nalgebra::{distance, Point2};
use serde::{Deserialize, Serialize};

/// A single normalized 2D landmark
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0 = left image edge
    pub x: f64,
    /// Vertical position, 0 = top image edge
    pub y: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another landmark
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance(&Point2::from(*self), &Point2::from(*other))
    }
}

impl From<Landmark> for Point2<f64> {
    fn from(lm: Landmark) -> Self {
        Self::new(lm.x, lm.y)
    }
}

/// One face's landmarks for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: Vec<Landmark>,
}

impl LandmarkSet {
    #[must_use]
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// An empty set, the detector's "no face found"
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    /// Look up a landmark the extractor cannot do without
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::MissingLandmark`] when the index is out of range
    pub fn require(&self, index: usize) -> std::result::Result<Landmark, FrameError> {
        self.get(index).ok_or(FrameError::MissingLandmark(index))
    }

    /// Replace a single point, growing the set with default points if needed
    pub fn set(&mut self, index: usize, landmark: Landmark) {
        if index >= self.points.len() {
            self.points.resize(index + 1, Landmark::default());
        }
        self.points[index] = landmark;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }
}

impl From<Vec<Landmark>> for LandmarkSet {
    fn from(points: Vec<Landmark>) -> Self {
        Self::new(points)
    }
}

/// One detector result as it appears on the landmark stream.
///
/// Mirrors the face-mesh result shape: a list of faces, each a list of
/// `{x, y, z}` points. Only the first face is ever used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorResult {
    #[serde(default)]
    pub multi_face_landmarks: Option<Vec<LandmarkSet>>,
}

impl DetectorResult {
    /// The first detected face, or an empty set when no face was found
    #[must_use]
    pub fn into_first_face(self) -> LandmarkSet {
        self.multi_face_landmarks
            .and_then(|faces| faces.into_iter().next())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(0.3, 0.4);
        assert!((a.distance_to(&b) - 0.5).abs() < 1e-12);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_require_missing_index() {
        let set = LandmarkSet::new(vec![Landmark::new(0.5, 0.5); 5]);
        assert!(set.require(4).is_ok());
        assert_eq!(set.require(61), Err(FrameError::MissingLandmark(61)));
    }

    #[test]
    fn test_set_grows() {
        let mut set = LandmarkSet::empty();
        set.set(4, Landmark::new(0.1, 0.2));
        assert_eq!(set.len(), 5);
        assert_eq!(set.get(4), Some(Landmark::new(0.1, 0.2)));
        assert_eq!(set.get(0), Some(Landmark::default()));
    }

    #[test]
    fn test_detector_result_parsing() {
        let line = r#"{"multiFaceLandmarks": [[{"x": 0.1, "y": 0.2, "z": -0.01}, {"x": 0.3, "y": 0.4, "z": 0.0}]]}"#;
        let result: DetectorResult = serde_json::from_str(line).unwrap();
        let face = result.into_first_face();
        assert_eq!(face.len(), 2);
        assert_eq!(face.get(1), Some(Landmark::new(0.3, 0.4)));
    }

    #[test]
    fn test_detector_result_without_face() {
        for line in ["{}", r#"{"multiFaceLandmarks": null}"#, r#"{"multiFaceLandmarks": []}"#] {
            let result: DetectorResult = serde_json::from_str(line).unwrap();
            assert!(result.into_first_face().is_empty(), "line {line}");
        }
    }
}
