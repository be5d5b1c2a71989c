//! Optional smoothing of the head-turn velocity.
//!
//! The extractor produces a fresh velocity on every landmark frame; a
//! filter can sit between it and the motion integrator to soften detector
//! jitter. The default is [`NoFilter`], which leaves the velocity as is.

/// Moving average filter for simple smoothing
pub mod moving_average;

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::{motion::Velocity, Error, Result};

/// Trait for all velocity filters
pub trait VelocityFilter: Send {
    /// Apply filter to one velocity sample
    fn apply(&mut self, velocity: Velocity) -> Velocity;

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
pub struct NoFilter;

impl VelocityFilter for NoFilter {
    fn apply(&mut self, velocity: Velocity) -> Velocity {
        velocity
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a velocity filter from a descriptor such as `exponential:0.3`
///
/// # Errors
///
/// Returns [`Error::FilterError`] for an unknown name or an invalid parameter
pub fn create_filter(descriptor: &str) -> Result<Box<dyn VelocityFilter>> {
    let descriptor = descriptor.to_lowercase();
    let (name, param) = match descriptor.split_once(':') {
        Some((name, param)) => (name, Some(param)),
        None => (descriptor.as_str(), None),
    };

    match name {
        "none" | "nofilter" => Ok(Box::new(NoFilter)),
        "moving_average" | "movingaverage" => {
            let window = match param {
                Some(p) => p
                    .parse::<usize>()
                    .map_err(|_| Error::FilterError(format!("Window size must be a positive integer: {p}")))?,
                None => 5,
            };
            if window == 0 {
                return Err(Error::FilterError("Window size must be greater than 0".to_string()));
            }
            Ok(Box::new(moving_average::MovingAverageFilter::new(window)))
        }
        "exponential" => {
            let alpha = match param {
                Some(p) => p
                    .parse::<f64>()
                    .map_err(|_| Error::FilterError(format!("Alpha must be a number: {p}")))?,
                None => 0.5,
            };
            if !(alpha > 0.0 && alpha <= 1.0) {
                return Err(Error::FilterError(format!("Alpha must be in (0, 1], got {alpha}")));
            }
            Ok(Box::new(exponential::ExponentialFilter::new(alpha)))
        }
        _ => Err(Error::FilterError(format!("Unknown filter type: {descriptor}"))),
    }
}
