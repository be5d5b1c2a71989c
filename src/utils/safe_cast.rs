//! Safe casting utilities for turning viewport floats into protocol integers

/// Clamp and convert f64 to i16 for X11 pointer coordinates
///
/// Bounds are themselves clamped into the i16 range; non-finite values
/// map to `min`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_i16_clamp(value: f64, min: i32, max: i32) -> i16 {
    let lo = i32::from(i16::MIN);
    let hi = i32::from(i16::MAX);
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let (min, max) = (min.clamp(lo, hi), max.clamp(lo, hi));

    if !value.is_finite() {
        return min as i16;
    }

    let clamped = value.round().clamp(f64::from(min), f64::from(max));
    (clamped as i32).clamp(min, max) as i16
}
