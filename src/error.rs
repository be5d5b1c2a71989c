//! Error types for the face gesture cursor library.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `X11` window system operation failed
    #[error("X11 error: {0}")]
    X11(String),

    /// Velocity filter could not be created
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Pointer target rejected a render or dispatch
    #[error("Pointer target error: {0}")]
    PointerTarget(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Application-specific error type (alias for main Error type)
pub type AppError = Error;

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a single landmark frame was dropped.
///
/// These never escape the controller; they become a status message and a
/// log line, and the next frame is processed normally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// The detector result lacked a landmark index the extractor reads
    #[error("landmark {0} missing from frame")]
    MissingLandmark(usize),

    /// A calibration measurement was zero or not finite
    #[error("degenerate {what} measurement ({value})")]
    DegenerateMeasurement {
        /// Which distance was measured
        what: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The frame source could not decode the detector output
    #[error("malformed frame: {0}")]
    Malformed(String),
}
