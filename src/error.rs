//! Error types for slider configuration and range input validation.

use thiserror::Error;

/// Rejected slider configuration or track measurement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderError {
    /// `max` must be strictly greater than `min`; otherwise no mapping exists.
    #[error("invalid bounds: max ({max}) must be greater than min ({min})")]
    InvalidBounds { min: f64, max: f64 },
    /// `min` or `max` is NaN or infinite.
    #[error("slider bounds must be finite numbers (min: {min}, max: {max})")]
    NonFiniteBounds { min: f64, max: f64 },
    /// The thumb leaves no room to travel along the track.
    #[error("track of {track_width_px}px cannot hold a {thumb_width_px}px thumb")]
    DegenerateTrack {
        track_width_px: f64,
        thumb_width_px: f64,
    },
    /// Geometry is measured once per instance.
    #[error("track geometry is already initialized")]
    AlreadyInitialized,
}

/// Rejected edit in a [`RangeInput`](crate::range_input::RangeInput).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeInputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("{value} is below the allowed lower bound {bound}")]
    BelowLowerBound { value: f64, bound: f64 },
    #[error("{value} exceeds the allowed upper bound {bound}")]
    AboveUpperBound { value: f64, bound: f64 },
}
