//! Construction-time configuration errors.
//!
//! Everything that runs per tick is total; only building a world from
//! settings and sprite data can fail.

use thiserror::Error;

/// Errors raised while validating settings or resolving sprite data.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// An animation resolved to zero frames.
    #[error("Animation '{name}' has no frames")]
    EmptyAnimation { name: String },

    /// The asset source does not know this sequence.
    #[error("Unknown animation '{name}'")]
    UnknownAnimation { name: String },

    /// A frame with a non-positive or non-finite size.
    #[error("Animation '{name}' frame {index} has invalid size {width}x{height}")]
    InvalidFrame {
        name: String,
        index: usize,
        width: f32,
        height: f32,
    },

    /// Play-field dimensions must be positive.
    #[error("Invalid play field {width}x{height}")]
    InvalidField { width: f32, height: f32 },

    /// A spawned sprite would not fit horizontally inside the field.
    #[error("Sprite '{name}' ({sprite_width} wide) does not fit a field {field_width} wide")]
    SpawnBounds {
        name: String,
        field_width: f32,
        sprite_width: f32,
    },

    /// A timer period of zero would fire every poll.
    #[error("Timer '{timer}' must have a positive period")]
    InvalidPeriod { timer: &'static str },

    /// Any other out-of-range rule value.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// Settings or catalog file could not be read.
    #[error("Failed to read '{path}': {details}")]
    Read { path: String, details: String },

    /// JSON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },
}
