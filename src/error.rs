//! Errors raised by the simulation core

use thiserror::Error;

/// Construction and access errors for [`crate::life::GridState`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifeError {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimension { width: i64, height: i64 },

    #[error("seed probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("step interval of {millis} ms is below the {min_millis} ms minimum")]
    InvalidInterval { millis: u128, min_millis: u128 },

    #[error("coordinates ({x}, {y}) out of range for {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("row {row} has length {len}, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}

pub type Result<T> = std::result::Result<T, LifeError>;
