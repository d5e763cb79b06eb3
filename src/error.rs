//! Crate error type
//!
//! None of these ever escape a `Game` hook; the hooks log them and carry on.

use std::fmt;

use crate::GridPoint;
use crate::sim::PlaneId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PondError {
    /// Coordinate outside the grid
    OutOfBounds { x: i32, y: i32 },
    /// Plane id past what the host can address
    PlaneExhausted { plane: PlaneId, capacity: u32 },
    /// Line between two points has nothing to walk
    InvalidPath { from: GridPoint, to: GridPoint },
    /// Settings failed to parse or validate
    InvalidConfig(String),
}

impl fmt::Display for PondError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { x, y } => write!(f, "bead ({x}, {y}) is outside the grid"),
            Self::PlaneExhausted { plane, capacity } => {
                write!(f, "plane {} exceeds host capacity of {capacity} planes", plane.0)
            }
            Self::InvalidPath { from, to } => write!(
                f,
                "no path from ({}, {}) to ({}, {})",
                from.x, from.y, to.x, to.y
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid settings: {msg}"),
        }
    }
}

impl std::error::Error for PondError {}

impl From<serde_json::Error> for PondError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
