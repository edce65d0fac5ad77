//! Directional Survey Geometry
//!
//! Deterministic wellbore geometry from sparse directional surveys.
//! Pure math, no I/O, no global state.
//!
//! ## Survey Path
//! - `CurvatureSegment` - minimum-curvature arc between two stations
//! - `TrajectoryModel` - station list, Cartesian path, interpolation grid,
//!   single-depth queries with extrapolation clamp
//!
//! ## Dip Reorientation
//! - `DipVector::rotate()` - axis rotations with angle back-derivation
//! - `MarkerReorientation` - tool-frame dip to trajectory frame
//!
//! Angle recovery from Cartesian directions is shared in [`angles`].

pub mod angles;
pub mod curvature;
pub mod reorientation;
pub mod rotation;
pub mod trajectory;

pub use curvature::{dog_leg_severity, shape_factor, subtended_angle, CurvatureSegment};
pub use reorientation::MarkerReorientation;
pub use rotation::Axis;
pub use trajectory::TrajectoryModel;

use thiserror::Error;

/// Errors raised by the geometry core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// Malformed survey input: empty, non-finite, negative first depth,
    /// or depths out of order. Fatal to the load that triggered it.
    #[error("Survey validation failed: {0}")]
    SurveyValidation(String),

    /// Adjacent stations without a positive measured-depth span.
    #[error("Degenerate segment: MD {from_md} to {to_md} has no positive length")]
    DegenerateSegment { from_md: f64, to_md: f64 },

    /// Zero-length vector during angle back-derivation.
    #[error("Degenerate vector: cannot derive orientation from a zero-length vector")]
    DegenerateVector,

    #[error("Interpolation interval must be a positive finite number, got {0}")]
    InvalidInterval(f64),
}
