//! Directional survey types: raw rows, curvilinear stations and Cartesian points

use super::NedVector;
use crate::geometry::angles;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// One raw survey row as handed in by the file reader.
///
/// Angles are in degrees, depth in the configured depth unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyRow {
    pub measured_depth: f64,
    pub inclination_deg: f64,
    pub azimuth_deg: f64,
}

impl SurveyRow {
    pub const fn new(measured_depth: f64, inclination_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            measured_depth,
            inclination_deg,
            azimuth_deg,
        }
    }
}

// ============================================================================
// Station Point
// ============================================================================

/// A survey station in curvilinear coordinates with its unit tangent.
///
/// Inclination is measured from vertical, azimuth clockwise from grid north,
/// both stored in radians. The tangent is derived from the angles and is
/// always unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationPoint {
    /// Measured depth along hole from the reference point (KB)
    pub measured_depth: f64,
    /// Inclination from vertical (radians)
    pub inclination: f64,
    /// Azimuth from grid north (radians, [0, 2π))
    pub azimuth: f64,
    /// Unit tangent (north, east, down)
    pub tangent: NedVector,
}

impl StationPoint {
    /// Build a station from degrees.
    pub fn new(measured_depth: f64, inclination_deg: f64, azimuth_deg: f64) -> Self {
        let inclination = inclination_deg.to_radians();
        let azimuth = azimuth_deg.to_radians();
        Self {
            measured_depth,
            inclination,
            azimuth,
            tangent: angles::tangent_from_angles(inclination, azimuth),
        }
    }

    /// Vertical station at the reference point (MD 0).
    pub fn surface() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Back-derive inclination and azimuth from a (possibly non-unit) tangent.
    ///
    /// The stored tangent is renormalized. A zero-length tangent falls back to
    /// a vertical station.
    pub fn from_tangent(measured_depth: f64, tangent: NedVector) -> Self {
        let unit = tangent.normalized().unwrap_or(NedVector::new(0.0, 0.0, 1.0));
        let (inclination, azimuth) = angles::station_angles_from_tangent(&unit);
        Self {
            measured_depth,
            inclination,
            azimuth,
            tangent: unit,
        }
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination.to_degrees()
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.azimuth.to_degrees()
    }
}

impl From<SurveyRow> for StationPoint {
    fn from(row: SurveyRow) -> Self {
        Self::new(row.measured_depth, row.inclination_deg, row.azimuth_deg)
    }
}

impl fmt::Display for StationPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MD: {:10.2}, Inclination: {:8.3}, Azimuth: {:8.3}",
            self.measured_depth,
            self.inclination_deg(),
            self.azimuth_deg()
        )
    }
}

// ============================================================================
// Cartesian Point
// ============================================================================

/// Position (or offset) in the north / east / down-depth frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianPoint {
    pub north: f64,
    pub east: f64,
    /// Positive downward (true vertical depth below the datum)
    pub down_depth: f64,
}

impl CartesianPoint {
    pub const fn new(north: f64, east: f64, down_depth: f64) -> Self {
        Self {
            north,
            east,
            down_depth,
        }
    }

    /// Well-head anchor from surface coordinates and KB elevation.
    ///
    /// KB is positive above the datum, so the down-depth starts at `-kb`.
    pub fn from_wellhead(north: f64, east: f64, kb_elevation: f64) -> Self {
        Self::new(north, east, -kb_elevation)
    }

    /// Scale all three components.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.north * factor, self.east * factor, self.down_depth * factor)
    }

    /// Scale only the horizontal components (mixed depth/surface units).
    pub fn scale_horizontal(self, factor: f64) -> Self {
        Self::new(self.north * factor, self.east * factor, self.down_depth)
    }
}

impl Add for CartesianPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.north + rhs.north,
            self.east + rhs.east,
            self.down_depth + rhs.down_depth,
        )
    }
}

impl From<NedVector> for CartesianPoint {
    fn from(v: NedVector) -> Self {
        Self::new(v.north, v.east, v.down)
    }
}

impl fmt::Display for CartesianPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X(Northing): {:14.2}, Y(Easting): {:14.2}, Z(TVD): {:10.2}",
            self.north, self.east, self.down_depth
        )
    }
}
