//! Dip / dip-azimuth of a geological plane and its falling-dip unit vector

use super::NedVector;
use crate::geometry::angles;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Orientation of a bedding plane.
///
/// `dip` is measured from horizontal in the falling direction, `dip_azimuth`
/// clockwise from grid north. The unit `vector` points along the maximum
/// falling dip. Rotations operate on the vector and re-derive the angles (see
/// `geometry::rotation`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DipVector {
    /// Dip in radians, [0, π)
    pub dip: f64,
    /// Dip azimuth in radians, [0, 2π)
    pub dip_azimuth: f64,
    /// Unit vector (north, east, down) along the falling dip
    pub vector: NedVector,
}

impl DipVector {
    /// Build from degrees. Dip is wrapped into [0°, 180°), azimuth into [0°, 360°).
    pub fn new(dip_deg: f64, dip_azimuth_deg: f64) -> Self {
        let dip = angles::normalize_dip(dip_deg.to_radians());
        let dip_azimuth = angles::normalize_azimuth(dip_azimuth_deg.to_radians());
        Self {
            dip,
            dip_azimuth,
            vector: angles::dip_vector_from_angles(dip, dip_azimuth),
        }
    }

    /// Horizontal plane (dip 0, azimuth north).
    pub fn horizontal() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn dip_deg(&self) -> f64 {
        self.dip.to_degrees()
    }

    pub fn dip_azimuth_deg(&self) -> f64 {
        self.dip_azimuth.to_degrees()
    }
}

impl Default for DipVector {
    fn default() -> Self {
        Self::horizontal()
    }
}

impl fmt::Display for DipVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dip: {:8.3}, Azimuth: {:8.3}", self.dip_deg(), self.dip_azimuth_deg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_dip_points_north() {
        let d = DipVector::horizontal();
        assert!((d.vector.north - 1.0).abs() < 1e-12);
        assert!(d.vector.down.abs() < 1e-12);
    }

    #[test]
    fn test_angles_are_wrapped() {
        let d = DipVector::new(-30.0, -90.0);
        assert!((d.dip_deg() - 150.0).abs() < 1e-9);
        assert!((d.dip_azimuth_deg() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_vector_is_unit() {
        let d = DipVector::new(37.0, 212.0);
        assert!((d.vector.length() - 1.0).abs() < 1e-12);
        assert!((d.vector.down - 37.0_f64.to_radians().sin()).abs() < 1e-12);
    }
}
