//! Three-component vectors in the north / east / down frame

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Direction vector with components along grid north, east and vertical down.
///
/// Used for station tangents and dip vectors. Not necessarily unit length:
/// blended tangents and rotated dip vectors are renormalized by their owners.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NedVector {
    pub north: f64,
    pub east: f64,
    pub down: f64,
}

impl NedVector {
    pub const fn new(north: f64, east: f64, down: f64) -> Self {
        Self { north, east, down }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.north * self.north + self.east * self.east + self.down * self.down).sqrt()
    }

    /// Length of the projection onto the horizontal (north/east) plane.
    pub fn horizontal_length(&self) -> f64 {
        (self.north * self.north + self.east * self.east).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalized(&self) -> Option<Self> {
        let len = self.length();
        if len > f64::EPSILON && len.is_finite() {
            Some(*self * (1.0 / len))
        } else {
            None
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.north, self.east, self.down]
    }

    pub fn from_array(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for NedVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.north + rhs.north, self.east + rhs.east, self.down + rhs.down)
    }
}

impl Mul<f64> for NedVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.north * rhs, self.east * rhs, self.down * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_unit_length() {
        let v = NedVector::new(3.0, 4.0, 12.0).normalized().unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v.north - 3.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_has_no_direction() {
        assert!(NedVector::default().normalized().is_none());
    }

    #[test]
    fn test_horizontal_length_ignores_down() {
        let v = NedVector::new(3.0, 4.0, 100.0);
        assert!((v.horizontal_length() - 5.0).abs() < 1e-12);
    }
}
