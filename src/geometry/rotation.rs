//! Axis rotations of dip vectors
//!
//! Right-handed rotation matrices about the X (north), Y (east) and Z (down)
//! axes. After each rotation the vector is renormalized and the dip angles are
//! recovered with the shared helpers in [`super::angles`].

use super::angles;
use super::GeometryError;
use crate::types::{DipVector, NedVector};
use serde::{Deserialize, Serialize};

type Matrix3 = [[f64; 3]; 3];

/// Rotation axis in the north / east / down frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Rotation matrix for `angle` radians about this axis.
    pub fn matrix(self, angle: f64) -> Matrix3 {
        let (s, c) = angle.sin_cos();
        match self {
            Axis::X => [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]],
            Axis::Y => [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
            Axis::Z => [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }
}

fn apply(matrix: &Matrix3, v: &NedVector) -> NedVector {
    let input = v.as_array();
    let mut out = [0.0; 3];
    for (row, value) in matrix.iter().zip(out.iter_mut()) {
        *value = row.iter().zip(&input).map(|(m, x)| m * x).sum();
    }
    NedVector::from_array(out)
}

impl DipVector {
    /// Dip orientation of an arbitrary direction.
    ///
    /// The vector is normalized first; a zero-length vector has no
    /// orientation and yields [`GeometryError::DegenerateVector`].
    pub fn from_vector(v: NedVector) -> Result<Self, GeometryError> {
        let unit = v.normalized().ok_or(GeometryError::DegenerateVector)?;
        let (dip, dip_azimuth) = angles::dip_angles_from_vector(&unit);
        Ok(Self {
            dip,
            dip_azimuth,
            vector: unit,
        })
    }

    /// Rotate by `angle_deg` degrees about `axis`, returning the new orientation.
    ///
    /// `self` is left untouched, so a failed rotation cannot corrupt it.
    pub fn rotate(&self, axis: Axis, angle_deg: f64) -> Result<Self, GeometryError> {
        let rotated = apply(&axis.matrix(angle_deg.to_radians()), &self.vector);
        Self::from_vector(rotated)
    }

    pub fn rotate_x(&self, angle_deg: f64) -> Result<Self, GeometryError> {
        self.rotate(Axis::X, angle_deg)
    }

    pub fn rotate_y(&self, angle_deg: f64) -> Result<Self, GeometryError> {
        self.rotate(Axis::Y, angle_deg)
    }

    pub fn rotate_z(&self, angle_deg: f64) -> Result<Self, GeometryError> {
        self.rotate(Axis::Z, angle_deg)
    }
}
