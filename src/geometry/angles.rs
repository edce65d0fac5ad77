//! Angle recovery shared by survey interpolation and dip rotation
//!
//! Both the station interpolator and the dip rotator need to turn a Cartesian
//! direction back into spherical angles. The formulas live here once so the
//! two callers cannot drift apart.

use crate::types::NedVector;
use std::f64::consts::{PI, TAU};

/// Below this absolute down-component a tangent is treated as horizontal.
pub const HORIZONTAL_TANGENT_TOLERANCE: f64 = 1e-4;

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_azimuth(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative value can round up to exactly 2π
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle into `[0, π)`.
pub fn normalize_dip(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(PI);
    if wrapped >= PI {
        0.0
    } else {
        wrapped
    }
}

/// Compass direction of the horizontal projection, in `[0, 2π)`.
pub fn azimuth_of(v: &NedVector) -> f64 {
    normalize_azimuth(v.east.atan2(v.north))
}

/// Unit borehole tangent for an inclination (from vertical) and azimuth.
pub fn tangent_from_angles(inclination: f64, azimuth: f64) -> NedVector {
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    NedVector::new(sin_i * cos_a, sin_i * sin_a, cos_i)
}

/// Inclination and azimuth of a borehole tangent.
///
/// Inclination is `atan(horizontal / down)`. When the down component is
/// within [`HORIZONTAL_TANGENT_TOLERANCE`] of zero the ratio is unstable and
/// the inclination collapses to zero.
pub fn station_angles_from_tangent(tangent: &NedVector) -> (f64, f64) {
    let inclination = if tangent.down.abs() < HORIZONTAL_TANGENT_TOLERANCE {
        0.0
    } else {
        (tangent.horizontal_length() / tangent.down).atan()
    };
    (inclination, azimuth_of(tangent))
}

/// Unit vector pointing along the maximum falling dip of a plane.
///
/// Dip is measured from horizontal, dip azimuth clockwise from grid north.
pub fn dip_vector_from_angles(dip: f64, dip_azimuth: f64) -> NedVector {
    let (sin_d, cos_d) = dip.sin_cos();
    let (sin_a, cos_a) = dip_azimuth.sin_cos();
    NedVector::new(cos_d * cos_a, cos_d * sin_a, sin_d)
}

/// Dip and dip azimuth of a unit dip vector.
///
/// Dip is `acos` of the horizontal magnitude, so it lands in `[0, π/2]`
/// whatever the sign of the down component.
pub fn dip_angles_from_vector(unit: &NedVector) -> (f64, f64) {
    let horizontal = unit.horizontal_length().min(1.0);
    (horizontal.acos(), azimuth_of(unit))
}
