//! Minimum-curvature segment between two adjacent survey stations
//!
//! The wellbore between two stations is modelled as a circular arc. For the
//! arc we need:
//! - the subtended angle α between the two tangents
//! - dog-leg severity (degrees per 100 length units)
//! - the ratio (shape) factor F = tan(α/2) / (α/2) used to average tangents
//! - interpolation of intermediate stations along the arc
//!
//! Every quantity that divides by α or sin(α) has a small-angle branch.

use super::GeometryError;
use crate::types::{CartesianPoint, StationPoint};

/// Below this α (radians) the closed forms lose precision and series are used.
pub const SMALL_ANGLE_THRESHOLD: f64 = 0.02;

/// Below this α (radians) curvature is negligible and blending is linear.
pub const NEGLIGIBLE_CURVATURE: f64 = 1e-4;

/// Offsets this close to either end of a segment snap to the end station.
pub const BOUNDARY_TOLERANCE: f64 = 1e-4;

// ============================================================================
// Closed-form pieces
// ============================================================================

/// Angle subtended by the tangents of two stations (radians, ≥ 0).
///
/// Uses the haversine-style form
/// `α = 2·asin(√(sin²(ΔI/2) + sin I₁·sin I₂·sin²(ΔA/2)))`
/// which stays accurate for nearly collinear tangents where `acos(t₁·t₂)`
/// does not.
pub fn subtended_angle(a: &StationPoint, b: &StationPoint) -> f64 {
    let half_incl = ((b.inclination - a.inclination) / 2.0).sin();
    let half_azim = ((b.azimuth - a.azimuth) / 2.0).sin();
    let radicand = half_incl * half_incl
        + b.inclination.sin() * a.inclination.sin() * half_azim * half_azim;
    // Rounding can push the radicand a hair outside [0, 1]
    2.0 * radicand.clamp(0.0, 1.0).sqrt().asin()
}

/// Minimum-curvature ratio factor F = tan(α/2) / (α/2).
///
/// For α < [`SMALL_ANGLE_THRESHOLD`] a fourth-order Taylor series avoids the
/// 0/0 cancellation; F → 1 as α → 0.
pub fn shape_factor(alpha: f64) -> f64 {
    if alpha < SMALL_ANGLE_THRESHOLD {
        let a2 = alpha * alpha;
        1.0 + a2 / 12.0 * (1.0 + a2 / 10.0 * (1.0 + a2 / 168.0 * (1.0 + 31.0 * a2 / 18.0)))
    } else {
        (alpha / 2.0).tan() / (alpha / 2.0)
    }
}

/// Dog-leg severity in degrees per 100 length units.
pub fn dog_leg_severity(alpha: f64, delta_md: f64) -> f64 {
    alpha.to_degrees() * 100.0 / delta_md
}

// ============================================================================
// Segment
// ============================================================================

/// A pair of consecutive stations with the derived arc parameters.
///
/// Stations are value types and are copied in, so a segment stays valid when
/// the model rebuilds its station list over an interpolation grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureSegment {
    from: StationPoint,
    to: StationPoint,
    delta_md: f64,
    alpha: f64,
    dog_leg_severity: f64,
    shape_factor: f64,
}

impl CurvatureSegment {
    /// Build the segment from station A to station B.
    ///
    /// Fails with [`GeometryError::DegenerateSegment`] unless B lies strictly
    /// deeper than A.
    pub fn new(from: StationPoint, to: StationPoint) -> Result<Self, GeometryError> {
        let delta_md = to.measured_depth - from.measured_depth;
        if !(delta_md > 0.0) || !delta_md.is_finite() {
            return Err(GeometryError::DegenerateSegment {
                from_md: from.measured_depth,
                to_md: to.measured_depth,
            });
        }

        let alpha = subtended_angle(&from, &to);
        Ok(Self {
            from,
            to,
            delta_md,
            alpha,
            dog_leg_severity: dog_leg_severity(alpha, delta_md),
            shape_factor: shape_factor(alpha),
        })
    }

    pub fn from(&self) -> &StationPoint {
        &self.from
    }

    pub fn to(&self) -> &StationPoint {
        &self.to
    }

    pub fn delta_md(&self) -> f64 {
        self.delta_md
    }

    /// Subtended angle α in radians.
    pub fn subtended_angle(&self) -> f64 {
        self.alpha
    }

    pub fn dog_leg_severity(&self) -> f64 {
        self.dog_leg_severity
    }

    pub fn shape_factor(&self) -> f64 {
        self.shape_factor
    }

    /// True if `md` lies within `[A.md, B.md]`.
    pub fn contains_depth(&self, md: f64) -> bool {
        md >= self.from.measured_depth && md <= self.to.measured_depth
    }

    /// Displacement from A to B in depth units, before any unit scaling.
    ///
    /// `Δ = (t_A + t_B) · ΔMD · F / 2`
    pub fn cartesian_increment(&self) -> CartesianPoint {
        let sum = self.from.tangent + self.to.tangent;
        CartesianPoint::from(sum * (self.delta_md * self.shape_factor / 2.0))
    }

    /// Station at absolute measured depth `md` inside the segment.
    pub fn interpolate_at_md(&self, md: f64) -> StationPoint {
        self.interpolate(md - self.from.measured_depth)
    }

    /// Station at offset `depth` from A along the arc.
    ///
    /// Offsets within [`BOUNDARY_TOLERANCE`] of either end return that end
    /// station unchanged; offsets outside the span are clamped into it.
    pub fn interpolate(&self, depth: f64) -> StationPoint {
        if depth.abs() < BOUNDARY_TOLERANCE {
            return self.from;
        }
        if (depth - self.delta_md).abs() < BOUNDARY_TOLERANCE {
            return self.to;
        }
        let depth = depth.clamp(0.0, self.delta_md);

        let fraction = depth / self.delta_md;
        let alpha_star = fraction * self.alpha;
        let alpha_rest = (1.0 - fraction) * self.alpha;

        let weight_a = self.tangential_factor(alpha_rest, 1.0 - fraction);
        let weight_b = self.tangential_factor(alpha_star, fraction);

        let blended = self.from.tangent * weight_a + self.to.tangent * weight_b;
        StationPoint::from_tangent(self.from.measured_depth + depth, blended)
    }

    /// Weight of one end tangent when blending along the arc.
    ///
    /// Exact spherical weight `sin(α·f) / sin(α)` for α ≥ 0.02, linear `f`
    /// for negligible curvature, and in between the series expansion of the
    /// exact weight in α² with odd powers of `f` up to f⁹.
    /// The series result is continuous with the exact branch at α = 0.02.
    fn tangential_factor(&self, component_angle: f64, fraction: f64) -> f64 {
        let alpha = self.alpha;
        if alpha >= SMALL_ANGLE_THRESHOLD {
            return component_angle.sin() / alpha.sin();
        }
        if alpha.abs() <= NEGLIGIBLE_CURVATURE {
            return fraction;
        }

        let a2 = alpha * alpha;
        let f = fraction;
        let f2 = f * f;
        f + a2
            * (f * (1.0 / 6.0 - f2 / 6.0)
                + a2 * (f * (7.0 / 360.0 + f2 * (-1.0 / 36.0 + f2 / 120.0))
                    + a2 * (f * (31.0 / 15120.0
                        + f2 * (-7.0 / 2160.0 + f2 * (1.0 / 720.0 - f2 / 5040.0)))
                        + f * a2
                            * (127.0 / 604_800.0
                                + f2 * (-31.0 / 90720.0
                                    + f2 * (7.0 / 43200.0
                                        + f2 * (-1.0 / 30240.0 + f2 / 362_880.0)))))))
    }
}
