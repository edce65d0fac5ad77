//! Reorientation of logged dips into the well's reference frame
//!
//! A dip picked on a borehole image is expressed relative to the tool axis.
//! To bring it into the geographic frame it is first tilted about Y by the
//! local borehole inclination, then turned about Z by the local borehole
//! azimuth. The order is fixed: tilt, then heading.

use super::trajectory::TrajectoryModel;
use super::GeometryError;
use crate::types::{DipVector, StationPoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A dip measurement before and after reorientation, with the borehole
/// direction used for the transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerReorientation {
    pub measured_depth: f64,
    /// Dip as measured in the tool frame, angles normalised
    pub original: DipVector,
    /// Dip in the trajectory frame
    pub reoriented: DipVector,
    /// Borehole inclination at the marker (radians)
    pub borehole_inclination: f64,
    /// Borehole azimuth at the marker (radians)
    pub borehole_azimuth: f64,
}

impl MarkerReorientation {
    /// Reorient `dip` using the trajectory direction at `measured_depth`.
    ///
    /// Depths outside the survey are clamped by the model's point query.
    pub fn reorient(
        model: &TrajectoryModel,
        dip: DipVector,
        measured_depth: f64,
    ) -> Result<Self, GeometryError> {
        let station = model.point_at_depth(measured_depth);
        Self::with_station(dip, measured_depth, &station)
    }

    /// Reorient `dip` against a known borehole station.
    pub fn with_station(
        dip: DipVector,
        measured_depth: f64,
        station: &StationPoint,
    ) -> Result<Self, GeometryError> {
        let by_y = station.inclination_deg();
        let by_z = station.azimuth_deg();
        debug!(
            md = measured_depth,
            borehole_incl = by_y,
            borehole_azim = by_z,
            "Reorienting dip"
        );

        let reoriented = dip.rotate_y(by_y)?.rotate_z(by_z)?;
        Ok(Self {
            measured_depth,
            original: dip,
            reoriented,
            borehole_inclination: station.inclination,
            borehole_azimuth: station.azimuth,
        })
    }
}
