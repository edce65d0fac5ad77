//! Flat output records and their text formatting

use crate::database::{StratigraphyTable, Well, WellMarker};
use crate::types::{CartesianPoint, StationPoint};
use serde::{Deserialize, Serialize};

/// Width and precision of Cartesian columns.
const COORD_WIDTH: usize = 14;
const COORD_PRECISION: usize = 2;
/// Width shared by MD and angle columns.
const VALUE_WIDTH: usize = 10;
const MD_PRECISION: usize = 2;
const ANGLE_PRECISION: usize = 5;

pub(crate) fn fmt_coord(v: f64) -> String {
    format!("{v:>COORD_WIDTH$.COORD_PRECISION$}")
}

pub(crate) fn fmt_md(v: f64) -> String {
    format!("{v:>VALUE_WIDTH$.MD_PRECISION$}")
}

pub(crate) fn fmt_angle(v: f64) -> String {
    format!("{v:>VALUE_WIDTH$.ANGLE_PRECISION$}")
}

/// One point of a Cartesian path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianRecord {
    pub north: f64,
    pub east: f64,
    pub tvd: f64,
}

impl CartesianRecord {
    pub fn text_row(&self) -> Vec<String> {
        vec![fmt_coord(self.north), fmt_coord(self.east), fmt_coord(self.tvd)]
    }
}

impl From<&CartesianPoint> for CartesianRecord {
    fn from(p: &CartesianPoint) -> Self {
        Self {
            north: p.north,
            east: p.east,
            tvd: p.down_depth,
        }
    }
}

/// One survey station in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub md: f64,
    pub inclination: f64,
    pub azimuth: f64,
}

impl StationRecord {
    pub fn text_row(&self) -> Vec<String> {
        vec![fmt_md(self.md), fmt_angle(self.inclination), fmt_angle(self.azimuth)]
    }
}

impl From<&StationPoint> for StationRecord {
    fn from(s: &StationPoint) -> Self {
        Self {
            md: s.measured_depth,
            inclination: s.inclination_deg(),
            azimuth: s.azimuth_deg(),
        }
    }
}

/// A well marker with its dip before and after reorientation, in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub well: String,
    pub code: String,
    pub description: String,
    pub md: f64,
    /// Dip as read from the marker table
    pub dip_original: f64,
    pub dip_azimuth_original: f64,
    /// Dip in the trajectory frame; equal to the original when not reoriented
    pub dip: f64,
    pub dip_azimuth: f64,
    /// Borehole direction at the marker
    pub inclination: f64,
    pub azimuth: f64,
    pub reoriented: bool,
}

impl MarkerRecord {
    pub fn new(well: &Well, marker: &WellMarker, strat: &StratigraphyTable) -> Self {
        let station = match marker.reorientation {
            Some(r) => (r.borehole_inclination.to_degrees(), r.borehole_azimuth.to_degrees()),
            None => {
                let s = well.geometry.point_at_depth(marker.measured_depth);
                (s.inclination_deg(), s.azimuth_deg())
            }
        };
        let dip = marker.effective_dip();
        let (dip_original, dip_azimuth_original) = marker.input_dip_deg();
        Self {
            well: well.name.clone(),
            code: marker.code.clone(),
            description: strat.description(&marker.code).unwrap_or("").to_string(),
            md: marker.measured_depth,
            dip_original,
            dip_azimuth_original,
            dip: dip.dip_deg(),
            dip_azimuth: dip.dip_azimuth_deg(),
            inclination: station.0,
            azimuth: station.1,
            reoriented: marker.reorientation.is_some(),
        }
    }

    /// MD, DIP, DAZI.
    pub fn basic_row(&self) -> Vec<String> {
        vec![
            self.well.clone(),
            self.code.clone(),
            fmt_md(self.md),
            fmt_angle(self.dip),
            fmt_angle(self.dip_azimuth),
        ]
    }

    /// MD, DIP_ORIG, DAZI_ORIG, DIP, DAZI, INCL, AZIM.
    pub fn detailed_row(&self) -> Vec<String> {
        vec![
            self.well.clone(),
            self.code.clone(),
            fmt_md(self.md),
            fmt_angle(self.dip_original),
            fmt_angle(self.dip_azimuth_original),
            fmt_angle(self.dip),
            fmt_angle(self.dip_azimuth),
            fmt_angle(self.inclination),
            fmt_angle(self.azimuth),
        ]
    }
}
