//! A single well: wellhead, trajectory and stratigraphic markers

use super::stratigraphy::{StratigraphyTable, NONE_CODE};
use crate::geometry::{GeometryError, MarkerReorientation, TrajectoryModel};
use crate::types::{CartesianPoint, DipVector, LengthUnit, MarkerRow, MarkerType, SurveyRow, WellheadRow};
use std::collections::BTreeMap;
use std::fmt;

/// A marker picked in a well, with its dip reoriented when one was logged.
#[derive(Debug, Clone, PartialEq)]
pub struct WellMarker {
    pub marker_type: MarkerType,
    /// Stratigraphy code
    pub code: String,
    pub measured_depth: f64,
    /// Dip and dip azimuth in degrees exactly as read, before normalisation
    pub dip_input: Option<(f64, f64)>,
    /// Normalised input dip; horizontal when none was given
    pub dip: DipVector,
    pub reorientation: Option<MarkerReorientation>,
}

impl WellMarker {
    /// Build from a marker row, reorienting against `geometry` when the row
    /// carries both dip and dip azimuth.
    pub fn from_row(row: &MarkerRow, geometry: &TrajectoryModel) -> Result<Self, GeometryError> {
        let marker_type = if row.code == NONE_CODE {
            MarkerType::Unknown
        } else {
            MarkerType::Stratigraphy
        };
        let (dip, reorientation) = match row.dip_pair() {
            Some((dip_deg, azimuth_deg)) => {
                let dip = DipVector::new(dip_deg, azimuth_deg);
                let reoriented = MarkerReorientation::reorient(geometry, dip, row.measured_depth)?;
                (dip, Some(reoriented))
            }
            None => (DipVector::default(), None),
        };
        Ok(Self {
            marker_type,
            code: row.code.clone(),
            measured_depth: row.measured_depth,
            dip_input: row.dip_pair(),
            dip,
            reorientation,
        })
    }

    /// Input dip and azimuth in degrees, `(0, 0)` when none was given.
    pub fn input_dip_deg(&self) -> (f64, f64) {
        self.dip_input.unwrap_or((self.dip.dip_deg(), self.dip.dip_azimuth_deg()))
    }

    /// Reoriented dip if available, otherwise the dip as read.
    pub fn effective_dip(&self) -> DipVector {
        self.reorientation.map(|r| r.reoriented).unwrap_or(self.dip)
    }

    /// One-line summary used in stratigraphic listings.
    pub fn summary(&self) -> String {
        let dip = self.effective_dip();
        format!(
            "{:<6} {} MD: {:10.2}, Dip: {:6.2}, Azimuth: {:6.2}",
            self.code,
            self.marker_type.code(),
            self.measured_depth,
            dip.dip_deg(),
            dip.dip_azimuth_deg()
        )
    }
}

/// A well with its trajectory and markers keyed by stratigraphy code.
#[derive(Debug, Clone)]
pub struct Well {
    pub name: String,
    /// Wellhead as read from the wellhead table
    pub wellhead: WellheadRow,
    pub geometry: TrajectoryModel,
    pub markers: BTreeMap<String, WellMarker>,
}

impl Well {
    pub fn new(
        wellhead: WellheadRow,
        survey: &[SurveyRow],
        depth_unit: LengthUnit,
        surface_unit: LengthUnit,
    ) -> Result<Self, GeometryError> {
        let geometry = TrajectoryModel::from_rows(survey)?.with_units(depth_unit, surface_unit);
        Ok(Self {
            name: wellhead.name.clone(),
            wellhead,
            geometry,
            markers: BTreeMap::new(),
        })
    }

    /// Starting point for absolute coordinates: (north, east, -KB).
    pub fn origin(&self) -> CartesianPoint {
        CartesianPoint::from_wellhead(
            self.wellhead.north,
            self.wellhead.east,
            self.wellhead.kb_elevation,
        )
    }

    /// Insert a marker; a later marker with the same code replaces the earlier one.
    pub fn insert_marker(&mut self, marker: WellMarker) -> Option<WellMarker> {
        self.markers.insert(marker.code.clone(), marker)
    }

    /// Markers in stratigraphic order, `None` where the well has no pick.
    pub fn markers_in_order<'a>(
        &'a self,
        strat: &'a StratigraphyTable,
    ) -> Vec<(&'a str, Option<&'a WellMarker>)> {
        strat
            .order()
            .iter()
            .map(|code| (code.as_str(), self.markers.get(code)))
            .collect()
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Well name: {}, X: {:10.1}, Y: {:10.1}, KB: {:6.1}",
            self.name, self.wellhead.north, self.wellhead.east, self.wellhead.kb_elevation
        )
    }
}
