//! Well-level input rows and marker classification

use serde::{Deserialize, Serialize};

/// One row of the wellhead table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellheadRow {
    pub name: String,
    /// Grid northing (X) of the well head
    pub north: f64,
    /// Grid easting (Y) of the well head
    pub east: f64,
    /// Kelly bushing elevation above the reference level
    pub kb_elevation: f64,
    /// Directional survey file for this well
    pub survey_file: String,
}

/// One row of the marker table. Dip fields are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRow {
    pub well: String,
    pub code: String,
    pub measured_depth: f64,
    pub dip_deg: Option<f64>,
    pub dip_azimuth_deg: Option<f64>,
}

impl MarkerRow {
    /// Dip and dip azimuth, only when both are present.
    pub fn dip_pair(&self) -> Option<(f64, f64)> {
        self.dip_deg.zip(self.dip_azimuth_deg)
    }
}

/// Kind of well marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkerType {
    /// The NONE placeholder code
    #[default]
    Unknown,
    Stratigraphy,
}

impl MarkerType {
    /// Short code used in marker tables.
    pub fn code(self) -> &'static str {
        match self {
            MarkerType::Unknown => "UNKN",
            MarkerType::Stratigraphy => "STRT",
        }
    }
}
