//! Marker report over the whole well database

use super::records::MarkerRecord;
use super::{write_document, ReportError};
use crate::acquisition;
use crate::config::{defaults, OutputFormat};
use crate::database::{StratigraphyTable, WellDatabase};
use crate::types::LengthUnit;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// All markers of all wells, wells by name and markers in stratigraphic order.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerReport {
    /// Include original dips and borehole direction
    pub detailed: bool,
    pub depth_unit: LengthUnit,
    pub generated_at: DateTime<Utc>,
    pub markers: Vec<MarkerRecord>,
}

impl MarkerReport {
    pub fn build(db: &WellDatabase, strat: &StratigraphyTable, detailed: bool) -> Self {
        let markers = db
            .wells()
            .flat_map(|well| {
                well.markers_in_order(strat)
                    .into_iter()
                    .filter_map(|(_, marker)| marker)
                    .map(move |marker| MarkerRecord::new(well, marker, strat))
            })
            .collect();
        Self {
            detailed,
            depth_unit: db.depth_unit(),
            generated_at: Utc::now(),
            markers,
        }
    }

    pub fn header(&self) -> Vec<String> {
        let md = format!("MD [{}]", self.depth_unit);
        let mut header = vec!["WELL".to_string(), "MARKER".to_string(), md];
        let angles: &[&str] = if self.detailed {
            &["DIP_ORIG [deg]", "DAZI_ORIG [deg]", "DIP [deg]", "DAZI [deg]", "INCL [deg]", "AZIM [deg]"]
        } else {
            &["DIP [deg]", "DAZI [deg]"]
        };
        header.extend(angles.iter().map(|s| s.to_string()));
        header
    }

    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.markers
            .iter()
            .map(|m| if self.detailed { m.detailed_row() } else { m.basic_row() })
            .collect()
    }

    pub fn file_name(format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => defaults::MARKER_REPORT_FILE.to_string(),
            OutputFormat::Json => {
                Path::new(defaults::MARKER_REPORT_FILE)
                    .with_extension(format.extension())
                    .to_string_lossy()
                    .into_owned()
            }
        }
    }

    pub fn write(&self, dir: &Path, format: OutputFormat) -> Result<PathBuf, ReportError> {
        let path = dir.join(Self::file_name(format));
        match format {
            OutputFormat::Text => acquisition::write_rows(&path, &self.header(), &self.text_rows())?,
            OutputFormat::Json => write_document(&path, self)?,
        }
        info!(path = %path.display(), markers = self.markers.len(), "Marker report written");
        Ok(path)
    }
}

/// Per-well listing of every stratigraphic unit, `None` where a well has no pick.
pub fn stratigraphic_listing(db: &WellDatabase, strat: &StratigraphyTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stratigraphy used in calculations:");
    for (i, code) in strat.order().iter().enumerate() {
        let description = strat.description(code).unwrap_or("?");
        let _ = writeln!(out, "  Boundary {i:02}: {code:>6} - {description}");
    }
    for well in db.wells() {
        let _ = writeln!(out, "{well}");
        for (i, (_, marker)) in well.markers_in_order(strat).into_iter().enumerate() {
            match marker {
                Some(m) => {
                    let description = strat.description(&m.code).unwrap_or("?");
                    let _ = writeln!(out, "  {i:02}: {description:<20} {}", m.summary());
                }
                None => {
                    let _ = writeln!(out, "  {i:02}: None");
                }
            }
        }
    }
    out
}
