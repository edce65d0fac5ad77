//! Well database
//!
//! Wells are built from the wellhead table, one trajectory per well, and
//! stratigraphic markers are attached afterwards:
//! - [`stratigraphy`]: code definitions and the ordered white-list
//! - [`well`]: `Well` and `WellMarker`
//!
//! Trajectories are independent of each other, so surveys are read and
//! modelled in parallel across wells.

pub mod stratigraphy;
pub mod well;

pub use stratigraphy::StratigraphyTable;
pub use well::{Well, WellMarker};

use crate::acquisition::{self, AcquisitionError};
use crate::geometry::GeometryError;
use crate::types::{LengthUnit, MarkerRow, SurveyRow, WellheadRow};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error("Well {well}: {source}")]
    Geometry {
        well: String,
        #[source]
        source: GeometryError,
    },

    #[error("Unknown stratigraphy code '{0}'")]
    UnknownStratigraphy(String),

    #[error("Unknown well '{0}'")]
    UnknownWell(String),

    #[error("Marker table needs 3 or 5 columns (well, code, MD[, dip, dip azimuth]), got {0}")]
    MarkerColumns(usize),
}

/// How survey files referenced by the wellhead table are read.
#[derive(Debug, Clone, Copy)]
pub struct SurveyLayout<'a> {
    pub data_dir: &'a Path,
    pub header_lines: usize,
    pub columns: &'a [usize],
}

/// Counts from attaching markers to wells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerLoadSummary {
    pub attached: usize,
    pub reoriented: usize,
    pub discarded: usize,
}

/// Wells keyed by name.
#[derive(Debug, Clone)]
pub struct WellDatabase {
    wells: BTreeMap<String, Well>,
    depth_unit: LengthUnit,
    surface_unit: LengthUnit,
}

impl WellDatabase {
    /// Build wells from wellhead rows and their already-parsed surveys.
    ///
    /// A repeated well name keeps the first occurrence.
    pub fn from_surveys(
        wells: Vec<(WellheadRow, Vec<SurveyRow>)>,
        depth_unit: LengthUnit,
        surface_unit: LengthUnit,
    ) -> Result<Self, DatabaseError> {
        let unique = dedup_wellheads(wells, |(head, _)| head.name.as_str());
        let built = unique
            .into_par_iter()
            .map(|(head, survey)| {
                let name = head.name.clone();
                Well::new(head, &survey, depth_unit, surface_unit)
                    .map_err(|source| DatabaseError::Geometry { well: name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_wells(built, depth_unit, surface_unit))
    }

    /// Read every survey named in the wellhead table and build the wells.
    pub fn load(
        wellheads: Vec<WellheadRow>,
        layout: SurveyLayout<'_>,
        depth_unit: LengthUnit,
        surface_unit: LengthUnit,
    ) -> Result<Self, DatabaseError> {
        let unique = dedup_wellheads(wellheads, |head| head.name.as_str());
        let built = unique
            .into_par_iter()
            .map(|head| -> Result<Well, DatabaseError> {
                let path = layout.data_dir.join(&head.survey_file);
                let survey = acquisition::read_survey(&path, layout.header_lines, layout.columns)?;
                if let Some(found) = survey.well_name.as_deref() {
                    if found != head.name {
                        debug!(well = %head.name, header = found, "Survey header names a different well");
                    }
                }
                let name = head.name.clone();
                Well::new(head, &survey.rows, depth_unit, surface_unit)
                    .map_err(|source| DatabaseError::Geometry { well: name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_wells(built, depth_unit, surface_unit))
    }

    fn from_wells(built: Vec<Well>, depth_unit: LengthUnit, surface_unit: LengthUnit) -> Self {
        let wells: BTreeMap<String, Well> =
            built.into_iter().map(|w| (w.name.clone(), w)).collect();
        info!(wells = wells.len(), "Well database built");
        Self {
            wells,
            depth_unit,
            surface_unit,
        }
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.wells.contains_key(name)
    }

    pub fn well(&self, name: &str) -> Result<&Well, DatabaseError> {
        self.wells
            .get(name)
            .ok_or_else(|| DatabaseError::UnknownWell(name.to_string()))
    }

    /// Wells sorted by name.
    pub fn wells(&self) -> impl Iterator<Item = &Well> {
        self.wells.values()
    }

    pub fn depth_unit(&self) -> LengthUnit {
        self.depth_unit
    }

    pub fn surface_unit(&self) -> LengthUnit {
        self.surface_unit
    }

    /// Attach marker rows to their wells.
    ///
    /// Rows naming an unknown well or a code outside the stratigraphy order
    /// are discarded. Rows with dip and dip azimuth are reoriented against
    /// the well trajectory.
    pub fn attach_markers(
        &mut self,
        rows: &[MarkerRow],
        strat: &StratigraphyTable,
    ) -> Result<MarkerLoadSummary, DatabaseError> {
        let mut summary = MarkerLoadSummary::default();
        for row in rows {
            let well = match self.wells.get_mut(&row.well) {
                Some(well) if strat.is_selected(&row.code) => well,
                _ => {
                    info!(well = %row.well, code = %row.code, md = row.measured_depth, "Marker discarded");
                    summary.discarded += 1;
                    continue;
                }
            };
            let marker = WellMarker::from_row(row, &well.geometry).map_err(|source| {
                DatabaseError::Geometry {
                    well: row.well.clone(),
                    source,
                }
            })?;
            if marker.reorientation.is_some() {
                summary.reoriented += 1;
            }
            if let Some(previous) = well.insert_marker(marker) {
                debug!(well = %row.well, code = %row.code, replaced_md = previous.measured_depth, "Marker replaced");
            }
            summary.attached += 1;
        }
        info!(
            attached = summary.attached,
            reoriented = summary.reoriented,
            discarded = summary.discarded,
            "Markers loaded"
        );
        Ok(summary)
    }

    /// Read a marker table and attach its rows.
    pub fn load_markers(
        &mut self,
        path: &Path,
        header_lines: usize,
        columns: &[usize],
        strat: &StratigraphyTable,
    ) -> Result<MarkerLoadSummary, DatabaseError> {
        if !matches!(columns.len(), 3 | 5) {
            return Err(DatabaseError::MarkerColumns(columns.len()));
        }
        let rows = acquisition::read_markers(path, header_lines, columns)?;
        self.attach_markers(&rows, strat)
    }
}

/// Keep the first occurrence of each well name, warning about the rest.
fn dedup_wellheads<T, F>(items: Vec<T>, name: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(name(&item).to_string()) {
            unique.push(item);
        } else {
            warn!(well = %name(&item), "Duplicate well name in wellhead table, keeping first");
        }
    }
    unique
}
