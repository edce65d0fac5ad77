//! Survey conversion outputs: Cartesian paths and resampled stations

use super::records::{CartesianRecord, StationRecord};
use super::{file_safe_name, write_document, ReportError};
use crate::acquisition;
use crate::config::{defaults, OutputFormat, SurveyMode};
use crate::geometry::{GeometryError, TrajectoryModel};
use crate::types::{CartesianPoint, LengthUnit};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Rows of a survey report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum SurveyRows {
    Cartesian(Vec<CartesianRecord>),
    Stations(Vec<StationRecord>),
}

impl SurveyRows {
    pub fn len(&self) -> usize {
        match self {
            SurveyRows::Cartesian(rows) => rows.len(),
            SurveyRows::Stations(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Options shared by every survey conversion.
#[derive(Debug, Clone, Copy)]
pub struct SurveyOptions {
    pub mode: SurveyMode,
    pub interval: f64,
    /// Path relative to (0, 0, 0) instead of the well head
    pub relative: bool,
    pub origin: CartesianPoint,
}

/// Output of one survey conversion.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyReport {
    pub well: String,
    pub mode: SurveyMode,
    pub relative: bool,
    pub depth_unit: LengthUnit,
    pub surface_unit: LengthUnit,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub rows: SurveyRows,
}

impl SurveyReport {
    /// Convert `model` according to `options.mode`.
    ///
    /// Returns `None` for [`SurveyMode::None`].
    pub fn build(
        well: &str,
        model: &TrajectoryModel,
        options: SurveyOptions,
    ) -> Result<Option<Self>, GeometryError> {
        let cartesian = |m: &TrajectoryModel| {
            SurveyRows::Cartesian(
                m.build_cartesian_path(options.origin, options.relative)
                    .iter()
                    .map(CartesianRecord::from)
                    .collect(),
            )
        };

        let rows = match options.mode {
            SurveyMode::None => return Ok(None),
            SurveyMode::Cartesian => cartesian(model),
            SurveyMode::Interpolated => SurveyRows::Stations(
                model
                    .resampled(options.interval)?
                    .stations()
                    .iter()
                    .map(StationRecord::from)
                    .collect(),
            ),
            SurveyMode::InterpolatedCartesian => cartesian(&model.resampled(options.interval)?),
        };

        debug!(well, mode = %options.mode, rows = rows.len(), "Survey report built");
        Ok(Some(Self {
            well: well.to_string(),
            mode: options.mode,
            relative: options.relative,
            depth_unit: model.depth_unit(),
            surface_unit: model.surface_unit(),
            generated_at: Utc::now(),
            rows,
        }))
    }

    /// Header row: a well note followed by the column labels.
    pub fn header(&self) -> Vec<String> {
        let note = format!("Well: {}", self.well);
        let (s, d) = (self.surface_unit, self.depth_unit);
        match (&self.rows, self.relative) {
            (SurveyRows::Stations(_), _) => vec![
                note,
                format!("MD [{d}]"),
                "INCL [deg]".to_string(),
                "AZIM [deg]".to_string(),
            ],
            (SurveyRows::Cartesian(_), true) => vec![
                note,
                format!("dX(N) [{s}]"),
                format!("dY(E) [{s}]"),
                format!("dZ(TVD) [{d}]"),
            ],
            (SurveyRows::Cartesian(_), false) => vec![
                note,
                format!("X(N) [{s}]"),
                format!("Y(E) [{s}]"),
                format!("Z(TVD) [{d}]"),
            ],
        }
    }

    pub fn text_rows(&self) -> Vec<Vec<String>> {
        match &self.rows {
            SurveyRows::Cartesian(rows) => rows.iter().map(CartesianRecord::text_row).collect(),
            SurveyRows::Stations(rows) => rows.iter().map(StationRecord::text_row).collect(),
        }
    }

    /// `out_<well>_borehole_<suffix>.<ext>`
    pub fn file_name(&self, format: OutputFormat) -> String {
        let suffix = match self.mode {
            SurveyMode::Cartesian => "cart_orig",
            SurveyMode::Interpolated => "curve_inter",
            SurveyMode::InterpolatedCartesian | SurveyMode::None => "cart_inter",
        };
        format!(
            "{}{}_borehole_{}.{}",
            defaults::OUTPUT_PREFIX,
            file_safe_name(&self.well),
            suffix,
            format.extension()
        )
    }

    /// Write into `dir`, returning the path written.
    pub fn write(&self, dir: &Path, format: OutputFormat) -> Result<PathBuf, ReportError> {
        let path = dir.join(self.file_name(format));
        match format {
            OutputFormat::Text => acquisition::write_rows(&path, &self.header(), &self.text_rows())?,
            OutputFormat::Json => write_document(&path, self)?,
        }
        info!(well = %self.well, path = %path.display(), rows = self.rows.len(), "Survey output written");
        Ok(path)
    }
}
