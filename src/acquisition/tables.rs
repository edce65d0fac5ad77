//! Typed readers for the input tables
//!
//! Column indices are zero-based. The defaults used by the configuration skip
//! column 0, which in the sample files is a running index.

use super::delimited::{parse_number, DelimitedFile};
use super::AcquisitionError;
use crate::types::{MarkerRow, SurveyRow, WellheadRow};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

static WELL_NAME_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn well_name_regex() -> Option<&'static Regex> {
    WELL_NAME_RE
        .get_or_init(|| Regex::new(r"(?i)^well:\s*(\S*?),").ok())
        .as_ref()
}

/// Find a well name in survey header lines of the form `Well: NAME, ...`.
///
/// Every header line is scanned and the last matching line wins.
pub fn detect_well_name<S: AsRef<str>>(header: &[S]) -> Option<String> {
    let re = well_name_regex()?;
    header
        .iter()
        .filter_map(|line| {
            re.captures(line.as_ref())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .filter(|name| !name.is_empty())
        })
        .last()
}

fn check_columns(columns: &[usize], allowed: &[usize], what: &str) -> Result<(), AcquisitionError> {
    if allowed.contains(&columns.len()) {
        Ok(())
    } else {
        Err(AcquisitionError::ColumnSpec(format!(
            "{what} needs {allowed:?} columns, got {}",
            columns.len()
        )))
    }
}

/// A parsed directional survey file.
#[derive(Debug, Clone)]
pub struct SurveyFile {
    /// Well name found in the header, if any
    pub well_name: Option<String>,
    pub rows: Vec<SurveyRow>,
}

/// Read MD / INCL / AZIM rows from a survey file.
pub fn read_survey(
    path: &Path,
    header_lines: usize,
    columns: &[usize],
) -> Result<SurveyFile, AcquisitionError> {
    check_columns(columns, &[3], "Survey file")?;
    let reader = DelimitedFile::new(path, header_lines, columns);
    let well_name = detect_well_name(&reader.read_head()?);

    let mut rows = Vec::new();
    for (line, fields) in reader.read_rows()? {
        rows.push(SurveyRow::new(
            parse_number(&fields[0], path, line, "MD")?,
            parse_number(&fields[1], path, line, "INCL")?,
            parse_number(&fields[2], path, line, "AZIM")?,
        ));
    }

    info!(
        path = %path.display(),
        well = well_name.as_deref().unwrap_or("-"),
        stations = rows.len(),
        "Survey loaded"
    );
    Ok(SurveyFile { well_name, rows })
}

/// Read well name, X, Y, KB and survey filename rows.
pub fn read_wellheads(
    path: &Path,
    header_lines: usize,
    columns: &[usize],
) -> Result<Vec<WellheadRow>, AcquisitionError> {
    check_columns(columns, &[5], "Wellhead file")?;
    let reader = DelimitedFile::new(path, header_lines, columns);

    let mut rows = Vec::new();
    for (line, fields) in reader.read_rows()? {
        rows.push(WellheadRow {
            name: fields[0].clone(),
            north: parse_number(&fields[1], path, line, "X")?,
            east: parse_number(&fields[2], path, line, "Y")?,
            kb_elevation: parse_number(&fields[3], path, line, "KB")?,
            survey_file: fields[4].clone(),
        });
    }
    debug!(path = %path.display(), wells = rows.len(), "Wellheads read");
    Ok(rows)
}

/// Read marker rows: well, code, MD and optionally dip and dip azimuth.
///
/// With five columns the dip fields may be missing or empty on any row; they
/// are kept only when non-empty.
pub fn read_markers(
    path: &Path,
    header_lines: usize,
    columns: &[usize],
) -> Result<Vec<MarkerRow>, AcquisitionError> {
    check_columns(columns, &[3, 5], "Marker file")?;
    let reader = DelimitedFile::new(path, header_lines, columns).with_required(3);

    let optional = |value: Option<&String>, line: usize, field: &str| -> Result<Option<f64>, AcquisitionError> {
        match value {
            Some(v) if !v.is_empty() => parse_number(v, path, line, field).map(Some),
            _ => Ok(None),
        }
    };

    let mut rows = Vec::new();
    for (line, fields) in reader.read_rows()? {
        rows.push(MarkerRow {
            well: fields[0].clone(),
            code: fields[1].clone(),
            measured_depth: parse_number(&fields[2], path, line, "MD")?,
            dip_deg: optional(fields.get(3), line, "DIP")?,
            dip_azimuth_deg: optional(fields.get(4), line, "DAZI")?,
        });
    }
    debug!(path = %path.display(), markers = rows.len(), "Markers read");
    Ok(rows)
}

/// Read (code, description) stratigraphy definitions.
///
/// One header line; code and description in columns 1 and 2.
pub fn read_stratigraphy_definitions(path: &Path) -> Result<Vec<(String, String)>, AcquisitionError> {
    let rows = DelimitedFile::new(path, 1, &[1, 2]).read_rows()?;
    Ok(rows
        .into_iter()
        .map(|(_, mut fields)| {
            let description = fields.pop().unwrap_or_default();
            let code = fields.pop().unwrap_or_default();
            (code, description)
        })
        .filter(|(code, _)| !code.is_empty())
        .collect())
}

/// Read stratigraphy codes in order of age, one per row in column 1.
pub fn read_stratigraphy_order(path: &Path) -> Result<Vec<String>, AcquisitionError> {
    let rows = DelimitedFile::new(path, 1, &[1]).read_rows()?;
    Ok(rows
        .into_iter()
        .filter_map(|(_, fields)| fields.into_iter().next())
        .filter(|code| !code.is_empty())
        .collect())
}
