//! Output writers
//!
//! Survey conversions and the marker report are written either as delimited
//! text (one header row, fixed-precision columns) or as JSON documents
//! stamped with their generation time.

pub mod markers;
pub mod records;
pub mod survey;

pub use markers::{stratigraphic_listing, MarkerReport};
pub use records::{CartesianRecord, MarkerRecord, StationRecord};
pub use survey::{SurveyOptions, SurveyReport, SurveyRows};

use crate::acquisition::AcquisitionError;
use crate::geometry::GeometryError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Write(#[from] AcquisitionError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Replace characters that cannot appear in a file name with `_`.
///
/// Well names such as `15/9-F-12` carry path separators.
pub(crate) fn file_safe_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(document)?;
    std::fs::write(path, json).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_safe_name() {
        assert_eq!(file_safe_name("15/9-F-12"), "15_9-F-12");
        assert_eq!(file_safe_name("A:B\\C*D?\"E<F>G|H"), "A_B_C_D__E_F_G_H");
        assert_eq!(file_safe_name("W\tELL"), "W_ELL");
        assert_eq!(file_safe_name("BRAVO-2"), "BRAVO-2");
    }
}
