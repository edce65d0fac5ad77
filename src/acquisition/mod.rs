//! Data acquisition from delimited text files
//!
//! Everything that touches the filesystem on the input side lives here:
//! - [`delimited`]: quote-aware field splitting, header skipping, column selection
//! - [`tables`]: typed row parsers for surveys, wellheads, markers and stratigraphy
//!
//! The geometry core never reads files; it receives the parsed rows.

pub mod delimited;
pub mod tables;

pub use delimited::{write_rows, DelimitedFile};
pub use tables::{
    detect_well_name, read_markers, read_stratigraphy_definitions, read_stratigraphy_order,
    read_survey, read_wellheads, SurveyFile,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing delimited files.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: line {line} has no column {column}")]
    MissingColumn {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("{path}: line {line}: cannot parse {field} from '{value}'")]
    Parse {
        path: PathBuf,
        line: usize,
        field: String,
        value: String,
    },

    #[error("Invalid column selection: {0}")]
    ColumnSpec(String),
}
