//! Borehole Tools: directional survey geometry and dip reorientation
//!
//! Converts sparse directional surveys (MD, inclination, azimuth) into
//! Cartesian wellbore paths with the minimum-curvature method, resamples them
//! on regular depth grids, and reorients dips logged along the borehole into
//! the geographic frame.
//!
//! ## Architecture
//!
//! - **Geometry**: the minimum-curvature core. Pure math, no I/O
//! - **Types**: value types shared by every layer
//! - **Acquisition**: delimited table reading and writing
//! - **Database**: wells, stratigraphy and markers
//! - **Report**: text and JSON outputs
//! - **Config**: TOML configuration with validation

pub mod acquisition;
pub mod config;
pub mod database;
pub mod geometry;
pub mod report;
pub mod types;

// Re-export configuration
pub use config::{OutputFormat, SurveyMode, ToolConfig};

// Re-export the geometry core
pub use geometry::{CurvatureSegment, GeometryError, MarkerReorientation, TrajectoryModel};

// Re-export commonly used types
pub use types::{CartesianPoint, DipVector, LengthUnit, StationPoint, SurveyRow};

// Re-export database and reports
pub use database::{DatabaseError, StratigraphyTable, Well, WellDatabase, WellMarker};
pub use report::{MarkerReport, ReportError, SurveyOptions, SurveyReport};
