//! Shared value types for survey geometry and well markers
//!
//! - `SurveyRow`, `StationPoint`, `CartesianPoint` - directional survey
//! - `NedVector` - north / east / down direction vectors
//! - `DipVector` - bedding plane orientation
//! - `LengthUnit` - foot / metre
//! - `WellheadRow`, `MarkerRow`, `MarkerType` - well database inputs

mod dip;
mod survey;
mod units;
mod vector;
mod well;

pub use dip::*;
pub use survey::*;
pub use units::*;
pub use vector::*;
pub use well::*;
