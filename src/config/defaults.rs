//! Default constants.
//!
//! Centralises the values used when no configuration file or CLI flag sets
//! them. Grouped by section for easy discovery.

// ============================================================================
// Config File Discovery
// ============================================================================

/// Environment variable holding the path to a TOML config file.
pub const CONFIG_ENV_VAR: &str = "BOREHOLE_TOOLS_CONFIG";

/// Config file looked up in the current working directory.
pub const LOCAL_CONFIG_FILE: &str = "borehole_tools.toml";

// ============================================================================
// Data Files
// ============================================================================

/// Directory holding input tables; outputs go here unless overridden.
pub const DATA_DIR: &str = "data";

pub const WELLHEAD_FILE: &str = "sample-wellheads.txt";

pub const MARKER_FILE: &str = "sample-markers.txt";

/// Header lines skipped in every input table unless configured otherwise.
pub const HEADER_LINES: usize = 1;

/// MD, INCL, AZIM. Column 0 of the sample files is a running index.
pub const SURVEY_COLUMNS: [usize; 3] = [1, 2, 3];

/// Well name, X, Y, KB, survey file.
pub const WELLHEAD_COLUMNS: [usize; 5] = [1, 2, 3, 4, 5];

/// Well name, marker code, MD, dip, dip azimuth.
pub const MARKER_COLUMNS: [usize; 5] = [1, 2, 3, 4, 5];

// ============================================================================
// Survey Processing
// ============================================================================

/// Resampling interval along MD (depth units).
pub const INTERVAL: f64 = 50.0;

/// Smallest accepted resampling interval.
pub const MIN_INTERVAL: f64 = 0.1;

/// Intervals above this are accepted but logged as suspicious.
pub const COARSE_INTERVAL_WARNING: f64 = 1_000.0;

// ============================================================================
// Output
// ============================================================================

/// Prefix of every file written by the tool.
pub const OUTPUT_PREFIX: &str = "out_";

/// Marker report filename (text format; JSON swaps the extension).
pub const MARKER_REPORT_FILE: &str = "out_markers.txt";
