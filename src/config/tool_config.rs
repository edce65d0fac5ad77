//! Tool Configuration - units, input tables, survey processing and output
//!
//! Every section implements `Default` with the values the tool uses when no
//! file is present, so an empty TOML document is a valid configuration.

use super::defaults;
use crate::types::LengthUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `ToolConfig::load()` which searches:
/// 1. `$BOREHOLE_TOOLS_CONFIG` env var
/// 2. `./borehole_tools.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Directory holding the input tables
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub units: UnitsConfig,

    /// Directional survey reading and conversion
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Wellhead table
    #[serde(default)]
    pub wells: WellsConfig,

    /// Marker table
    #[serde(default)]
    pub markers: MarkersConfig,

    /// Optional stratigraphy overrides
    #[serde(default)]
    pub stratigraphy: StratigraphyConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(defaults::DATA_DIR)
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            units: UnitsConfig::default(),
            survey: SurveyConfig::default(),
            wells: WellsConfig::default(),
            markers: MarkersConfig::default(),
            stratigraphy: StratigraphyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Load configuration using the standard search order:
    /// 1. `$BOREHOLE_TOOLS_CONFIG` environment variable
    /// 2. `./borehole_tools.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check the local file
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!(path = %local.display(), "Loaded local config");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No config file found, using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown keys are logged as warnings and otherwise ignored.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save config to a file.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Validate ranges and column layouts, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Path of an input file relative to the data directory.
    ///
    /// Absolute paths are returned unchanged.
    pub fn data_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(file)
    }

    /// Directory receiving output files.
    pub fn output_dir(&self) -> &Path {
        self.output.dir.as_deref().unwrap_or(&self.data_dir)
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed:\n  - {}", .0.join("\n  - "))]
    Validation(Vec<String>),
}

// ============================================================================
// Units
// ============================================================================

/// Length units of the input data. Depth covers MD and TVD, surface covers
/// northing and easting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsConfig {
    #[serde(default)]
    pub depth_unit: LengthUnit,
    #[serde(default)]
    pub surface_unit: LengthUnit,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            depth_unit: LengthUnit::Foot,
            surface_unit: LengthUnit::Foot,
        }
    }
}

// ============================================================================
// Survey
// ============================================================================

/// What to produce from a directional survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyMode {
    /// Load and validate only
    None,
    /// Cartesian path through the surveyed stations
    Cartesian,
    /// Stations resampled on a regular MD grid
    #[default]
    Interpolated,
    /// Cartesian path through the resampled stations
    InterpolatedCartesian,
}

impl SurveyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SurveyMode::None => "none",
            SurveyMode::Cartesian => "cartesian",
            SurveyMode::Interpolated => "interpolated",
            SurveyMode::InterpolatedCartesian => "interpolated_cartesian",
        }
    }

    /// Numeric code 0-3 used by older job files.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(SurveyMode::None),
            1 => Some(SurveyMode::Cartesian),
            2 => Some(SurveyMode::Interpolated),
            3 => Some(SurveyMode::InterpolatedCartesian),
            _ => None,
        }
    }

    pub fn needs_resampling(self) -> bool {
        matches!(self, SurveyMode::Interpolated | SurveyMode::InterpolatedCartesian)
    }
}

impl fmt::Display for SurveyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurveyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if let Ok(index) = s.parse::<u8>() {
            return Self::from_index(index).ok_or_else(|| format!("survey mode {index} is not in 0-3"));
        }
        match s.replace('-', "_").as_str() {
            "none" => Ok(SurveyMode::None),
            "cartesian" | "cart" => Ok(SurveyMode::Cartesian),
            "interpolated" | "inter" => Ok(SurveyMode::Interpolated),
            "interpolated_cartesian" | "cart_inter" => Ok(SurveyMode::InterpolatedCartesian),
            other => Err(format!(
                "unknown survey mode '{other}' (none, cartesian, interpolated, interpolated_cartesian)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Resampling interval along MD in depth units
    #[serde(default = "default_interval")]
    pub interval: f64,

    #[serde(default)]
    pub mode: SurveyMode,

    /// Report coordinates relative to the well head instead of absolute
    #[serde(default = "default_true")]
    pub relative_coords: bool,

    /// Well head (north, east, KB elevation) used for absolute coordinates
    #[serde(default)]
    pub origin: [f64; 3],

    #[serde(default = "default_header_lines")]
    pub header_lines: usize,

    /// Zero-based columns holding MD, INCL, AZIM
    #[serde(default = "default_survey_columns")]
    pub columns: Vec<usize>,
}

fn default_interval() -> f64 {
    defaults::INTERVAL
}
fn default_true() -> bool {
    true
}
fn default_header_lines() -> usize {
    defaults::HEADER_LINES
}
fn default_survey_columns() -> Vec<usize> {
    defaults::SURVEY_COLUMNS.to_vec()
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            mode: SurveyMode::default(),
            relative_coords: true,
            origin: [0.0; 3],
            header_lines: default_header_lines(),
            columns: default_survey_columns(),
        }
    }
}

// ============================================================================
// Wellheads and Markers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellsConfig {
    #[serde(default = "default_wellhead_file")]
    pub file: PathBuf,

    #[serde(default = "default_header_lines")]
    pub header_lines: usize,

    /// Zero-based columns holding name, X, Y, KB, survey file
    #[serde(default = "default_wellhead_columns")]
    pub columns: Vec<usize>,
}

fn default_wellhead_file() -> PathBuf {
    PathBuf::from(defaults::WELLHEAD_FILE)
}
fn default_wellhead_columns() -> Vec<usize> {
    defaults::WELLHEAD_COLUMNS.to_vec()
}

impl Default for WellsConfig {
    fn default() -> Self {
        Self {
            file: default_wellhead_file(),
            header_lines: default_header_lines(),
            columns: default_wellhead_columns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkersConfig {
    #[serde(default = "default_marker_file")]
    pub file: PathBuf,

    #[serde(default = "default_header_lines")]
    pub header_lines: usize,

    /// Zero-based columns holding well, code, MD and optionally dip, dip azimuth
    #[serde(default = "default_marker_columns")]
    pub columns: Vec<usize>,
}

fn default_marker_file() -> PathBuf {
    PathBuf::from(defaults::MARKER_FILE)
}
fn default_marker_columns() -> Vec<usize> {
    defaults::MARKER_COLUMNS.to_vec()
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            file: default_marker_file(),
            header_lines: default_header_lines(),
            columns: default_marker_columns(),
        }
    }
}

/// Stratigraphy files. When unset, the built-in table is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StratigraphyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_file: Option<PathBuf>,
}

// ============================================================================
// Output
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Delimited text, one header row
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (text, json)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory, defaults to the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    #[serde(default)]
    pub format: OutputFormat,
}

// ============================================================================
// Tests
// ============================================================================
