//! Borehole Tools - directional survey conversion and dip reorientation
//!
//! # Usage
//!
//! ```bash
//! # Resample one survey every 25 ft
//! borehole-tools survey --file sample-borehole.txt --interval 25
//!
//! # Absolute Cartesian path from a known well head
//! borehole-tools survey --file w1.txt --mode cartesian --absolute --origin 1000,2000,85
//!
//! # Whole well database with markers
//! borehole-tools database --detailed
//!
//! # One dip at one depth
//! borehole-tools reorient --file w1.txt --md 5000 --dip 45 --azimuth 10
//!
//! # Write a starter config
//! borehole-tools init-config
//! ```
//!
//! # Environment Variables
//!
//! - `BOREHOLE_TOOLS_CONFIG`: Path to a TOML config file
//! - `RUST_LOG`: Logging level (default: info, debug with `--verbose`)

use anyhow::{bail, Context, Result};
use borehole_tools::acquisition;
use borehole_tools::config::{self, defaults, OutputFormat, SurveyMode, ToolConfig};
use borehole_tools::database::{SurveyLayout, StratigraphyTable, WellDatabase};
use borehole_tools::report::{stratigraphic_listing, MarkerReport, SurveyOptions, SurveyReport};
use borehole_tools::types::{CartesianPoint, DipVector, LengthUnit};
use borehole_tools::{MarkerReorientation, TrajectoryModel};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "borehole-tools")]
#[command(about = "Directional survey conversion and dip reorientation")]
#[command(version)]
struct CliArgs {
    /// TOML config file (default: $BOREHOLE_TOOLS_CONFIG, then ./borehole_tools.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the input tables
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory receiving output files (default: data directory)
    #[arg(long, global = true, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Unit of MD and TVD (ft, m)
    #[arg(long, global = true)]
    depth_unit: Option<LengthUnit>,

    /// Unit of northing and easting (ft, m)
    #[arg(long, global = true)]
    surface_unit: Option<LengthUnit>,

    /// Output format (text, json)
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Convert one directional survey file
    Survey {
        /// Survey file (MD, INCL, AZIM), looked up in the data directory if not found
        #[arg(long)]
        file: PathBuf,
        /// Well name (default: read from the file header)
        #[arg(long)]
        well: Option<String>,
        /// none, cartesian, interpolated, interpolated_cartesian (or 0-3)
        #[arg(long)]
        mode: Option<SurveyMode>,
        /// Resampling interval along MD, at least 0.1
        #[arg(long, value_parser = parse_interval)]
        interval: Option<f64>,
        /// Report absolute coordinates from --origin
        #[arg(long)]
        absolute: bool,
        /// Well head as NORTH,EAST,KB
        #[arg(long, value_parser = parse_origin, allow_hyphen_values = true)]
        origin: Option<[f64; 3]>,
        /// Header lines to skip
        #[arg(long)]
        header_lines: Option<usize>,
    },

    /// Build the well database from the wellhead table and attach markers
    Database {
        /// Wellhead table (name, X, Y, KB, survey file)
        #[arg(long)]
        wells: Option<PathBuf>,
        /// Marker table (well, code, MD[, dip, dip azimuth])
        #[arg(long)]
        markers: Option<PathBuf>,
        /// Stratigraphy definition file (code, description)
        #[arg(long)]
        strat_def: Option<PathBuf>,
        /// Stratigraphy order file (one code per row)
        #[arg(long)]
        strat_order: Option<PathBuf>,
        /// Survey output mode for every well
        #[arg(long)]
        mode: Option<SurveyMode>,
        /// Resampling interval along MD, at least 0.1
        #[arg(long, value_parser = parse_interval)]
        interval: Option<f64>,
        /// Include original dips and borehole direction in the marker report
        #[arg(long)]
        detailed: bool,
    },

    /// Reorient a single dip at one depth of a survey
    Reorient {
        /// Survey file
        #[arg(long)]
        file: PathBuf,
        /// Measured depth of the dip
        #[arg(long)]
        md: f64,
        /// Dip in degrees
        #[arg(long)]
        dip: f64,
        /// Dip azimuth in degrees
        #[arg(long)]
        azimuth: f64,
    },

    /// Write the resolved configuration to a TOML file
    InitConfig {
        #[arg(long, default_value = defaults::LOCAL_CONFIG_FILE)]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_interval(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if value.is_finite() && value >= defaults::MIN_INTERVAL {
        Ok(value)
    } else {
        Err(format!("interval must be >= {}", defaults::MIN_INTERVAL))
    }
}

fn parse_origin(s: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err("origin must be NORTH,EAST,KB".to_string());
    }
    let mut origin = [0.0; 3];
    for (slot, part) in origin.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| format!("'{part}' is not a number"))?;
    }
    Ok(origin)
}

// ============================================================================
// Configuration
// ============================================================================

/// Fold CLI flags into the loaded configuration.
fn apply_overrides(config: &mut ToolConfig, args: &CliArgs) {
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = Some(dir.clone());
    }
    if let Some(unit) = args.depth_unit {
        config.units.depth_unit = unit;
    }
    if let Some(unit) = args.surface_unit {
        config.units.surface_unit = unit;
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }

    match &args.command {
        SubCommand::Survey {
            mode,
            interval,
            absolute,
            origin,
            header_lines,
            ..
        } => {
            if let Some(mode) = mode {
                config.survey.mode = *mode;
            }
            if let Some(interval) = interval {
                config.survey.interval = *interval;
            }
            if *absolute {
                config.survey.relative_coords = false;
            }
            if let Some(origin) = origin {
                config.survey.origin = *origin;
            }
            if let Some(lines) = header_lines {
                config.survey.header_lines = *lines;
            }
        }
        SubCommand::Database {
            wells,
            markers,
            strat_def,
            strat_order,
            mode,
            interval,
            ..
        } => {
            if let Some(file) = wells {
                config.wells.file = file.clone();
            }
            if let Some(file) = markers {
                config.markers.file = file.clone();
            }
            if let Some(file) = strat_def {
                config.stratigraphy.definition_file = Some(file.clone());
            }
            if let Some(file) = strat_order {
                config.stratigraphy.order_file = Some(file.clone());
            }
            if let Some(mode) = mode {
                config.survey.mode = *mode;
            }
            if let Some(interval) = interval {
                config.survey.interval = *interval;
            }
        }
        SubCommand::Reorient { .. } | SubCommand::InitConfig { .. } => {}
    }
}

/// A path as given if it exists, otherwise inside the data directory.
fn resolve_input(config: &ToolConfig, path: &Path) -> PathBuf {
    if path.exists() {
        path.to_path_buf()
    } else {
        config.data_path(path)
    }
}

fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn load_model(cfg: &ToolConfig, file: &Path) -> Result<(Option<String>, TrajectoryModel)> {
    let path = resolve_input(cfg, file);
    let survey = acquisition::read_survey(&path, cfg.survey.header_lines, &cfg.survey.columns)
        .with_context(|| format!("Failed to read survey {}", path.display()))?;
    let model = TrajectoryModel::from_rows(&survey.rows)
        .with_context(|| format!("Invalid survey {}", path.display()))?
        .with_units(cfg.units.depth_unit, cfg.units.surface_unit);
    log_segments(&model);
    Ok((survey.well_name, model))
}

fn log_segments(model: &TrajectoryModel) {
    for segment in model.segments() {
        debug!(
            from_md = segment.from().measured_depth,
            to_md = segment.to().measured_depth,
            delta_md = segment.delta_md(),
            alpha_deg = segment.subtended_angle().to_degrees(),
            dls = segment.dog_leg_severity(),
            shape_factor = segment.shape_factor(),
            "Segment"
        );
    }
}

fn ensure_output_dir(cfg: &ToolConfig) -> Result<&Path> {
    let dir = cfg.output_dir();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    Ok(dir)
}

fn run_survey(cfg: &ToolConfig, file: &Path, well: Option<String>) -> Result<()> {
    let (detected, model) = load_model(cfg, file)?;
    let well = well
        .or(detected)
        .or_else(|| file.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let [north, east, kb] = cfg.survey.origin;
    let options = SurveyOptions {
        mode: cfg.survey.mode,
        interval: cfg.survey.interval,
        relative: cfg.survey.relative_coords,
        origin: CartesianPoint::from_wellhead(north, east, kb),
    };
    info!(
        well = %well,
        stations = model.stations().len(),
        min_md = model.min_depth(),
        max_md = model.max_depth(),
        mode = %options.mode,
        "Survey loaded"
    );

    match SurveyReport::build(&well, &model, options)? {
        Some(report) => {
            let dir = ensure_output_dir(cfg)?;
            let path = report.write(dir, cfg.output.format)?;
            println!("{}", path.display());
        }
        None => info!("Survey mode 'none', no output file generated"),
    }
    Ok(())
}

fn run_database(cfg: &ToolConfig, detailed: bool) -> Result<()> {
    let strat = StratigraphyTable::load(
        cfg.stratigraphy.definition_file.as_ref().map(|f| cfg.data_path(f)).as_deref(),
        cfg.stratigraphy.order_file.as_ref().map(|f| cfg.data_path(f)).as_deref(),
    )
    .context("Failed to load stratigraphy")?;

    let wells_path = cfg.data_path(&cfg.wells.file);
    let heads = acquisition::read_wellheads(&wells_path, cfg.wells.header_lines, &cfg.wells.columns)
        .with_context(|| format!("Failed to read wellheads {}", wells_path.display()))?;

    let layout = SurveyLayout {
        data_dir: &cfg.data_dir,
        header_lines: cfg.survey.header_lines,
        columns: &cfg.survey.columns,
    };
    let mut db = WellDatabase::load(heads, layout, cfg.units.depth_unit, cfg.units.surface_unit)
        .context("Failed to build well database")?;

    let dir = ensure_output_dir(cfg)?;
    for well in db.wells() {
        log_segments(&well.geometry);
        let options = SurveyOptions {
            mode: cfg.survey.mode,
            interval: cfg.survey.interval,
            relative: false,
            origin: well.origin(),
        };
        if let Some(report) = SurveyReport::build(&well.name, &well.geometry, options)
            .with_context(|| format!("Survey conversion failed for {}", well.name))?
        {
            report.write(dir, cfg.output.format)?;
        }
    }

    let markers_path = cfg.data_path(&cfg.markers.file);
    if markers_path.exists() {
        db.load_markers(&markers_path, cfg.markers.header_lines, &cfg.markers.columns, &strat)
            .with_context(|| format!("Failed to load markers {}", markers_path.display()))?;
        let path = MarkerReport::build(&db, &strat, detailed).write(dir, cfg.output.format)?;
        println!("{}", path.display());
    } else {
        warn!(path = %markers_path.display(), "Marker file not found, skipping markers");
    }

    print!("{}", stratigraphic_listing(&db, &strat));
    Ok(())
}

fn run_reorient(cfg: &ToolConfig, file: &Path, md: f64, dip: f64, azimuth: f64) -> Result<()> {
    let (_, model) = load_model(cfg, file)?;
    let result = MarkerReorientation::reorient(&model, DipVector::new(dip, azimuth), md)
        .context("Dip reorientation failed")?;

    println!("MD:       {:10.2} {}", result.measured_depth, cfg.units.depth_unit);
    println!(
        "Borehole: INCL {:10.5}, AZIM {:10.5}",
        result.borehole_inclination.to_degrees(),
        result.borehole_azimuth.to_degrees()
    );
    println!("Input:    Dip: {dip:8.3}, Azimuth: {azimuth:8.3}");
    println!("Output:   {}", result.reoriented);
    Ok(())
}

fn run_init_config(cfg: &ToolConfig, output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists, use --force to overwrite", output.display());
    }
    cfg.save_to_file(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{}", output.display());
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose, args.log_json);

    let mut tool_config = match &args.config {
        Some(path) => ToolConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ToolConfig::load(),
    };
    apply_overrides(&mut tool_config, &args);
    tool_config.validate().context("Invalid configuration")?;
    info!(
        data_dir = %tool_config.data_dir.display(),
        depth_unit = %tool_config.units.depth_unit,
        surface_unit = %tool_config.units.surface_unit,
        "Configuration resolved"
    );
    config::init(tool_config);
    let cfg = config::get();

    match args.command {
        SubCommand::Survey { file, well, .. } => run_survey(cfg, &file, well),
        SubCommand::Database { detailed, .. } => run_database(cfg, detailed),
        SubCommand::Reorient {
            file,
            md,
            dip,
            azimuth,
        } => run_reorient(cfg, &file, md, dip, azimuth),
        SubCommand::InitConfig { output, force } => run_init_config(cfg, &output, force),
    }
}
