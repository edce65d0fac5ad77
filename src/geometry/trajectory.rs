//! Trajectory model: an ordered survey with its minimum-curvature segments
//!
//! Owns the station list and the segments built over consecutive stations.
//! Segment lookup is index based: resampling walks a cursor over the segment
//! vector, single-depth queries binary-search it.

use super::curvature::CurvatureSegment;
use super::GeometryError;
use crate::types::{CartesianPoint, LengthUnit, StationPoint, SurveyRow};
use tracing::{debug, warn};

/// A first survey depth below this is taken to be at the reference point.
pub const SURFACE_DEPTH_TOLERANCE: f64 = 1e-4;

/// A grid remainder above this gets its own final point at the deepest station.
pub const GRID_RESIDUAL_TOLERANCE: f64 = 0.001;

#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryModel {
    stations: Vec<StationPoint>,
    segments: Vec<CurvatureSegment>,
    depth_unit: LengthUnit,
    surface_unit: LengthUnit,
}

impl TrajectoryModel {
    /// Build a model from raw survey rows (degrees).
    ///
    /// Validation:
    /// - at least one row, all values finite
    /// - first depth must not be negative
    /// - depths must be non-decreasing
    ///
    /// A survey that does not start at MD 0 gets a vertical surface station
    /// prepended.
    pub fn from_rows(rows: &[SurveyRow]) -> Result<Self, GeometryError> {
        let first = rows.first().ok_or_else(|| {
            GeometryError::SurveyValidation("survey contains no stations".to_string())
        })?;

        if let Some((i, bad)) = rows.iter().enumerate().find(|(_, r)| {
            !(r.measured_depth.is_finite() && r.inclination_deg.is_finite() && r.azimuth_deg.is_finite())
        }) {
            return Err(GeometryError::SurveyValidation(format!(
                "row {i} contains a non-finite value: {bad:?}"
            )));
        }

        if first.measured_depth < 0.0 {
            return Err(GeometryError::SurveyValidation(format!(
                "first MD value is negative ({})",
                first.measured_depth
            )));
        }

        let mut stations = Vec::with_capacity(rows.len() + 1);
        if first.measured_depth >= SURFACE_DEPTH_TOLERANCE {
            warn!(first_md = first.measured_depth, "Adding surface point to survey data");
            stations.push(StationPoint::surface());
        }
        stations.extend(rows.iter().copied().map(StationPoint::from));

        Self::from_stations(stations)
    }

    /// Build a model from stations already converted to radians.
    ///
    /// Depth ordering is validated; no surface station is synthesized.
    pub fn from_stations(stations: Vec<StationPoint>) -> Result<Self, GeometryError> {
        if stations.is_empty() {
            return Err(GeometryError::SurveyValidation(
                "survey contains no stations".to_string(),
            ));
        }
        if let Some(w) = stations
            .windows(2)
            .find(|w| w[1].measured_depth < w[0].measured_depth)
        {
            return Err(GeometryError::SurveyValidation(format!(
                "MD values are not ascending ({} after {})",
                w[1].measured_depth, w[0].measured_depth
            )));
        }

        let segments = Self::build_segments(&stations);
        Ok(Self {
            stations,
            segments,
            depth_unit: LengthUnit::default(),
            surface_unit: LengthUnit::default(),
        })
    }

    /// Set the vertical and horizontal length units.
    pub fn with_units(mut self, depth_unit: LengthUnit, surface_unit: LengthUnit) -> Self {
        self.depth_unit = depth_unit;
        self.surface_unit = surface_unit;
        self
    }

    /// Segments over consecutive stations, skipping zero-length pairs.
    fn build_segments(stations: &[StationPoint]) -> Vec<CurvatureSegment> {
        let mut segments = Vec::with_capacity(stations.len().saturating_sub(1));
        for pair in stations.windows(2) {
            match CurvatureSegment::new(pair[0], pair[1]) {
                Ok(segment) => segments.push(segment),
                Err(e) => debug!(error = %e, "Skipping zero-length survey interval"),
            }
        }
        debug!(
            stations = stations.len(),
            segments = segments.len(),
            "Minimum-curvature segments built"
        );
        segments
    }

    pub fn stations(&self) -> &[StationPoint] {
        &self.stations
    }

    pub fn segments(&self) -> &[CurvatureSegment] {
        &self.segments
    }

    pub fn depth_unit(&self) -> LengthUnit {
        self.depth_unit
    }

    pub fn surface_unit(&self) -> LengthUnit {
        self.surface_unit
    }

    /// Shallowest surveyed measured depth.
    pub fn min_depth(&self) -> f64 {
        self.stations.first().map_or(0.0, |s| s.measured_depth)
    }

    /// Deepest surveyed measured depth.
    pub fn max_depth(&self) -> f64 {
        self.stations.last().map_or(0.0, |s| s.measured_depth)
    }

    // ========================================================================
    // Cartesian path
    // ========================================================================

    /// Walk the segments accumulating minimum-curvature increments.
    ///
    /// Starts at `origin`, or at (0, 0, 0) when `relative` is set. Horizontal
    /// increments are converted from depth units to surface units. Returns
    /// one point more than there are segments.
    pub fn build_cartesian_path(&self, origin: CartesianPoint, relative: bool) -> Vec<CartesianPoint> {
        let scale = LengthUnit::horizontal_scale(self.depth_unit, self.surface_unit);
        let mut current = if relative { CartesianPoint::default() } else { origin };

        let mut path = Vec::with_capacity(self.segments.len() + 1);
        path.push(current);
        for segment in &self.segments {
            current = current + segment.cartesian_increment().scale_horizontal(scale);
            path.push(current);
        }
        path
    }

    // ========================================================================
    // Interpolation
    // ========================================================================

    /// Evenly spaced depths from the shallowest to the deepest station.
    ///
    /// When the span is not a whole multiple of `interval` (remainder above
    /// [`GRID_RESIDUAL_TOLERANCE`]) the deepest station depth is appended so
    /// the grid always reaches the bottom of the survey.
    pub fn build_interpolation_grid(&self, interval: f64) -> Result<Vec<f64>, GeometryError> {
        if !(interval > 0.0) || !interval.is_finite() {
            return Err(GeometryError::InvalidInterval(interval));
        }

        let min_depth = self.min_depth();
        let max_depth = self.max_depth();
        let span = max_depth - min_depth;
        let residual = span % interval;
        // Whole steps that fit in the span (floor division)
        let steps = ((span - residual) / interval).round() as usize;

        let mut grid: Vec<f64> = (0..=steps)
            .map(|i| min_depth + interval * i as f64)
            .collect();
        if residual > GRID_RESIDUAL_TOLERANCE {
            grid.push(max_depth);
        }

        debug!(
            min_depth,
            max_depth,
            interval,
            evenly_spaced = steps + 1,
            residual,
            points = grid.len(),
            "Interpolation grid built"
        );
        Ok(grid)
    }

    /// Interpolate a station at every grid depth.
    ///
    /// Grid depths must be non-decreasing. A cursor advances over the
    /// segments so the whole grid is resolved in a single pass.
    pub fn resample_at_grid(&self, grid: &[f64]) -> Result<Vec<StationPoint>, GeometryError> {
        if let Some(w) = grid.windows(2).find(|w| w[1] < w[0]) {
            return Err(GeometryError::SurveyValidation(format!(
                "interpolation depths are not ascending ({} after {})",
                w[1], w[0]
            )));
        }

        if self.segments.is_empty() {
            return Ok(grid.iter().map(|_| self.stations[0]).collect());
        }

        let last = self.segments.len() - 1;
        let mut cursor = 0;
        let mut resampled = Vec::with_capacity(grid.len());
        for &md in grid {
            while cursor < last && md > self.segments[cursor].to().measured_depth {
                cursor += 1;
            }
            let segment = &self.segments[cursor];
            debug!(
                from_md = segment.from().measured_depth,
                to_md = segment.to().measured_depth,
                md,
                "Interpolating grid point"
            );
            resampled.push(segment.interpolate_at_md(md));
        }
        Ok(resampled)
    }

    /// New model over an evenly spaced grid, segments rebuilt on the grid.
    pub fn resampled(&self, interval: f64) -> Result<Self, GeometryError> {
        let grid = self.build_interpolation_grid(interval)?;
        let stations = self.resample_at_grid(&grid)?;
        Ok(Self::from_stations(stations)?.with_units(self.depth_unit, self.surface_unit))
    }

    /// Station at an arbitrary measured depth.
    ///
    /// Depths outside the surveyed interval are clamped to the nearest end
    /// and a warning is logged; this is not an error.
    pub fn point_at_depth(&self, depth: f64) -> StationPoint {
        let min_depth = self.min_depth();
        let max_depth = self.max_depth();
        let md = if depth < min_depth {
            warn!(requested = depth, clamped = min_depth, "Depth extrapolation beyond well data was shortened");
            min_depth
        } else if depth > max_depth {
            warn!(requested = depth, clamped = max_depth, "Depth extrapolation beyond well data was shortened");
            max_depth
        } else {
            depth
        };

        if self.segments.is_empty() {
            return self.stations[0];
        }

        // First segment whose lower station reaches the depth
        let index = self
            .segments
            .partition_point(|s| s.to().measured_depth < md)
            .min(self.segments.len() - 1);
        self.segments[index].interpolate_at_md(md)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_survey() -> TrajectoryModel {
        TrajectoryModel::from_rows(&[
            SurveyRow::new(0.0, 0.0, 0.0),
            SurveyRow::new(500.0, 0.0, 0.0),
            SurveyRow::new(1000.0, 15.0, 45.0),
            SurveyRow::new(1500.0, 30.0, 50.0),
            SurveyRow::new(2030.0, 32.0, 55.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_negative_first_depth_rejected() {
        let result = TrajectoryModel::from_rows(&[SurveyRow::new(-5.0, 0.0, 0.0)]);
        assert!(matches!(result, Err(GeometryError::SurveyValidation(_))));
    }

    #[test]
    fn test_descending_depths_rejected() {
        let result = TrajectoryModel::from_rows(&[
            SurveyRow::new(0.0, 0.0, 0.0),
            SurveyRow::new(200.0, 1.0, 0.0),
            SurveyRow::new(150.0, 2.0, 0.0),
        ]);
        assert!(matches!(result, Err(GeometryError::SurveyValidation(_))));
    }

    #[test]
    fn test_empty_survey_rejected() {
        assert!(TrajectoryModel::from_rows(&[]).is_err());
    }

    #[test]
    fn test_surface_station_prepended() {
        let model = TrajectoryModel::from_rows(&[
            SurveyRow::new(100.0, 2.0, 10.0),
            SurveyRow::new(200.0, 4.0, 10.0),
        ])
        .unwrap();
        assert_eq!(model.stations().len(), 3);
        assert_eq!(model.stations()[0], StationPoint::surface());
        assert_eq!(model.segments().len(), 2);
    }

    #[test]
    fn test_equal_depths_skip_segment() {
        let model = TrajectoryModel::from_rows(&[
            SurveyRow::new(0.0, 0.0, 0.0),
            SurveyRow::new(100.0, 5.0, 0.0),
            SurveyRow::new(100.0, 6.0, 0.0),
            SurveyRow::new(200.0, 8.0, 0.0),
        ])
        .unwrap();
        assert_eq!(model.stations().len(), 4);
        assert_eq!(model.segments().len(), 2);
        assert!(model.segments().iter().all(|s| s.delta_md() > 0.0));
        let path = model.build_cartesian_path(CartesianPoint::default(), true);
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn test_grid_with_residual_ends_at_max() {
        let model = build_survey();
        let grid = model.build_interpolation_grid(100.0).unwrap();
        assert_eq!(grid.first().copied(), Some(0.0));
        assert_eq!(grid.last().copied(), Some(2030.0));
        assert_eq!(grid.len(), 22);
        assert!((grid[20] - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_without_residual() {
        let model = build_survey();
        let grid = model.build_interpolation_grid(10.0).unwrap();
        assert_eq!(grid.len(), 204);
        assert!((grid.last().unwrap() - 2030.0).abs() < GRID_RESIDUAL_TOLERANCE);
    }

    #[test]
    fn test_grid_rejects_zero_interval() {
        let model = build_survey();
        assert!(matches!(
            model.build_interpolation_grid(0.0),
            Err(GeometryError::InvalidInterval(_))
        ));
    }

    #[test]
    fn test_resample_reproduces_stations() {
        let model = build_survey();
        let grid: Vec<f64> = model.stations().iter().map(|s| s.measured_depth).collect();
        let resampled = model.resample_at_grid(&grid).unwrap();
        for (a, b) in resampled.iter().zip(model.stations()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_resample_rejects_unsorted_grid() {
        let model = build_survey();
        assert!(model.resample_at_grid(&[0.0, 600.0, 400.0]).is_err());
    }

    #[test]
    fn test_point_at_depth_clamps() {
        let model = build_survey();
        let below = model.point_at_depth(-50.0);
        let above = model.point_at_depth(9999.0);
        assert_eq!(below, model.stations()[0]);
        let last = model.stations().last().unwrap();
        assert_eq!(above.inclination, last.inclination);
        assert_eq!(above.azimuth, last.azimuth);
    }

    #[test]
    fn test_point_at_depth_matches_resample() {
        let model = build_survey();
        let grid = model.build_interpolation_grid(50.0).unwrap();
        let resampled = model.resample_at_grid(&grid).unwrap();
        for (md, station) in grid.iter().zip(&resampled) {
            let single = model.point_at_depth(*md);
            assert!((single.inclination - station.inclination).abs() < 1e-12, "md={md}");
            assert!((single.azimuth - station.azimuth).abs() < 1e-12, "md={md}");
        }
    }

    #[test]
    fn test_vertical_well_cartesian_path() {
        let model = TrajectoryModel::from_rows(&[
            SurveyRow::new(0.0, 0.0, 0.0),
            SurveyRow::new(1000.0, 0.0, 0.0),
        ])
        .unwrap();
        let origin = CartesianPoint::from_wellhead(100.0, 200.0, 30.0);
        let path = model.build_cartesian_path(origin, false);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], origin);
        assert!((path[1].down_depth - 970.0).abs() < 1e-9);
        assert_eq!(path[1].north, 100.0);

        let relative = model.build_cartesian_path(origin, true);
        assert_eq!(relative[0], CartesianPoint::default());
    }

    #[test]
    fn test_mixed_units_scale_horizontal_only() {
        let rows = [SurveyRow::new(0.0, 0.0, 0.0), SurveyRow::new(1000.0, 30.0, 0.0)];
        let feet = TrajectoryModel::from_rows(&rows).unwrap();
        let mixed = TrajectoryModel::from_rows(&rows)
            .unwrap()
            .with_units(LengthUnit::Foot, LengthUnit::Metre);
        let a = feet.build_cartesian_path(CartesianPoint::default(), true)[1];
        let b = mixed.build_cartesian_path(CartesianPoint::default(), true)[1];
        assert!((b.north - a.north * 0.3048).abs() < 1e-9);
        assert_eq!(a.down_depth, b.down_depth);
    }

    #[test]
    fn test_single_station_model() {
        let model = TrajectoryModel::from_rows(&[SurveyRow::new(0.0, 0.0, 0.0)]).unwrap();
        assert!(model.segments().is_empty());
        assert_eq!(model.build_cartesian_path(CartesianPoint::default(), true).len(), 1);
        assert_eq!(model.point_at_depth(120.0), model.stations()[0]);
        assert_eq!(model.build_interpolation_grid(10.0).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_resampled_model_keeps_units_and_end_depth() {
        let model = build_survey().with_units(LengthUnit::Metre, LengthUnit::Metre);
        let fine = model.resampled(25.0).unwrap();
        assert_eq!(fine.depth_unit(), LengthUnit::Metre);
        assert_eq!(fine.max_depth(), model.max_depth());
        assert!(fine.segments().len() > model.segments().len());
    }
}
