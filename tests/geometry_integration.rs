//! Geometry Integration Tests
//!
//! Properties of the minimum-curvature model and dip reorientation,
//! exercised through the public API only.

use borehole_tools::geometry::{rotation::Axis, shape_factor, subtended_angle, CurvatureSegment};
use borehole_tools::{
    CartesianPoint, DipVector, GeometryError, LengthUnit, MarkerReorientation, StationPoint,
    SurveyRow, TrajectoryModel,
};

const EPS: f64 = 1e-9;

fn build_and_turn() -> TrajectoryModel {
    TrajectoryModel::from_rows(&[
        SurveyRow::new(0.0, 0.0, 0.0),
        SurveyRow::new(500.0, 0.0, 0.0),
        SurveyRow::new(1200.0, 35.0, 60.0),
        SurveyRow::new(2000.0, 62.0, 95.0),
        SurveyRow::new(2750.0, 64.0, 110.0),
    ])
    .unwrap()
}

// ============================================================================
// Curvature
// ============================================================================

#[test]
fn identical_stations_have_no_curvature() {
    let a = StationPoint::new(100.0, 27.5, 213.0);
    let b = StationPoint::new(200.0, 27.5, 213.0);
    let alpha = subtended_angle(&a, &b);
    assert_eq!(alpha, 0.0);
    assert_eq!(shape_factor(alpha), 1.0);

    let segment = CurvatureSegment::new(a, b).unwrap();
    assert_eq!(segment.dog_leg_severity(), 0.0);
}

#[test]
fn build_from_vertical_matches_reference_scenario() {
    let a = StationPoint::new(0.0, 0.0, 0.0);
    let b = StationPoint::new(1000.0, 30.0, 45.0);
    let segment = CurvatureSegment::new(a, b).unwrap();

    assert!((segment.subtended_angle() - 30f64.to_radians()).abs() < 1e-9);
    assert!((segment.dog_leg_severity() - 3.0).abs() < 1e-9);

    let mid = segment.interpolate(500.0);
    assert_eq!(mid.measured_depth, 500.0);
    assert!(mid.inclination_deg() > 0.0 && mid.inclination_deg() < 30.0);
    assert!((mid.azimuth_deg() - 45.0).abs() < 1e-9);
}

#[test]
fn segment_ends_are_returned_unchanged() {
    let a = StationPoint::new(1200.0, 35.0, 60.0);
    let b = StationPoint::new(2000.0, 62.0, 95.0);
    let segment = CurvatureSegment::new(a, b).unwrap();
    assert_eq!(segment.interpolate(0.0), a);
    assert_eq!(segment.interpolate(segment.delta_md()), b);
}

#[test]
fn zero_length_segment_is_rejected() {
    let a = StationPoint::new(800.0, 10.0, 10.0);
    let err = CurvatureSegment::new(a, a).unwrap_err();
    assert!(matches!(err, GeometryError::DegenerateSegment { .. }));
}

// ============================================================================
// Trajectory Model
// ============================================================================

#[test]
fn survey_validation_errors() {
    let negative = TrajectoryModel::from_rows(&[SurveyRow::new(-5.0, 0.0, 0.0)]);
    assert!(matches!(negative, Err(GeometryError::SurveyValidation(_))));

    let descending = TrajectoryModel::from_rows(&[
        SurveyRow::new(0.0, 0.0, 0.0),
        SurveyRow::new(900.0, 5.0, 0.0),
        SurveyRow::new(850.0, 6.0, 0.0),
    ]);
    assert!(matches!(descending, Err(GeometryError::SurveyValidation(_))));

    let empty = TrajectoryModel::from_rows(&[]);
    assert!(matches!(empty, Err(GeometryError::SurveyValidation(_))));
}

#[test]
fn surface_station_is_prepended() {
    let model = TrajectoryModel::from_rows(&[
        SurveyRow::new(300.0, 2.0, 180.0),
        SurveyRow::new(900.0, 8.0, 190.0),
    ])
    .unwrap();
    assert_eq!(model.stations().len(), 3);
    assert_eq!(model.min_depth(), 0.0);
    assert_eq!(model.stations()[0], StationPoint::surface());
}

#[test]
fn duplicate_depths_are_tolerated() {
    let model = TrajectoryModel::from_rows(&[
        SurveyRow::new(0.0, 0.0, 0.0),
        SurveyRow::new(600.0, 10.0, 30.0),
        SurveyRow::new(600.0, 10.0, 30.0),
        SurveyRow::new(1200.0, 20.0, 40.0),
    ])
    .unwrap();
    assert_eq!(model.stations().len(), 4);
    assert_eq!(model.segments().len(), 2);

    let path = model.build_cartesian_path(CartesianPoint::default(), true);
    assert_eq!(path.len(), model.segments().len() + 1);
    assert!(path.iter().all(|p| p.north.is_finite() && p.down_depth.is_finite()));
}

#[test]
fn vertical_well_path() {
    let model = TrajectoryModel::from_rows(&[
        SurveyRow::new(0.0, 0.0, 0.0),
        SurveyRow::new(1000.0, 0.0, 0.0),
    ])
    .unwrap();
    let path = model.build_cartesian_path(CartesianPoint::default(), true);
    assert_eq!(path.len(), 2);
    assert!((path[1].down_depth - 1000.0).abs() < EPS);
    assert!(path[1].north.abs() < EPS && path[1].east.abs() < EPS);
}

#[test]
fn absolute_path_starts_at_wellhead() {
    let origin = CartesianPoint::from_wellhead(6_500_000.0, 450_000.0, 82.0);
    let model = build_and_turn();
    let relative = model.build_cartesian_path(origin, true);
    let absolute = model.build_cartesian_path(origin, false);

    assert_eq!(relative[0], CartesianPoint::default());
    assert_eq!(absolute[0], origin);
    for (r, a) in relative.iter().zip(&absolute) {
        assert!((a.north - r.north - origin.north).abs() < 1e-6);
        assert!((a.east - r.east - origin.east).abs() < 1e-6);
        assert!((a.down_depth - r.down_depth - origin.down_depth).abs() < 1e-6);
    }
}

#[test]
fn horizontal_scale_applies_to_north_and_east_only() {
    let rows = [SurveyRow::new(0.0, 60.0, 90.0), SurveyRow::new(1000.0, 60.0, 90.0)];
    let feet = TrajectoryModel::from_rows(&rows).unwrap();
    let mixed = TrajectoryModel::from_rows(&rows)
        .unwrap()
        .with_units(LengthUnit::Foot, LengthUnit::Metre);

    let ft_end = feet.build_cartesian_path(CartesianPoint::default(), true)[1];
    let m_end = mixed.build_cartesian_path(CartesianPoint::default(), true)[1];

    assert!((ft_end.east - 1000.0 * 60f64.to_radians().sin()).abs() < 1e-6);
    assert!((m_end.east - ft_end.east * 0.3048).abs() < 1e-6);
    assert!((m_end.down_depth - ft_end.down_depth).abs() < EPS);
    assert!((ft_end.down_depth - 500.0).abs() < 1e-6);
}

#[test]
fn grid_covers_full_depth_range() {
    let model = TrajectoryModel::from_rows(&[
        SurveyRow::new(0.0, 0.0, 0.0),
        SurveyRow::new(1000.0, 12.0, 30.0),
    ])
    .unwrap();

    let uneven = model.build_interpolation_grid(300.0).unwrap();
    assert_eq!(uneven, vec![0.0, 300.0, 600.0, 900.0, 1000.0]);

    let even = model.build_interpolation_grid(250.0).unwrap();
    assert_eq!(even, vec![0.0, 250.0, 500.0, 750.0, 1000.0]);

    assert!(matches!(
        model.build_interpolation_grid(0.0),
        Err(GeometryError::InvalidInterval(_))
    ));
}

#[test]
fn resampling_reproduces_survey_stations() {
    let model = build_and_turn();
    let grid = model.build_interpolation_grid(100.0).unwrap();
    let resampled = model.resample_at_grid(&grid).unwrap();
    assert_eq!(resampled.len(), grid.len());

    for station in model.stations() {
        let hit = resampled
            .iter()
            .find(|s| (s.measured_depth - station.measured_depth).abs() < 1e-9)
            .unwrap();
        assert!((hit.inclination - station.inclination).abs() < 1e-9);
        assert!((hit.azimuth - station.azimuth).abs() < 1e-9);
    }
}

#[test]
fn resampled_path_ends_where_original_ends() {
    let model = build_and_turn();
    let end = |m: &TrajectoryModel| {
        *m.build_cartesian_path(CartesianPoint::default(), true)
            .last()
            .unwrap()
    };
    let original = end(&model);
    let fine = end(&model.resampled(10.0).unwrap());
    assert!((original.north - fine.north).abs() < 1e-6);
    assert!((original.east - fine.east).abs() < 1e-6);
    assert!((original.down_depth - fine.down_depth).abs() < 1e-6);
}

#[test]
fn point_query_clamps_outside_survey() {
    let model = TrajectoryModel::from_rows(&[
        SurveyRow::new(100.0, 5.0, 10.0),
        SurveyRow::new(900.0, 25.0, 40.0),
    ])
    .unwrap();

    let above = model.point_at_depth(-50.0);
    let first = model.stations()[0];
    assert_eq!(above.inclination, first.inclination);
    assert_eq!(above.azimuth, first.azimuth);

    let below = model.point_at_depth(5000.0);
    let last = model.stations()[model.stations().len() - 1];
    assert!((below.inclination - last.inclination).abs() < 1e-12);
    assert!((below.azimuth - last.azimuth).abs() < 1e-12);
}

#[test]
fn point_query_agrees_across_segment_boundary() {
    let model = build_and_turn();
    let station = model.stations()[2];
    let at = model.point_at_depth(station.measured_depth);
    assert!((at.inclination - station.inclination).abs() < 1e-12);
    assert!((at.azimuth - station.azimuth).abs() < 1e-12);
}

// ============================================================================
// Dip Rotation
// ============================================================================

#[test]
fn rotation_inverse_returns_original_dip() {
    let dips = [
        DipVector::new(10.0, 30.0),
        DipVector::new(45.0, 200.0),
        DipVector::new(72.0, 315.0),
    ];
    for dip in dips {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let back = dip.rotate(axis, 25.0).unwrap().rotate(axis, -25.0).unwrap();
            assert!((back.dip - dip.dip).abs() < 1e-6, "{axis:?} {dip}");
            assert!((back.dip_azimuth - dip.dip_azimuth).abs() < 1e-6, "{axis:?} {dip}");
        }
    }
}

#[test]
fn rotated_vector_stays_unit_length() {
    let rotated = DipVector::new(33.0, 121.0)
        .rotate_x(17.0)
        .unwrap()
        .rotate_y(-48.0)
        .unwrap()
        .rotate_z(290.0)
        .unwrap();
    assert!((rotated.vector.length() - 1.0).abs() < 1e-12);
}

#[test]
fn vertical_borehole_leaves_dip_unchanged() {
    let model = TrajectoryModel::from_rows(&[
        SurveyRow::new(0.0, 0.0, 0.0),
        SurveyRow::new(3000.0, 0.0, 0.0),
    ])
    .unwrap();
    let dip = DipVector::new(45.0, 0.0);
    let result = MarkerReorientation::reorient(&model, dip, 1500.0).unwrap();
    assert!((result.reoriented.dip - dip.dip).abs() < 1e-9);
    assert!((result.reoriented.dip_azimuth - dip.dip_azimuth).abs() < 1e-9);
    assert_eq!(result.original, dip);
    assert_eq!(result.borehole_inclination, 0.0);
}

#[test]
fn deviated_borehole_changes_dip() {
    let model = build_and_turn();
    let dip = DipVector::new(20.0, 0.0);
    let result = MarkerReorientation::reorient(&model, dip, 2400.0).unwrap();
    assert!(result.borehole_inclination > 1.0);
    assert!((result.reoriented.dip - dip.dip).abs() > 1e-3);
    assert!((result.reoriented.vector.length() - 1.0).abs() < 1e-12);
}
