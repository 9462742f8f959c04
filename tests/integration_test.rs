use geojson::Value;
use gpx_route_core::converter::{to_feature, to_route_import};
use gpx_route_core::metrics::TrackMetrics;
use gpx_route_core::options::ImportOptions;
use gpx_route_core::parser::{parse_track, parse_track_with};
use gpx_route_core::route::RouteSummary;
use gpx_route_core::{ParseError, TravelMode, ValidationError};

fn load_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{path}")).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---- basic/ ----

#[test]
fn test_01_simple_track() {
    init_tracing();
    let track = parse_track(&load_fixture("basic/01_simple_track.gpx")).unwrap();
    assert_eq!(track.name, "Morning Walk");
    assert_eq!(track.points.len(), 4);

    let lats: Vec<f64> = track.points.iter().map(|p| p.latitude).collect();
    assert_eq!(lats, vec![45.5, 45.501, 45.502, 45.503]);
    assert_eq!(track.points[1].elevation, 104.5);

    let metrics = TrackMetrics::from_points(&track.points);
    // 4.5 + 8.25 up, 2.5 down
    assert_eq!(metrics.elevation_gain_meters, 13.0);
    assert!(metrics.total_distance_meters > 400.0 && metrics.total_distance_meters < 415.0);
}

#[test]
fn test_02_equator_degree() {
    let track = parse_track(&load_fixture("basic/02_equator_degree.gpx")).unwrap();
    let metrics = TrackMetrics::from_points(&track.points);
    assert!((metrics.total_distance_meters - 111_195.0).abs() < 50.0);
    assert_eq!(metrics.elevation_gain_meters, 0.0);
    assert_eq!(
        metrics.estimated_duration_seconds,
        (metrics.total_distance_meters / 1.4).round()
    );
}

// ---- tracks/ ----

#[test]
fn test_03_segments_are_flattened() {
    let track = parse_track(&load_fixture("tracks/03_multi_segment.gpx")).unwrap();
    assert_eq!(track.name, "Split Hike");
    assert_eq!(track.points.len(), 4);

    // The gap between segments still counts as a segment of the path
    let metrics = TrackMetrics::from_points(&track.points);
    assert_eq!(metrics.elevation_gain_meters, 120.0);
}

#[test]
fn test_04_namespaced_ignores_other_names_and_points() {
    let track = parse_track(&load_fixture("tracks/04_namespaced.gpx")).unwrap();
    assert_eq!(track.name, "Café & Back");
    assert_eq!(track.points.len(), 2);
    assert_eq!(track.points[0].elevation, 40.0);
}

// ---- edge_cases/ ----

#[test]
fn test_05_empty_track() {
    let err = parse_track(&load_fixture("edge_cases/05_empty_track.gpx")).unwrap_err();
    assert!(matches!(err, ParseError::NoTrackPoints));
}

#[test]
fn test_05_bare_trk() {
    let err = parse_track("<gpx><trk></trk></gpx>").unwrap_err();
    assert!(matches!(err, ParseError::NoTrackPoints));
    assert!(err.to_string().contains("no track points"));
}

#[test]
fn test_06_missing_lon() {
    let err = parse_track(&load_fixture("edge_cases/06_missing_lon.gpx")).unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingCoordinate {
            index: 1,
            attribute: "lon"
        }
    ));
    assert!(err.to_string().starts_with("missing coordinate"));
}

#[test]
fn test_07_duplicate_points_retained() {
    let track = parse_track(&load_fixture("edge_cases/07_duplicate_points.gpx")).unwrap();
    assert_eq!(track.points.len(), 4);
    assert_eq!(track.points[0], track.points[1]);

    let metrics = TrackMetrics::from_points(&track.points);
    let moved = TrackMetrics::from_points(&[track.points[2], track.points[3]]);
    assert_eq!(metrics.total_distance_meters, moved.total_distance_meters);
}

#[test]
fn test_08_descent_has_no_gain() {
    let track = parse_track(&load_fixture("edge_cases/08_descent.gpx")).unwrap();
    let metrics = TrackMetrics::from_points(&track.points);
    assert_eq!(metrics.elevation_gain_meters, 0.0);
    assert!(metrics.total_distance_meters > 3000.0);
}

#[test]
fn test_09_malformed() {
    let err = parse_track(&load_fixture("edge_cases/09_malformed.gpx")).unwrap_err();
    assert!(err.is_malformed(), "{err:?}");
    assert!(err.to_string().starts_with("malformed XML"));
}

#[test]
fn test_10_single_point() {
    let track = parse_track(&load_fixture("edge_cases/10_single_point.gpx")).unwrap();
    assert_eq!(track.points.len(), 1);
    assert_eq!(
        TrackMetrics::from_points(&track.points),
        TrackMetrics::default()
    );

    // Parses fine, but cannot be stored as a route
    let err = RouteSummary::from_track(&track, TravelMode::Hiking).unwrap_err();
    assert_eq!(err, ValidationError::TooFewPoints { found: 1 });
}

// ---- vendor/ ----

#[test]
fn test_11_garmin_extensions() {
    let track = parse_track(&load_fixture("vendor/11_garmin_extensions.gpx")).unwrap();
    assert_eq!(track.name, "Garmin Activity");
    assert_eq!(track.points.len(), 3);
    assert_eq!(track.points[2].elevation, 11.4);

    let feature = to_feature(&track, &TrackMetrics::from_points(&track.points));
    let geom = feature.geometry.as_ref().unwrap();
    if let Value::LineString(coords) = &geom.value {
        assert_eq!(coords.len(), 3);
        assert!((coords[0][0] - 139.6503).abs() < 1e-10); // lon
        assert!((coords[0][1] - 35.6762).abs() < 1e-10); // lat
    } else {
        panic!("Expected LineString");
    }
}

// ---- pipeline ----

#[test]
fn test_reparse_is_identical() {
    let gpx = load_fixture("basic/01_simple_track.gpx");
    let a = parse_track(&gpx).unwrap();
    let b = parse_track(&gpx).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        TrackMetrics::from_points(&a.points),
        TrackMetrics::from_points(&b.points)
    );
}

#[test]
fn test_import_matches_manual_pipeline() {
    let gpx = load_fixture("vendor/11_garmin_extensions.gpx");
    let opts = ImportOptions::default();
    let track = parse_track_with(&gpx, &opts).unwrap();
    let import = gpx_route_core::import(&gpx, &opts).unwrap();
    assert_eq!(import, to_route_import(&track, &opts));
    assert_eq!(import.metrics, TrackMetrics::from_points(&track.points));
}

#[test]
fn test_gpx_route_summary_for_hiking() {
    let track = parse_track(&load_fixture("tracks/03_multi_segment.gpx")).unwrap();
    let summary = RouteSummary::from_track(&track, TravelMode::Hiking).unwrap();
    assert_eq!(summary.start_point, "46,7");
    assert_eq!(summary.end_point, "46.006,7.003");
    assert_eq!(summary.distance_km, 0.71);
    // 0.706 km at 4 km/h
    assert_eq!(summary.estimated_minutes, 11);
    assert_eq!(summary.waypoint_count, 4);
}

#[test]
fn test_strict_mode_rejects_out_of_range() {
    let gpx = r#"<gpx><trk><trkseg>
  <trkpt lat="10" lon="10"/>
  <trkpt lat="10" lon="190"/>
</trkseg></trk></gpx>"#;
    init_tracing();
    assert!(parse_track(gpx).is_ok());

    let strict = ImportOptions {
        strict_coordinates: true,
        ..Default::default()
    };
    let err = parse_track_with(gpx, &strict).unwrap_err();
    assert!(matches!(err, ParseError::CoordinateOutOfRange { index: 1, .. }));
}
