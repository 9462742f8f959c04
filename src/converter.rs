use geojson::{Feature, Geometry, Value};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::metrics::TrackMetrics;
use crate::options::ImportOptions;
use crate::track::{ParsedTrack, TrackPoint};

/// An imported track in the shape the route screens consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteImport {
    pub name: String,
    /// `[lat, lon]` pairs for map display.
    pub points: Vec<[f64; 2]>,
    pub full_points: Vec<TrackPoint>,
    pub metrics: TrackMetrics,
}

/// Build the import result for a parsed track.
pub fn to_route_import(track: &ParsedTrack, opts: &ImportOptions) -> RouteImport {
    RouteImport {
        name: track.name.clone(),
        points: track.coordinates(),
        full_points: track.points.clone(),
        metrics: TrackMetrics::with_speed(&track.points, opts.effective_speed()),
    }
}

/// Convert a track and its metrics to a GeoJSON Feature.
///
/// Two or more points give a LineString, a lone point gives a Point.
/// Coordinates are `[lon, lat, ele]`.
pub fn to_feature(track: &ParsedTrack, metrics: &TrackMetrics) -> Feature {
    let value = match track.points.as_slice() {
        [only] => Value::Point(point_coords(only)),
        points => Value::LineString(points.iter().map(point_coords).collect()),
    };

    let mut props = Map::new();
    props.insert(
        "gpxType".to_string(),
        JsonValue::String("track".to_string()),
    );
    if !track.name.is_empty() {
        props.insert("name".to_string(), JsonValue::String(track.name.clone()));
    }
    insert_number(&mut props, "distance", metrics.total_distance_meters);
    insert_number(&mut props, "elevationGain", metrics.elevation_gain_meters);
    insert_number(&mut props, "duration", metrics.estimated_duration_seconds);

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn point_coords(pt: &TrackPoint) -> Vec<f64> {
    vec![pt.longitude, pt.latitude, pt.elevation]
}

fn insert_number(props: &mut Map<String, JsonValue>, key: &str, value: f64) {
    props.insert(
        key.to_string(),
        JsonValue::Number(serde_json::Number::from_f64(value).unwrap_or(0.into())),
    );
}
