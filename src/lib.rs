//! GPX track import and route metrics.
//!
//! Parses the track points of a GPX document and derives distance
//! (Haversine), elevation gain and a walking-time estimate. Usable as a
//! plain Rust library or, through the `wasm-bindgen` exports below, from
//! JavaScript.
//!
//! ```
//! use gpx_route_core::{TrackMetrics, parse_track};
//!
//! let gpx = r#"<gpx><trk><name>Walk</name><trkseg>
//!   <trkpt lat="0" lon="0"><ele>10</ele></trkpt>
//!   <trkpt lat="0" lon="1"><ele>30</ele></trkpt>
//! </trkseg></trk></gpx>"#;
//!
//! let track = parse_track(gpx)?;
//! let metrics = TrackMetrics::from_points(&track.points);
//! assert_eq!(track.name, "Walk");
//! assert_eq!(metrics.elevation_gain_meters, 20.0);
//! # Ok::<(), gpx_route_core::ParseError>(())
//! ```

pub mod converter;
pub mod error;
pub mod format;
pub mod metrics;
pub mod options;
pub mod parser;
pub mod route;
pub mod track;

use wasm_bindgen::prelude::*;

pub use converter::{RouteImport, to_feature, to_route_import};
pub use error::{ParseError, ValidationError};
pub use metrics::{TrackMetrics, TravelMode};
pub use options::ImportOptions;
pub use parser::{parse_track, parse_track_with};
pub use route::RouteSummary;
pub use track::{ParsedTrack, TrackPoint};

/// Parse a GPX string and return `{name, points, fullPoints, metrics}` as a JS object.
#[wasm_bindgen(js_name = importGpx)]
pub fn import_gpx(gpx_string: &str, options: JsValue) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let imported = import(gpx_string, &opts)?;
    serde_wasm_bindgen::to_value(&imported).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a GPX string and return `{name, points, fullPoints, metrics}` as a JSON string.
#[wasm_bindgen(js_name = importGpxString)]
pub fn import_gpx_string(gpx_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let imported = import(gpx_string, &opts)?;
    serde_json::to_string(&imported).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a GPX string and return the track as a GeoJSON Feature string.
#[wasm_bindgen(js_name = importGpxGeoJson)]
pub fn import_gpx_geojson(gpx_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let track = parse_track_with(gpx_string, &opts)?;
    let metrics = TrackMetrics::with_speed(&track.points, opts.effective_speed());
    serde_json::to_string(&to_feature(&track, &metrics))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Parse a GPX string and summarise it as a storable route for the given travel mode.
#[wasm_bindgen(js_name = summarizeGpx)]
pub fn summarize_gpx(gpx_string: &str, travel_mode: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let track = parse_track(gpx_string)?;
    let mode = travel_mode.parse::<TravelMode>().unwrap_or_default();
    let summary = RouteSummary::from_track(&track, mode)?;
    serde_wasm_bindgen::to_value(&summary).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `HH:MM:SS` for a duration in seconds.
#[wasm_bindgen(js_name = formatDuration)]
pub fn format_duration(seconds: f64) -> String {
    format::format_duration(seconds)
}

/// Kilometres with two decimals for a distance in meters.
#[wasm_bindgen(js_name = formatDistanceKm)]
pub fn format_distance_km(meters: f64) -> String {
    format::format_distance_km(meters)
}

/// Parse and convert in one step; the native counterpart of `importGpx`.
pub fn import(gpx_string: &str, opts: &ImportOptions) -> error::Result<RouteImport> {
    let track = parse_track_with(gpx_string, opts)?;
    Ok(to_route_import(&track, opts))
}

fn parse_options(options: JsValue) -> Result<ImportOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ImportOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
