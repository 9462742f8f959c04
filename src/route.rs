//! Storable route summaries.
//!
//! A [`RouteSummary`] is what gets saved for an imported track: endpoints,
//! rounded distance, a travel-time estimate and the geographic center. Unlike
//! parsing, building one enforces route-level rules (at least two points, all
//! coordinates in range).

use serde::Serialize;
use tracing::info;

use crate::error::ValidationError;
use crate::metrics::{TravelMode, round_to, route_center, total_distance};
use crate::track::{ParsedTrack, TrackPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub name: String,
    /// `"lat,lon"` of the first point.
    pub start_point: String,
    /// `"lat,lon"` of the last point.
    pub end_point: String,
    /// Kilometers, two decimals.
    pub distance_km: f64,
    pub estimated_minutes: u32,
    pub travel_mode: TravelMode,
    /// `(lat, lon)`, six decimals.
    pub center: (f64, f64),
    pub waypoint_count: usize,
}

impl RouteSummary {
    pub fn from_track(track: &ParsedTrack, mode: TravelMode) -> Result<Self, ValidationError> {
        validate_points(&track.points)?;

        let (first, last) = match (track.first(), track.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ValidationError::TooFewPoints { found: 0 }),
        };

        let distance_m = total_distance(&track.points);
        let summary = Self {
            name: track.name.clone(),
            start_point: endpoint(first),
            end_point: endpoint(last),
            distance_km: round_to(distance_m / 1000.0, 2),
            estimated_minutes: mode.estimate_minutes(distance_m),
            travel_mode: mode,
            center: route_center(&track.points),
            waypoint_count: track.points.len(),
        };

        info!(
            name = %summary.name,
            waypoints = summary.waypoint_count,
            distance_km = summary.distance_km,
            "Built route summary"
        );
        Ok(summary)
    }
}

/// Check that `points` can form a route.
pub fn validate_points(points: &[TrackPoint]) -> Result<(), ValidationError> {
    if points.len() < 2 {
        return Err(ValidationError::TooFewPoints {
            found: points.len(),
        });
    }
    if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.in_range()) {
        return Err(ValidationError::InvalidCoordinates {
            index,
            lat: p.latitude,
            lon: p.longitude,
        });
    }
    Ok(())
}

fn endpoint(p: &TrackPoint) -> String {
    format!("{},{}", p.latitude, p.longitude)
}
