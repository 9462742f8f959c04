//! Trip metrics derived from an ordered run of track points.
//!
//! Everything here is total: empty and single-point inputs produce zeros
//! rather than errors.

use std::convert::Infallible;
use std::f64::consts::PI;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::track::TrackPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Average walking speed in m/s assumed by the duration estimate.
pub const WALKING_SPEED_MPS: f64 = 1.4;

/// Aggregate metrics for a track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TrackMetrics {
    #[serde(rename = "distance")]
    pub total_distance_meters: f64,
    /// Whole meters.
    #[serde(rename = "elevationGain")]
    pub elevation_gain_meters: f64,
    /// Whole seconds.
    #[serde(rename = "duration")]
    pub estimated_duration_seconds: f64,
}

impl TrackMetrics {
    pub fn from_points(points: &[TrackPoint]) -> Self {
        Self::with_speed(points, WALKING_SPEED_MPS)
    }

    /// Metrics with the duration estimated at `average_speed_mps`.
    pub fn with_speed(points: &[TrackPoint], average_speed_mps: f64) -> Self {
        let total_distance_meters = total_distance(points);
        let metrics = Self {
            total_distance_meters,
            elevation_gain_meters: elevation_gain(points),
            estimated_duration_seconds: duration_at(total_distance_meters, average_speed_mps),
        };
        debug!(
            points = points.len(),
            distance = metrics.total_distance_meters,
            elevation_gain = metrics.elevation_gain_meters,
            duration = metrics.estimated_duration_seconds,
            "Computed track metrics"
        );
        metrics
    }
}

/// Great-circle distance in meters between two points (Haversine).
pub fn haversine_distance(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    // Kept as `deg * PI / 180` and `s * s`; to_radians()/powi round differently.
    let phi1 = p1.latitude * PI / 180.0;
    let phi2 = p2.latitude * PI / 180.0;
    let d_phi = (p2.latitude - p1.latitude) * PI / 180.0;
    let d_lambda = (p2.longitude - p1.longitude) * PI / 180.0;

    let sin_d_phi = (d_phi / 2.0).sin();
    let sin_d_lambda = (d_lambda / 2.0).sin();
    let a = sin_d_phi * sin_d_phi + phi1.cos() * phi2.cos() * sin_d_lambda * sin_d_lambda;
    // Near-antipodal points can round `a` just past 1.
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Sum of segment distances over consecutive points.
pub fn total_distance(points: &[TrackPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_distance(&pair[0], &pair[1]))
        .fold(0.0, |acc, d| acc + d)
}

/// Sum of positive elevation deltas, rounded to the nearest meter. Descents are ignored.
pub fn elevation_gain(points: &[TrackPoint]) -> f64 {
    let gain = points
        .windows(2)
        .map(|pair| pair[1].elevation - pair[0].elevation)
        .filter(|delta| *delta > 0.0)
        .fold(0.0, |acc, delta| acc + delta);
    gain.round()
}

/// Seconds needed to cover `distance_m` at walking speed.
pub fn estimate_duration(distance_m: f64) -> f64 {
    duration_at(distance_m, WALKING_SPEED_MPS)
}

fn duration_at(distance_m: f64, speed_mps: f64) -> f64 {
    (distance_m / speed_mps).round()
}

/// Geographic center of the points as `(lat, lon)`, rounded to 6 decimals.
///
/// Averages the unit vectors of all points and projects the mean back onto
/// the sphere, so tracks crossing the antimeridian center correctly.
pub fn route_center(points: &[TrackPoint]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }

    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    for p in points {
        let lat = p.latitude.to_radians();
        let lon = p.longitude.to_radians();
        x += lat.cos() * lon.cos();
        y += lat.cos() * lon.sin();
        z += lat.sin();
    }
    let n = points.len() as f64;
    let (x, y, z) = (x / n, y / n, z / n);

    let lon = y.atan2(x);
    let lat = z.atan2((x * x + y * y).sqrt());

    (round_to(lat.to_degrees(), 6), round_to(lon.to_degrees(), 6))
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// How a route is travelled, for coarse time estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walking,
    Hiking,
    Running,
    Cycling,
    Driving,
}

impl TravelMode {
    pub fn speed_kmh(self) -> f64 {
        match self {
            Self::Walking => 5.0,
            Self::Hiking => 4.0,
            Self::Running => 10.0,
            Self::Cycling => 20.0,
            Self::Driving => 60.0,
        }
    }

    /// Whole minutes to cover `distance_m`, never less than one.
    pub fn estimate_minutes(self, distance_m: f64) -> u32 {
        let hours = distance_m / 1000.0 / self.speed_kmh();
        let minutes = (hours * 60.0).round();
        // `as` saturates, so absurd distances clamp to u32::MAX
        (minutes as u32).max(1)
    }
}

impl FromStr for TravelMode {
    type Err = Infallible;

    /// Unrecognised names fall back to walking.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "hiking" => Self::Hiking,
            "running" => Self::Running,
            "cycling" => Self::Cycling,
            "driving" => Self::Driving,
            _ => Self::Walking,
        })
    }
}
