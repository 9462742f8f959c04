use serde::Serialize;

/// A single parsed `<trkpt>`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
    /// Meters. Zero when the source point carries no usable `<ele>`.
    pub elevation: f64,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: 0.0,
        }
    }

    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    /// Whether latitude is within [-90, 90] and longitude within [-180, 180].
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// `[lat, lon]` pair as consumed by map widgets.
    pub fn lat_lon(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// An imported track: optional name plus every track point in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTrack {
    /// Empty when the document has no `<trk><name>`.
    pub name: String,
    pub points: Vec<TrackPoint>,
}

impl ParsedTrack {
    pub fn coordinates(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(TrackPoint::lat_lon).collect()
    }

    pub fn first(&self) -> Option<&TrackPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrackPoint> {
        self.points.last()
    }
}
