use serde::Deserialize;

use crate::metrics::WALKING_SPEED_MPS;

/// Options for GPX import.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Reject points outside [-90, 90] / [-180, 180] instead of accepting them (default: false)
    #[serde(default)]
    pub strict_coordinates: bool,

    /// Average speed in m/s used for the duration estimate (default: 1.4)
    #[serde(default = "default_speed")]
    pub average_speed: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            strict_coordinates: false,
            average_speed: WALKING_SPEED_MPS,
        }
    }
}

impl ImportOptions {
    /// The configured speed, or walking speed when it is not a positive finite number.
    pub fn effective_speed(&self) -> f64 {
        if self.average_speed.is_finite() && self.average_speed > 0.0 {
            self.average_speed
        } else {
            WALKING_SPEED_MPS
        }
    }
}

fn default_speed() -> f64 {
    WALKING_SPEED_MPS
}
