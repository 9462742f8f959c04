use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Failure to turn GPX text into a track.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("malformed XML: element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("malformed XML: document has no root element")]
    NoRootElement,

    #[error("malformed XML: content outside the root element")]
    ContentOutsideRoot,

    #[error("malformed XML: undefined entity '&{0};'")]
    UndefinedEntity(String),

    #[error("missing coordinate: track point {} has no '{attribute}' attribute", .index + 1)]
    MissingCoordinate {
        index: usize,
        attribute: &'static str,
    },

    #[error("missing coordinate: invalid value '{value}' for '{attribute}' on track point {}", .index + 1)]
    InvalidCoordinate {
        index: usize,
        attribute: &'static str,
        value: String,
    },

    #[error("coordinate out of range: track point {} at ({lat}, {lon})", .index + 1)]
    CoordinateOutOfRange { index: usize, lat: f64, lon: f64 },

    #[error("no track points")]
    NoTrackPoints,
}

impl ParseError {
    /// True for failures of the XML layer itself, as opposed to GPX content.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::XmlParse(_)
                | Self::UnclosedElement(_)
                | Self::NoRootElement
                | Self::ContentOutsideRoot
                | Self::UndefinedEntity(_)
        )
    }
}

/// A parsed track that cannot be stored as a route.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("route must have at least 2 waypoints, found {found}")]
    TooFewPoints { found: usize },

    #[error("invalid coordinates at waypoint {}: {lat}, {lon}", .index + 1)]
    InvalidCoordinates { index: usize, lat: f64, lon: f64 },
}

impl From<ParseError> for JsValue {
    fn from(e: ParseError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

impl From<ValidationError> for JsValue {
    fn from(e: ValidationError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_reason() {
        assert_eq!(ParseError::NoTrackPoints.to_string(), "no track points");
        let missing = ParseError::MissingCoordinate {
            index: 2,
            attribute: "lon",
        };
        assert!(missing.to_string().starts_with("missing coordinate"));
        assert!(missing.to_string().contains("'lon'"));
        assert!(
            ParseError::UnclosedElement("trk".into())
                .to_string()
                .starts_with("malformed XML")
        );
    }

    #[test]
    fn test_malformed_grouping() {
        assert!(ParseError::NoRootElement.is_malformed());
        assert!(ParseError::UnclosedElement("gpx".into()).is_malformed());
        assert!(ParseError::ContentOutsideRoot.is_malformed());
        assert!(ParseError::UndefinedEntity("nbsp".into()).is_malformed());
        assert!(!ParseError::NoTrackPoints.is_malformed());
        assert!(
            !ParseError::CoordinateOutOfRange {
                index: 0,
                lat: 91.0,
                lon: 0.0
            }
            .is_malformed()
        );
    }

    #[test]
    fn test_validation_index_is_one_based_in_message() {
        let e = ValidationError::InvalidCoordinates {
            index: 0,
            lat: 95.0,
            lon: 10.0,
        };
        assert_eq!(e.to_string(), "invalid coordinates at waypoint 1: 95, 10");
    }
}
