use quick_xml::Reader;
use quick_xml::events::{BytesRef, BytesStart, Event};
use tracing::{debug, warn};

use crate::error::{ParseError, Result};
use crate::options::ImportOptions;
use crate::track::{ParsedTrack, TrackPoint};

/// Parse a GPX XML string into a ParsedTrack with default options.
pub fn parse_track(xml: &str) -> Result<ParsedTrack> {
    parse_track_with(xml, &ImportOptions::default())
}

/// Parse a GPX XML string into a ParsedTrack.
///
/// Every `<trkpt>` in the document is collected in document order, whatever
/// `<trk>`/`<trkseg>` it sits in. The name comes from the first `<trk><name>`.
pub fn parse_track_with(xml: &str, opts: &ImportOptions) -> Result<ParsedTrack> {
    let mut reader = Reader::from_str(xml);
    let mut track = ParsedTrack::default();
    let mut name: Option<String> = None;

    // Local names of the currently open elements, outermost first.
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut saw_root = false;
    let mut root_closed = false;
    // Index into `track.points` of the <trkpt> being read.
    let mut current: Option<usize> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_) | Event::Empty(_)) if root_closed => {
                return Err(ParseError::ContentOutsideRoot);
            }
            Ok(Event::Start(e)) => {
                saw_root = true;
                let in_trkpt = open.last().is_some_and(|n| n == b"trkpt");
                let in_trk = open.last().is_some_and(|n| n == b"trk");
                match e.local_name().as_ref() {
                    b"trkpt" => {
                        let point = parse_point(&e, track.points.len(), opts)?;
                        current = Some(track.points.len());
                        track.points.push(point);
                        open.push(b"trkpt".to_vec());
                    }
                    b"ele" if in_trkpt => {
                        let text = read_text_owned(&mut reader, &e)?;
                        if let Some(idx) = current {
                            track.points[idx].elevation = parse_elevation(&text, idx);
                        }
                    }
                    b"name" if in_trk && name.is_none() => {
                        name = Some(read_text_owned(&mut reader, &e)?);
                    }
                    local => open.push(local.to_vec()),
                }
            }
            Ok(Event::Empty(e)) => {
                saw_root = true;
                if e.local_name().as_ref() == b"trkpt" {
                    let point = parse_point(&e, track.points.len(), opts)?;
                    track.points.push(point);
                }
                root_closed = open.is_empty();
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"trkpt" {
                    current = None;
                }
                open.pop();
                root_closed = open.is_empty();
            }
            // Only whitespace may surround the root element.
            Ok(Event::Text(e)) if open.is_empty() => {
                if !e.as_ref().iter().all(u8::is_ascii_whitespace) {
                    return Err(ParseError::ContentOutsideRoot);
                }
            }
            Ok(Event::CData(_)) if open.is_empty() => {
                return Err(ParseError::ContentOutsideRoot);
            }
            Ok(Event::GeneralRef(e)) => {
                resolve_entity(&e)?;
                if open.is_empty() {
                    return Err(ParseError::ContentOutsideRoot);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::XmlParse(e)),
            _ => {}
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(ParseError::UnclosedElement(
            String::from_utf8_lossy(&unclosed).into_owned(),
        ));
    }
    if !saw_root {
        return Err(ParseError::NoRootElement);
    }
    if track.points.is_empty() {
        return Err(ParseError::NoTrackPoints);
    }

    track.name = name.unwrap_or_default();
    debug!(
        name = %track.name,
        points = track.points.len(),
        "Parsed GPX track"
    );
    Ok(track)
}

/// Build a point from a `<trkpt>` start tag, enforcing coordinate rules.
fn parse_point(e: &BytesStart<'_>, index: usize, opts: &ImportOptions) -> Result<TrackPoint> {
    let (lat, lon) = parse_lat_lon(e, index)?;
    let point = TrackPoint::new(lat, lon);

    if !point.in_range() {
        if opts.strict_coordinates {
            return Err(ParseError::CoordinateOutOfRange { index, lat, lon });
        }
        warn!(index, lat, lon, "Accepting track point with out-of-range coordinates");
    }

    Ok(point)
}

/// Parse lat/lon attributes from a point element's start tag.
fn parse_lat_lon(e: &BytesStart<'_>, index: usize) -> Result<(f64, f64)> {
    let mut lat: Option<f64> = None;
    let mut lon: Option<f64> = None;

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| ParseError::XmlParse(e.into()))?;
        let key = attr.key.local_name();
        if !matches!(key.as_ref(), b"lat" | b"lon") {
            continue;
        }
        let val = attr
            .unescape_value()
            .map_err(|e| ParseError::XmlParse(e.into()))?;
        match key.as_ref() {
            b"lat" => lat = Some(parse_coordinate(&val, "lat", index)?),
            b"lon" => lon = Some(parse_coordinate(&val, "lon", index)?),
            _ => {}
        }
    }

    let lat = lat.ok_or(ParseError::MissingCoordinate {
        index,
        attribute: "lat",
    })?;
    let lon = lon.ok_or(ParseError::MissingCoordinate {
        index,
        attribute: "lon",
    })?;

    Ok((lat, lon))
}

fn parse_coordinate(val: &str, attribute: &'static str, index: usize) -> Result<f64> {
    val.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidCoordinate {
            index,
            attribute,
            value: val.to_string(),
        })
}

/// Elevation from `<ele>` text; anything unparseable counts as sea level.
fn parse_elevation(text: &str, index: usize) -> f64 {
    match text.trim().parse::<f64>() {
        Ok(ele) if ele.is_finite() => ele,
        _ => {
            warn!(index, text, "Unparseable elevation, using 0");
            0.0
        }
    }
}

/// Read text content of an element as an owned String.
/// Handles regular text, CDATA sections, and entity references (Event::GeneralRef).
fn read_text_owned<'a>(reader: &mut Reader<&'a [u8]>, start: &BytesStart<'_>) -> Result<String> {
    let end_name = start.name().0.to_vec();
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::CData(e)) => {
                text.push_str(std::str::from_utf8(e.as_ref()).unwrap_or_default());
            }
            Ok(Event::GeneralRef(e)) => text.push(resolve_entity(&e)?),
            // Markup inside a text element is skipped wholesale.
            Ok(Event::Start(e)) => {
                reader.read_to_end(e.name())?;
            }
            Ok(Event::End(e)) if e.name().0 == end_name.as_slice() => break,
            Ok(Event::Eof) => {
                return Err(ParseError::UnclosedElement(
                    String::from_utf8_lossy(&end_name).into_owned(),
                ));
            }
            Err(e) => return Err(ParseError::XmlParse(e)),
            _ => {}
        }
    }

    Ok(text)
}

/// Character references and the five predefined XML entities.
fn resolve_entity(e: &BytesRef<'_>) -> Result<char> {
    if let Ok(Some(ch)) = e.resolve_char_ref() {
        return Ok(ch);
    }
    match std::str::from_utf8(e.as_ref()).unwrap_or_default() {
        "amp" => Ok('&'),
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        other => Err(ParseError::UndefinedEntity(other.to_string())),
    }
}
