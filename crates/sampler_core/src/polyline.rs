//! Encoded polyline format (precision 5), as returned by Google Directions
//! and OSRM with `geometries=polyline`.
//!
//! Each coordinate is stored as a delta from the previous one, scaled by 1e5,
//! zig-zag encoded and split into 5-bit chunks offset by 63.

use std::fmt;

use crate::geo::GeoPoint;

const PRECISION: f64 = 1e5;
const CHUNK_OFFSET: u8 = 63;
const CONTINUATION: u64 = 0x20;
const CHUNK_MASK: u64 = 0x1f;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Byte outside the `'?'..='~'` alphabet.
    InvalidChar { position: usize },
    /// Input ended in the middle of a coordinate pair.
    Truncated,
    /// A value ran past 64 bits, or the running coordinate overflowed.
    Overflow { position: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidChar { position } => {
                write!(f, "invalid character at byte {position}")
            }
            DecodeError::Truncated => f.write_str("input ends inside a coordinate"),
            DecodeError::Overflow { position } => {
                write!(f, "value starting at byte {position} overflows")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode an encoded polyline into points.
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        lat = accumulate(lat, bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(DecodeError::Truncated);
        }
        lon = accumulate(lon, bytes, &mut index)?;
        points.push(GeoPoint::new(lat as f64 / PRECISION, lon as f64 / PRECISION));
    }

    Ok(points)
}

fn accumulate(total: i64, bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let position = *index;
    total
        .checked_add(next_value(bytes, index)?)
        .ok_or(DecodeError::Overflow { position })
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let start = *index;
    let mut result: u64 = 0;
    let mut shift = 0;

    loop {
        let byte = *bytes.get(*index).ok_or(DecodeError::Truncated)?;
        if !(CHUNK_OFFSET..=b'~').contains(&byte) {
            return Err(DecodeError::InvalidChar { position: *index });
        }
        if shift > 60 {
            return Err(DecodeError::Overflow { position: start });
        }
        let chunk = u64::from(byte - CHUNK_OFFSET);
        *index += 1;

        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;
        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    let value = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !value } else { value })
}

/// Encode points into the polyline format. Coordinates are rounded to 1e-5.
pub fn encode(points: &[GeoPoint]) -> String {
    let mut out = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in points {
        let lat = (point.lat * PRECISION).round() as i64;
        let lon = (point.lon * PRECISION).round() as i64;
        push_value(&mut out, lat - prev_lat);
        push_value(&mut out, lon - prev_lon);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn push_value(out: &mut String, value: i64) {
    let mut rest = if value < 0 {
        !((value as u64) << 1)
    } else {
        (value as u64) << 1
    };

    while rest >= CONTINUATION {
        out.push(char::from((CONTINUATION | (rest & CHUNK_MASK)) as u8 + CHUNK_OFFSET));
        rest >>= 5;
    }
    out.push(char::from(rest as u8 + CHUNK_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ]
    }

    #[test]
    fn decodes_reference_polyline() {
        let points = decode(REFERENCE).expect("valid polyline");
        assert_eq!(points.len(), 3);
        for (actual, expected) in points.iter().zip(reference_points()) {
            assert!((actual.lat - expected.lat).abs() < 1e-9);
            assert!((actual.lon - expected.lon).abs() < 1e-9);
        }
    }

    #[test]
    fn encodes_reference_polyline() {
        assert_eq!(encode(&reference_points()), REFERENCE);
    }

    #[test]
    fn empty_input_decodes_to_nothing() {
        assert_eq!(decode(""), Ok(Vec::new()));
    }

    #[test]
    fn latitude_without_longitude_is_truncated() {
        assert_eq!(decode("_p~iF"), Err(DecodeError::Truncated));
    }

    #[test]
    fn dangling_continuation_is_truncated() {
        assert_eq!(decode("_p~iF~ps|"), Err(DecodeError::Truncated));
    }

    #[test]
    fn rejects_bytes_outside_alphabet() {
        assert_eq!(
            decode("_p~iF ps|U"),
            Err(DecodeError::InvalidChar { position: 5 })
        );
    }

    #[test]
    fn rejects_deltas_that_overflow_the_coordinate() {
        // Each value decodes to i64::MIN; the second latitude delta overflows.
        let value = format!("{}^", "~".repeat(12));
        let encoded = value.repeat(4);
        assert_eq!(decode(&encoded), Err(DecodeError::Overflow { position: 26 }));
    }

    #[test]
    fn rejects_endless_continuation() {
        let encoded = "~".repeat(20);
        assert_eq!(decode(&encoded), Err(DecodeError::Overflow { position: 0 }));
    }
}
