//! Coordinate value types shared by the resampler and the route clients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a point, rejecting non-finite or out-of-range coordinates.
    pub fn checked(lat: f64, lon: f64) -> Result<Self, PathError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(PathError::InvalidInput(format!(
                "coordinates must be finite, got {lat},{lon}"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PathError::InvalidInput(format!(
                "latitude {lat} outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(PathError::InvalidInput(format!(
                "longitude {lon} outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Bit-exact key, used where points index a map.
    pub(crate) fn key(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lon.to_bits())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl FromStr for GeoPoint {
    type Err = PathError;

    /// Parse a `"lat,lon"` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PathError::InvalidInput(
                "coordinate string cannot be empty".to_string(),
            ));
        }

        let (lat, lon) = trimmed.split_once(',').ok_or_else(|| {
            PathError::InvalidInput(format!("expected \"lat,lon\", got '{trimmed}'"))
        })?;

        let parse = |part: &str, name: &str| {
            part.trim().parse::<f64>().map_err(|_| {
                PathError::InvalidInput(format!("invalid {name} '{}' in '{trimmed}'", part.trim()))
            })
        };

        GeoPoint::checked(parse(lat, "latitude")?, parse(lon, "longitude")?)
    }
}

/// Raw route shape as decoded from a directions provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append another polyline verbatim (shared endpoints are not merged).
    pub fn extend(&mut self, other: Polyline) {
        self.points.extend(other.points);
    }
}

impl From<Vec<GeoPoint>> for Polyline {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<GeoPoint> for Polyline {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lon_with_whitespace() {
        let point: GeoPoint = " 26.8323 , 80.9214 ".parse().expect("valid point");
        assert_eq!(point, GeoPoint::new(26.8323, 80.9214));
    }

    #[test]
    fn rejects_empty_and_malformed_strings() {
        for input in ["", "   ", "26.8", "a,b", "1,", ",2", "NaN,1", "1,inf"] {
            let result = input.parse::<GeoPoint>();
            assert!(
                matches!(result, Err(PathError::InvalidInput(_))),
                "expected InvalidInput for {input:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!("91,0".parse::<GeoPoint>().is_err());
        assert!("0,-180.5".parse::<GeoPoint>().is_err());
        assert!("-90,180".parse::<GeoPoint>().is_ok());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let point = GeoPoint::new(26.8426, 80.9228);
        assert_eq!(point.to_string(), "26.8426,80.9228");
        assert_eq!(point.to_string().parse::<GeoPoint>().unwrap(), point);
    }

    #[test]
    fn extend_keeps_duplicate_endpoints() {
        let mut line = Polyline::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]);
        line.extend(Polyline::new(vec![GeoPoint::new(0.0, 1.0), GeoPoint::new(0.0, 2.0)]));
        assert_eq!(line.len(), 4);
        assert_eq!(line.points()[1], line.points()[2]);
    }
}
