//! Shared fixtures for tests and benchmarks.
//!
//! The endpoints are the Lucknow pair the CLI uses as its documented example;
//! the route is a hand-built road-like polyline between them.

use crate::geo::{GeoPoint, Polyline};
use crate::routing::StaticRouteFetcher;

pub const TEST_ORIGIN: &str = "26.8323,80.9214";
pub const TEST_DESTINATION: &str = "26.8426,80.9228";

pub fn test_origin() -> GeoPoint {
    GeoPoint::new(26.8323, 80.9214)
}

pub fn test_destination() -> GeoPoint {
    GeoPoint::new(26.8426, 80.9228)
}

/// A ~1.3 km route with short and long segments and one repeated step
/// boundary vertex, as a directions provider would return it.
pub fn test_route() -> Polyline {
    Polyline::new(vec![
        test_origin(),
        GeoPoint::new(26.83241, 80.92152),
        GeoPoint::new(26.83318, 80.92171),
        GeoPoint::new(26.83318, 80.92171),
        GeoPoint::new(26.83602, 80.92199),
        GeoPoint::new(26.83611, 80.92203),
        GeoPoint::new(26.83997, 80.92248),
        GeoPoint::new(26.84183, 80.92266),
        test_destination(),
    ])
}

/// A fetcher that knows only [`test_route`].
pub fn test_fetcher() -> StaticRouteFetcher {
    StaticRouteFetcher::new().with_route(test_origin(), test_destination(), test_route())
}

/// `count` vertices due east along the equator, `step_deg` apart.
pub fn equator_line(count: usize, step_deg: f64) -> Vec<GeoPoint> {
    (0..count)
        .map(|i| GeoPoint::new(0.0, i as f64 * step_deg))
        .collect()
}
