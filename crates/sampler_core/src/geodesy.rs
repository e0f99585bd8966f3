//! Spherical geodesy: haversine distance and great-circle interpolation.
//!
//! All functions are pure and operate on degrees at the boundary, radians inside.

use crate::geo::GeoPoint;

/// Mean Earth radius used for all distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Below this `sin(angle)` slerp degenerates and linear interpolation is used.
const SLERP_EPSILON: f64 = 1e-6;

/// Haversine term shared by distance and angle.
fn haversine_term(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    // Grouping the cosines keeps the result bit-identical when a and b swap.
    let h = sin_dlat * sin_dlat + sin_dlon * sin_dlon * (lat1.cos() * lat2.cos());
    // Rounding can push h a hair above 1 for antipodal points.
    h.clamp(0.0, 1.0)
}

/// Central angle between two points on the unit sphere, in radians.
pub fn angular_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    2.0 * haversine_term(a, b).sqrt().asin()
}

/// Great-circle distance in kilometres.
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    EARTH_RADIUS_KM * angular_distance(a, b)
}

/// Point `fraction` of the way from `a` to `b` along the great-circle arc.
///
/// Falls back to linear interpolation in lat/lon space when the two points are
/// (nearly) coincident, where the slerp coefficients would divide by ~0.
pub fn spherical_interpolate(a: GeoPoint, b: GeoPoint, fraction: f64) -> GeoPoint {
    let angle = angular_distance(a, b);
    let sin_angle = angle.sin();
    if sin_angle < SLERP_EPSILON {
        return GeoPoint::new(
            a.lat + fraction * (b.lat - a.lat),
            a.lon + fraction * (b.lon - a.lon),
        );
    }

    let wa = ((1.0 - fraction) * angle).sin() / sin_angle;
    let wb = (fraction * angle).sin() / sin_angle;

    let (ax, ay, az) = to_unit_vector(a);
    let (bx, by, bz) = to_unit_vector(b);
    let x = wa * ax + wb * bx;
    let y = wa * ay + wb * by;
    let z = wa * az + wb * bz;

    let lat = z.atan2((x * x + y * y).sqrt());
    let lon = y.atan2(x);
    GeoPoint::new(lat.to_degrees(), lon.to_degrees())
}

fn to_unit_vector(point: GeoPoint) -> (f64, f64, f64) {
    let lat = point.lat.to_radians();
    let lon = point.lon.to_radians();
    let cos_lat = lat.cos();
    (cos_lat * lon.cos(), cos_lat * lon.sin(), lat.sin())
}
