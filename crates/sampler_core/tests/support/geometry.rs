use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sampler_core::GeoPoint;

/// Seeded random walk of `count` vertices, each step at most `max_step_deg`
/// in latitude and longitude. Includes occasional zero-length steps.
pub fn random_walk(seed: u64, count: usize, max_step_deg: f64) -> Vec<GeoPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut lat = rng.gen_range(-60.0..60.0);
    let mut lon = rng.gen_range(-170.0..170.0);
    let mut points = Vec::with_capacity(count);
    points.push(GeoPoint::new(lat, lon));

    while points.len() < count {
        if rng.gen_bool(0.1) {
            points.push(GeoPoint::new(lat, lon));
            continue;
        }
        lat += rng.gen_range(-max_step_deg..max_step_deg);
        lon += rng.gen_range(-max_step_deg..max_step_deg);
        points.push(GeoPoint::new(lat, lon));
    }
    points
}

pub fn assert_close(actual: f64, expected: f64, eps: f64) {
    assert!(
        (actual - expected).abs() <= eps,
        "expected {expected} ± {eps}, got {actual}"
    );
}
