//! Fixed-spacing path resampler.
//!
//! Walks the vertices of a polyline while keeping an *anchor*: the last point
//! that defines the spacing baseline. For each vertex the distance `d` from
//! the anchor decides what happens:
//!
//! - `d` inside `[spacing - tolerance, spacing + tolerance]`: the vertex is
//!   kept and becomes the anchor.
//! - `d` above the window: a point is inserted exactly `spacing` along the arc
//!   towards the vertex, becomes the anchor, and the same vertex is examined
//!   again.
//! - `d` below the window: the vertex is kept verbatim but the anchor stays.
//!
//! A vertex that triggers insertions is emitted once, when it is finally
//! consumed. The last vertex is never snapped onto the spacing grid. When the
//! spacing is too small for an insertion to move the anchor, the vertex is kept
//! as a passthrough instead.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::geo::GeoPoint;
use crate::geodesy::{great_circle_distance, spherical_interpolate};

/// How a resampled point was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleKind {
    /// First vertex of the input.
    Start,
    /// Original vertex inside the tolerance window; became the anchor.
    Accepted,
    /// Interpolated point `spacing` away from the previous anchor.
    Inserted,
    /// Original vertex closer than the window; anchor unchanged.
    Passthrough,
}

impl SampleKind {
    /// Whether points of this kind reset the spacing baseline.
    pub fn is_anchor(self) -> bool {
        !matches!(self, SampleKind::Passthrough)
    }
}

/// An output point together with how it was produced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampledPoint {
    pub point: GeoPoint,
    pub kind: SampleKind,
}

/// Resample `vertices` so consecutive anchors are `spacing_km` apart.
///
/// Fails with [`PathError::InvalidInput`] on an empty vertex slice, a
/// non-positive or non-finite spacing, or a negative tolerance.
pub fn resample(
    vertices: &[GeoPoint],
    spacing_km: f64,
    tolerance_km: f64,
) -> Result<Vec<GeoPoint>, PathError> {
    Ok(resample_annotated(vertices, spacing_km, tolerance_km)?
        .into_iter()
        .map(|sample| sample.point)
        .collect())
}

/// Same as [`resample`], tagging every output point with its [`SampleKind`].
pub fn resample_annotated(
    vertices: &[GeoPoint],
    spacing_km: f64,
    tolerance_km: f64,
) -> Result<Vec<SampledPoint>, PathError> {
    validate(vertices, spacing_km, tolerance_km)?;

    let lower = spacing_km - tolerance_km;
    let upper = spacing_km + tolerance_km;

    let mut anchor = vertices[0];
    let mut out = Vec::with_capacity(vertices.len());
    out.push(SampledPoint {
        point: anchor,
        kind: SampleKind::Start,
    });

    let mut i = 1;
    while i < vertices.len() {
        let current = vertices[i];
        let d = great_circle_distance(anchor, current);

        if d > upper {
            let inserted = spherical_interpolate(anchor, current, spacing_km / d);
            // Spacing below coordinate resolution cannot move the anchor.
            if inserted != anchor && great_circle_distance(inserted, current) < d {
                anchor = inserted;
                out.push(SampledPoint {
                    point: anchor,
                    kind: SampleKind::Inserted,
                });
                // `i` is held: `current` is measured again from the new anchor.
                continue;
            }
            debug!("spacing {spacing_km} km too small to step towards {current}, keeping vertex");
        }

        let kind = if d >= lower && d <= upper {
            anchor = current;
            SampleKind::Accepted
        } else {
            SampleKind::Passthrough
        };
        out.push(SampledPoint {
            point: current,
            kind,
        });
        i += 1;
    }

    debug!(
        "resampled {} vertices into {} points (spacing {spacing_km} km, tolerance {tolerance_km} km)",
        vertices.len(),
        out.len()
    );
    Ok(out)
}

fn validate(vertices: &[GeoPoint], spacing_km: f64, tolerance_km: f64) -> Result<(), PathError> {
    if vertices.is_empty() {
        return Err(PathError::InvalidInput(
            "cannot resample an empty vertex sequence".to_string(),
        ));
    }
    if !spacing_km.is_finite() || spacing_km <= 0.0 {
        return Err(PathError::InvalidInput(format!(
            "spacing must be a positive number of kilometres, got {spacing_km}"
        )));
    }
    if !tolerance_km.is_finite() || tolerance_km < 0.0 {
        return Err(PathError::InvalidInput(format!(
            "tolerance must be a non-negative number of kilometres, got {tolerance_km}"
        )));
    }
    Ok(())
}
