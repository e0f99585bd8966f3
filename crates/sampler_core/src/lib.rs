//! Route path sampling: fetch a driving route between two coordinates and
//! resample its polyline into points spaced at a fixed distance.
//!
//! - [`geodesy`]: haversine distance and great-circle interpolation
//! - [`resample`]: the fixed-spacing resampler
//! - [`routing`]: directions provider clients behind the [`routing::RouteFetcher`] trait
//! - [`service`]: the validate → fetch → resample request flow

pub mod config;
pub mod error;
pub mod geo;
pub mod geodesy;
pub mod polyline;
pub mod resample;
pub mod routing;
pub mod service;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use error::{FetchError, PathError};
pub use geo::{GeoPoint, Polyline};
pub use resample::{resample, resample_annotated, SampleKind, SampledPoint};
pub use service::{PathService, SamplingOptions};
