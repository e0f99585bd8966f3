//! Request flow: parse the endpoints, fetch the route, resample it.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::PathError;
use crate::geo::GeoPoint;
use crate::resample::resample;
use crate::routing::RouteFetcher;

/// Target spacing and acceptance window, both in kilometres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    pub frequency_km: f64,
    pub tolerance_km: f64,
}

impl SamplingOptions {
    pub fn new(frequency_km: f64, tolerance_km: f64) -> Self {
        Self {
            frequency_km,
            tolerance_km,
        }
    }

    pub fn validate(&self) -> Result<(), PathError> {
        if !self.frequency_km.is_finite() || self.frequency_km <= 0.0 {
            return Err(PathError::InvalidInput(format!(
                "frequency must be a positive number of kilometres, got {}",
                self.frequency_km
            )));
        }
        if !self.tolerance_km.is_finite() || self.tolerance_km < 0.0 {
            return Err(PathError::InvalidInput(format!(
                "tolerance must be a non-negative number of kilometres, got {}",
                self.tolerance_km
            )));
        }
        Ok(())
    }
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            frequency_km: 0.05,
            tolerance_km: 0.0,
        }
    }
}

/// Turns an origin/destination pair into evenly spaced route points.
pub struct PathService {
    fetcher: Box<dyn RouteFetcher>,
    options: SamplingOptions,
}

impl PathService {
    pub fn new(fetcher: Box<dyn RouteFetcher>, options: SamplingOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn options(&self) -> SamplingOptions {
        self.options
    }

    /// Resample the driving route between two `"lat,lon"` strings.
    ///
    /// A route with no legs or steps yields `Ok(vec![])`. Malformed input fails
    /// before any request is made; fetch failures are returned as
    /// [`PathError::Upstream`] without retrying.
    pub fn form_path(&self, origin: &str, destination: &str) -> Result<Vec<GeoPoint>, PathError> {
        self.options.validate()?;
        let origin: GeoPoint = origin.parse()?;
        let destination: GeoPoint = destination.parse()?;

        let vertices = self.fetcher.fetch_route_vertices(origin, destination)?;
        if vertices.is_empty() {
            info!("no route between {origin} and {destination}");
            return Ok(Vec::new());
        }
        debug!(
            "route {origin} -> {destination} has {} raw vertices",
            vertices.len()
        );

        resample(
            vertices.points(),
            self.options.frequency_km,
            self.options.tolerance_km,
        )
    }

    /// [`Self::form_path`] rendered as `"lat,lon"` lines.
    pub fn form_path_strings(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<String>, PathError> {
        Ok(self
            .form_path(origin, destination)?
            .iter()
            .map(GeoPoint::to_string)
            .collect())
    }
}
