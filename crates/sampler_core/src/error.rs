use std::fmt;

use crate::polyline::DecodeError;

/// Errors surfaced by [`crate::service::PathService`] and the resampler.
#[derive(Debug)]
pub enum PathError {
    /// Malformed caller input: coordinate strings, empty vertex sequences,
    /// non-positive spacing or negative tolerance.
    InvalidInput(String),
    /// The route fetcher failed; the request is not retried.
    Upstream(FetchError),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidInput(message) => write!(f, "invalid input: {message}"),
            PathError::Upstream(err) => write!(f, "route fetch failed: {err}"),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PathError::InvalidInput(_) => None,
            PathError::Upstream(err) => Some(err),
        }
    }
}

impl From<FetchError> for PathError {
    fn from(err: FetchError) -> Self {
        PathError::Upstream(err)
    }
}

/// Errors encountered while fetching a route from a directions provider.
#[derive(Debug)]
pub enum FetchError {
    #[cfg(any(feature = "osrm", feature = "google"))]
    Http(reqwest::Error),
    #[cfg(any(feature = "osrm", feature = "google"))]
    Json(reqwest::Error),
    /// The provider answered with a non-success status.
    Api(String),
    Decode(DecodeError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(any(feature = "osrm", feature = "google"))]
            FetchError::Http(err) => write!(f, "http: {err}"),
            #[cfg(any(feature = "osrm", feature = "google"))]
            FetchError::Json(err) => write!(f, "response body: {err}"),
            FetchError::Api(message) => write!(f, "provider: {message}"),
            FetchError::Decode(err) => write!(f, "polyline: {err}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(any(feature = "osrm", feature = "google"))]
            FetchError::Http(err) | FetchError::Json(err) => Some(err),
            FetchError::Api(_) => None,
            FetchError::Decode(err) => Some(err),
        }
    }
}

#[cfg(any(feature = "osrm", feature = "google"))]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

impl From<DecodeError> for FetchError {
    fn from(err: DecodeError) -> Self {
        FetchError::Decode(err)
    }
}
