use std::fmt;
use std::time::Duration;

use log::debug;
use reqwest::{blocking::Client, Url};

use super::parser::parse_directions_response;
use super::response::DirectionsResponse;
use crate::error::FetchError;
use crate::geo::{GeoPoint, Polyline};
use crate::routing::RouteFetcher;

const DIRECTIONS_PATH: &str = "/maps/api/directions/json";

/// Thin blocking client for the Directions API.
#[derive(Clone)]
pub struct GoogleDirectionsClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for GoogleDirectionsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleDirectionsClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl GoogleDirectionsClient {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self, FetchError> {
        if api_key.trim().is_empty() {
            return Err(FetchError::Api("Google Directions API key is empty".to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    pub(super) fn directions_url(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!("{}{}", self.endpoint, DIRECTIONS_PATH))
            .map_err(|err| FetchError::Api(format!("failed to build Directions URL: {err}")))?;
        url.query_pairs_mut()
            .append_pair("origin", &origin.to_string())
            .append_pair("destination", &destination.to_string())
            .append_pair("mode", "driving")
            .append_pair("departure_time", "now")
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

impl RouteFetcher for GoogleDirectionsClient {
    fn fetch_route_vertices(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Polyline, FetchError> {
        let url = self.directions_url(origin, destination)?;
        debug!("requesting Google directions {origin} -> {destination}");

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(FetchError::Http)?;
        let parsed: DirectionsResponse = response.json().map_err(FetchError::Json)?;
        let vertices = parse_directions_response(parsed)?;

        debug!("Google directions returned {} vertices", vertices.len());
        Ok(vertices)
    }
}
