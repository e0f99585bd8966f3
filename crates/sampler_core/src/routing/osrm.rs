//! OSRM `/route` client returning the first leg's step geometry.

use std::time::Duration;

use log::debug;
use reqwest::{blocking::Client, Url};
use serde::Deserialize;

use super::{decode_steps, RouteFetcher};
use crate::error::FetchError;
use crate::geo::{GeoPoint, Polyline};

/// Public OSRM demo server.
pub const DEFAULT_ENDPOINT: &str = "http://router.project-osrm.org";

/// Routes via an OSRM HTTP endpoint.
#[derive(Debug, Clone)]
pub struct OsrmRouteClient {
    client: Client,
    endpoint: String,
}

impl OsrmRouteClient {
    /// Create a client for the given OSRM endpoint (e.g. `http://localhost:5000`).
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn route_url(&self, origin: GeoPoint, destination: GeoPoint) -> Result<Url, FetchError> {
        // OSRM takes lon,lat.
        let base = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.endpoint, origin.lon, origin.lat, destination.lon, destination.lat,
        );
        let mut url = Url::parse(&base)
            .map_err(|err| FetchError::Api(format!("failed to build OSRM URL: {err}")))?;
        url.query_pairs_mut()
            .append_pair("steps", "true")
            .append_pair("overview", "false")
            .append_pair("geometries", "polyline");
        Ok(url)
    }
}

impl RouteFetcher for OsrmRouteClient {
    fn fetch_route_vertices(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
    ) -> Result<Polyline, FetchError> {
        let url = self.route_url(origin, destination)?;
        debug!("requesting OSRM route {origin} -> {destination}");

        // OSRM reports failures in the JSON body, so the HTTP status is not checked.
        let response = self.client.get(url).send().map_err(FetchError::Http)?;
        let parsed: OsrmRouteResponse = response.json().map_err(FetchError::Json)?;
        let vertices = parse_route_response(parsed)?;

        debug!("OSRM returned {} vertices", vertices.len());
        Ok(vertices)
    }
}

#[derive(Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Deserialize)]
struct OsrmStep {
    geometry: String,
}

fn parse_route_response(resp: OsrmRouteResponse) -> Result<Polyline, FetchError> {
    match resp.code.as_str() {
        "Ok" => {}
        "NoRoute" => return Ok(Polyline::default()),
        _ => {
            return Err(FetchError::Api(match resp.message {
                Some(message) => format!("{}: {}", resp.code, message),
                None => resp.code,
            }))
        }
    }

    let Some(leg) = resp.routes.first().and_then(|route| route.legs.first()) else {
        return Ok(Polyline::default());
    };
    decode_steps(leg.steps.iter().map(|step| step.geometry.as_str()))
}
