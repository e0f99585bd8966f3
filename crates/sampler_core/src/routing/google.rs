//! Google Directions API client.
//!
//! Requests a driving route departing now and flattens the step polylines of
//! the first route's first leg into raw vertices. The API key is injected by
//! the caller; nothing here reads the environment.

mod client;
mod parser;
mod response;


pub use client::GoogleDirectionsClient;

/// Production Directions API host.
pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com";

pub(crate) fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
