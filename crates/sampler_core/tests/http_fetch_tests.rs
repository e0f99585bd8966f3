#![cfg(any(feature = "osrm", feature = "google"))]

use std::time::Duration;

use sampler_core::test_helpers::{TEST_DESTINATION, TEST_ORIGIN};
use sampler_core::{FetchError, PathError, PathService, SamplingOptions};

// Port 9 (discard) is closed on test machines, so requests fail immediately.
const UNREACHABLE: &str = "http://127.0.0.1:9";

#[cfg(feature = "osrm")]
#[test]
fn osrm_unreachable_endpoint_is_upstream_http_error() {
    let client = sampler_core::routing::OsrmRouteClient::new(UNREACHABLE, Duration::from_secs(2))
        .expect("client");
    let service = PathService::new(Box::new(client), SamplingOptions::default());
    let err = service
        .form_path(TEST_ORIGIN, TEST_DESTINATION)
        .expect_err("no server");
    assert!(matches!(err, PathError::Upstream(FetchError::Http(_))));
}

#[cfg(feature = "google")]
#[test]
fn google_unreachable_endpoint_is_upstream_http_error() {
    let client = sampler_core::routing::GoogleDirectionsClient::new(
        UNREACHABLE,
        "test-key",
        Duration::from_secs(2),
    )
    .expect("client");
    let service = PathService::new(Box::new(client), SamplingOptions::default());
    let err = service
        .form_path(TEST_ORIGIN, TEST_DESTINATION)
        .expect_err("no server");
    assert!(matches!(err, PathError::Upstream(FetchError::Http(_))));
}

#[cfg(feature = "osrm")]
#[test]
fn invalid_input_never_reaches_the_network() {
    let client = sampler_core::routing::OsrmRouteClient::new(UNREACHABLE, Duration::from_secs(2))
        .expect("client");
    let service = PathService::new(Box::new(client), SamplingOptions::default());
    assert!(matches!(
        service.form_path("", TEST_DESTINATION),
        Err(PathError::InvalidInput(_))
    ));
}
