use super::response::DirectionsResponse;
use crate::error::FetchError;
use crate::geo::Polyline;
use crate::routing::decode_steps;

pub(super) fn parse_directions_response(resp: DirectionsResponse) -> Result<Polyline, FetchError> {
    match resp.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Ok(Polyline::default()),
        _ => {
            return Err(FetchError::Api(match resp.error_message {
                Some(message) => format!("{}: {}", resp.status, message),
                None => resp.status,
            }))
        }
    }

    let Some(leg) = resp.routes.first().and_then(|route| route.legs.first()) else {
        return Ok(Polyline::default());
    };
    decode_steps(leg.steps.iter().map(|step| step.polyline.points.as_str()))
}
