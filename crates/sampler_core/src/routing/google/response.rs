#[derive(serde::Deserialize)]
pub(super) struct DirectionsResponse {
    pub(super) status: String,
    pub(super) error_message: Option<String>,
    #[serde(default)]
    pub(super) routes: Vec<DirectionsRoute>,
}

#[derive(serde::Deserialize)]
pub(super) struct DirectionsRoute {
    #[serde(default)]
    pub(super) legs: Vec<DirectionsLeg>,
}

#[derive(serde::Deserialize)]
pub(super) struct DirectionsLeg {
    #[serde(default)]
    pub(super) steps: Vec<DirectionsStep>,
}

#[derive(serde::Deserialize)]
pub(super) struct DirectionsStep {
    pub(super) polyline: EncodedPolyline,
}

#[derive(serde::Deserialize)]
pub(super) struct EncodedPolyline {
    pub(super) points: String,
}
