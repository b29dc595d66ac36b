use crate::domain::SimulationResponse;

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub fn simulate_route() -> &'static str {
    "/simulate"
}

pub fn healthz_route() -> &'static str {
    "/healthz"
}

/// Decodes a success body, rejecting anything that does not match the response contract.
pub fn decode_simulation_response(body: &[u8]) -> Result<SimulationResponse, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Pulls `detail` out of an error body; `None` for plain text or any other JSON shape.
pub fn extract_error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("detail")?.as_str().map(str::to_owned)
}
