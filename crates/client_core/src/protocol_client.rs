use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{SimulationRequest, SimulationResponse},
    protocol::{decode_simulation_response, extract_error_detail, simulate_route},
};
use tracing::{debug, warn};
use url::Url;

use crate::error::SubmitError;

/// Anything that can answer a simulation request.
#[async_trait]
pub trait SimulationBackend: Send + Sync {
    async fn simulate(&self, request: &SimulationRequest)
        -> Result<SimulationResponse, SubmitError>;
}

/// HTTP client for `POST {endpoint}/simulate`.
///
/// No retries and no timeout beyond what the transport imposes.
#[derive(Clone)]
pub struct SimulationClient {
    http: Client,
    simulate_url: Url,
}

impl SimulationClient {
    pub fn new(endpoint: &str) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: &str) -> Result<Self, url::ParseError> {
        let mut base = Url::parse(endpoint.trim())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let simulate_url = base.join(simulate_route().trim_start_matches('/'))?;
        Ok(Self { http, simulate_url })
    }

    pub fn simulate_url(&self) -> &Url {
        &self.simulate_url
    }
}

#[async_trait]
impl SimulationBackend for SimulationClient {
    async fn simulate(
        &self,
        request: &SimulationRequest,
    ) -> Result<SimulationResponse, SubmitError> {
        debug!(url = %self.simulate_url, location = %request.location, "simulate: sending request");
        let response = self
            .http
            .post(self.simulate_url.clone())
            .json(request)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(SubmitError::Transport)?;

        if !status.is_success() {
            let detail = extract_error_detail(&body);
            warn!(
                status = status.as_u16(),
                has_detail = detail.is_some(),
                "simulate: server rejected request"
            );
            return Err(SubmitError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        decode_simulation_response(&body).map_err(|err| {
            warn!(error = %err, "simulate: response did not match contract");
            SubmitError::MalformedResponse(err.to_string())
        })
    }
}

#[cfg(test)]
#[path = "tests/protocol_client_tests.rs"]
mod tests;
