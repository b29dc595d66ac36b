use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use server_api::{run_simulation, ApiContext, SimulationError};
use shared::{
    domain::{SimulationRequest, SimulationResponse},
    error::ErrorBody,
    protocol::{healthz_route, simulate_route},
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use weather_integration::{OpenWeatherMapProvider, WeatherError};

mod app_state;
mod config;

use app_state::AppState;
use crate::config::load_settings;

const MAX_REQUEST_BYTES: usize = 16 * 1024;

type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let api_key = settings.require_api_key()?;
    let weather = OpenWeatherMapProvider::new(settings.weather_base_url.clone(), api_key);
    let api = ApiContext {
        weather: Arc::new(weather),
        model: settings.model_settings(),
    };

    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, weather_base_url = %settings.weather_base_url, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(healthz_route(), get(healthz))
        .route(simulate_route(), post(simulate))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> ApiResult<Json<SimulationResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "simulate: rejected request body");
        (rejection.status(), Json(ErrorBody::new(rejection.body_text())))
    })?;

    let response = run_simulation(&state.api, &request)
        .await
        .map_err(simulation_error_response)?;
    Ok(Json(response))
}

fn simulation_error_response(err: SimulationError) -> (StatusCode, Json<ErrorBody>) {
    let (status, detail) = match err {
        SimulationError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        SimulationError::Weather(WeatherError::Upstream { status, city }) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            format!("Error fetching weather data for '{city}'."),
        ),
        SimulationError::Weather(WeatherError::Parse(reason)) => {
            warn!(%reason, "simulate: weather payload did not parse");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not parse weather data from API response.".to_string(),
            )
        }
        SimulationError::Weather(WeatherError::Transport(error)) => {
            warn!(%error, "simulate: weather service unreachable");
            (
                StatusCode::BAD_GATEWAY,
                "Could not reach the weather service.".to_string(),
            )
        }
    };
    (status, Json(ErrorBody::new(detail)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
