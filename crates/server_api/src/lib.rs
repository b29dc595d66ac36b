use std::sync::Arc;

use shared::{
    domain::{InputParameters, LiveWeatherData, SimulationRequest, SimulationResponse},
    error::ValidationError,
};
use thiserror::Error;
use tracing::info;
use weather_integration::{WeatherError, WeatherProvider};

pub mod model;

use model::{calculate_water_harvest, is_anomalous, project_forecast, ModelSettings};

#[derive(Clone)]
pub struct ApiContext {
    pub weather: Arc<dyn WeatherProvider>,
    pub model: ModelSettings,
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
}

pub async fn run_simulation(
    ctx: &ApiContext,
    request: &SimulationRequest,
) -> Result<SimulationResponse, SimulationError> {
    request.validate()?;
    let location = request.location.trim();
    let weather = ctx.weather.current(location).await?;
    let response = simulate_with_weather(request, weather, &ctx.model);
    info!(
        %location,
        surface_area = request.surface_area,
        relative_humidity = weather.relative_humidity,
        estimated_yield = response.estimated_yield_liters_per_day,
        anomaly = response.anomaly_flag,
        "simulation: completed"
    );
    Ok(response)
}

/// Runs the model against an already known weather reading.
pub fn simulate_with_weather(
    request: &SimulationRequest,
    weather: LiveWeatherData,
    model: &ModelSettings,
) -> SimulationResponse {
    let estimated_yield = calculate_water_harvest(request.surface_area, weather.relative_humidity);
    SimulationResponse {
        input_parameters: Some(InputParameters::from(request)),
        live_weather_data: weather,
        estimated_yield_liters_per_day: estimated_yield,
        forecast_7_day: project_forecast(estimated_yield),
        anomaly_flag: is_anomalous(estimated_yield, model),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
