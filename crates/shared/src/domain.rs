use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of days covered by a yield forecast.
pub const FORECAST_DAYS: usize = 7;

/// Shortest location name the simulation service accepts.
pub const MIN_LOCATION_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub surface_area: f64,
    pub location: String,
}

impl SimulationRequest {
    pub fn new(surface_area: f64, location: impl Into<String>) -> Self {
        Self {
            surface_area,
            location: location.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.surface_area.is_finite() || self.surface_area <= 0.0 {
            return Err(ValidationError::SurfaceAreaNotPositive(self.surface_area));
        }
        if self.location.chars().count() < MIN_LOCATION_CHARS {
            return Err(ValidationError::LocationTooShort {
                min: MIN_LOCATION_CHARS,
            });
        }
        Ok(())
    }
}

/// Echo of the request as the service understood it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParameters {
    pub location: String,
    pub surface_area: f64,
}

impl From<&SimulationRequest> for InputParameters {
    fn from(value: &SimulationRequest) -> Self {
        Self {
            location: value.location.clone(),
            surface_area: value.surface_area,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveWeatherData {
    /// Fraction in `0.0..=1.0`.
    pub relative_humidity: f64,
    pub temperature_celsius: f64,
}

/// Daily yield projection, always exactly [`FORECAST_DAYS`] entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forecast([f64; FORECAST_DAYS]);

impl Forecast {
    pub fn new(values: [f64; FORECAST_DAYS]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FORECAST_DAYS] {
        &self.0
    }

    /// Pairs every value with its `Day N` label.
    pub fn labeled(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(idx, value)| (day_label(idx), *value))
    }
}

pub fn day_label(idx: usize) -> String {
    format!("Day {}", idx + 1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_parameters: Option<InputParameters>,
    pub live_weather_data: LiveWeatherData,
    pub estimated_yield_liters_per_day: f64,
    pub forecast_7_day: Forecast,
    #[serde(default)]
    pub anomaly_flag: bool,
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
