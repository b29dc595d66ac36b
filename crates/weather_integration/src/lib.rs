use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::domain::LiveWeatherData;
use thiserror::Error;
use tracing::{debug, warn};

pub const OPENWEATHERMAP_BASE_URL: &str = "https://api.openweathermap.org";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather service returned status {status} for '{city}'")]
    Upstream { status: u16, city: String },
    #[error("could not parse weather data: {0}")]
    Parse(String),
    #[error("weather service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Source of current conditions for a named location.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current(&self, city: &str) -> Result<LiveWeatherData, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    /// Percent, 0-100.
    humidity: f64,
    temp: f64,
}

#[derive(Clone)]
pub struct OpenWeatherMapProvider {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherMapProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapProvider {
    async fn current(&self, city: &str) -> Result<LiveWeatherData, WeatherError> {
        debug!(%city, "weather: fetching current conditions");
        let response = self
            .http
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%city, status = status.as_u16(), "weather: upstream rejected lookup");
            return Err(WeatherError::Upstream {
                status: status.as_u16(),
                city: city.to_string(),
            });
        }

        let body = response.bytes().await?;
        let parsed: CurrentWeather =
            serde_json::from_slice(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        Ok(LiveWeatherData {
            relative_humidity: parsed.main.humidity / 100.0,
            temperature_celsius: parsed.main.temp,
        })
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
