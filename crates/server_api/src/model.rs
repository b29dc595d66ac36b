//! Yield estimation, anomaly scoring and the 7-day projection.

use serde::{Deserialize, Serialize};
use shared::domain::{Forecast, FORECAST_DAYS};

/// Litres per square metre per day at [`BASELINE_HUMIDITY`].
pub const BASELINE_YIELD_PER_SQ_METER: f64 = 1.11;
pub const BASELINE_HUMIDITY: f64 = 0.20;
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 3.5;
pub const FORECAST_MULTIPLIERS: [f64; FORECAST_DAYS] = [1.0, 1.05, 0.98, 1.10, 0.95, 1.02, 1.08];

/// Historical yield distribution the z-score is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    pub mean_yield: f64,
    pub std_dev_yield: f64,
}

impl Default for ModelStats {
    fn default() -> Self {
        Self {
            mean_yield: 143.40654101675244,
            std_dev_yield: 56.09032380666645,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSettings {
    pub stats: ModelStats,
    pub anomaly_threshold: f64,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            stats: ModelStats::default(),
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
        }
    }
}

/// Two decimal places, rounding the exact binary value with ties to even.
/// Scaling by 100 first would push values such as 3.88499.. onto a tie.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Estimated litres per day, scaled linearly with humidity relative to the baseline.
pub fn calculate_water_harvest(surface_area: f64, relative_humidity: f64) -> f64 {
    if relative_humidity <= 0.0 || surface_area <= 0.0 {
        return 0.0;
    }
    let humidity_factor = relative_humidity / BASELINE_HUMIDITY;
    round2(surface_area * BASELINE_YIELD_PER_SQ_METER * humidity_factor)
}

pub fn z_score(yield_value: f64, stats: &ModelStats) -> Option<f64> {
    if stats.std_dev_yield == 0.0 {
        return None;
    }
    Some(((yield_value - stats.mean_yield) / stats.std_dev_yield).abs())
}

pub fn is_anomalous(yield_value: f64, settings: &ModelSettings) -> bool {
    z_score(yield_value, &settings.stats).is_some_and(|z| z > settings.anomaly_threshold)
}

pub fn project_forecast(yield_value: f64) -> Forecast {
    Forecast::new(FORECAST_MULTIPLIERS.map(|m| round2(yield_value * m)))
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
