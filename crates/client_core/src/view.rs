//! Render model for the three submission states plus a plain-text renderer.

use shared::domain::SimulationResponse;

use crate::error::SubmitError;

pub const LOADING_MESSAGE: &str = "Fetching real-world weather and running simulation...";
pub const ERROR_TITLE: &str = "Simulation Failed";
pub const CHART_TITLE: &str = "Projected Yield (Liters)";
pub const ANOMALY_WARNING: &str =
    "Anomaly detected: this yield is statistically unusual. Double-check the location and surface area.";

/// Width in cells of the longest bar.
const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastBar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastChart {
    pub title: String,
    pub bars: Vec<ForecastBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuccessView {
    pub headline: String,
    pub location: String,
    pub humidity_percent: i64,
    pub temperature: String,
    pub weather_line: String,
    pub anomaly_warning: Option<String>,
    pub chart: ForecastChart,
}

impl SuccessView {
    /// `submitted_location` is shown when the server does not echo its inputs.
    pub fn from_response(response: &SimulationResponse, submitted_location: &str) -> Self {
        let weather = response.live_weather_data;
        let humidity_percent = (weather.relative_humidity * 100.0).round() as i64;
        let temperature = one_decimal(weather.temperature_celsius);
        let location = response
            .input_parameters
            .as_ref()
            .map(|params| params.location.clone())
            .unwrap_or_else(|| submitted_location.to_string());

        Self {
            headline: format!("{} L/day", response.estimated_yield_liters_per_day),
            location,
            humidity_percent,
            weather_line: format!("{humidity_percent}% humidity at {temperature}°C"),
            temperature,
            anomaly_warning: response
                .anomaly_flag
                .then(|| ANOMALY_WARNING.to_string()),
            chart: ForecastChart {
                title: CHART_TITLE.to_string(),
                bars: response
                    .forecast_7_day
                    .labeled()
                    .map(|(label, value)| ForecastBar { label, value })
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
}

impl ErrorView {
    pub fn from_error(err: &SubmitError) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            message: err.user_message(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(SuccessView),
    Error(ErrorView),
}

impl ViewState {
    pub fn chart(&self) -> Option<&ForecastChart> {
        match self {
            Self::Success(view) => Some(&view.chart),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

pub fn render_text(state: &ViewState) -> String {
    match state {
        ViewState::Idle => String::new(),
        ViewState::Loading => format!("... {LOADING_MESSAGE}"),
        ViewState::Error(view) => format!("[{}]\n{}", view.title, view.message),
        ViewState::Success(view) => render_success(view),
    }
}

fn render_success(view: &SuccessView) -> String {
    let mut out = format!(
        "{}\nEstimated daily water yield for {}.\nBased on live weather: {}.\n",
        view.headline, view.location, view.weather_line
    );
    if let Some(warning) = &view.anomaly_warning {
        out.push_str(&format!("!! {warning}\n"));
    }
    out.push('\n');
    out.push_str(&render_chart(&view.chart));
    out
}

pub fn render_chart(chart: &ForecastChart) -> String {
    let max = chart
        .bars
        .iter()
        .map(|bar| bar.value)
        .fold(0.0_f64, f64::max);
    let label_width = chart
        .bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(0);

    let rows: String = chart
        .bars
        .iter()
        .map(|bar| {
            format!(
                "{:<label_width$} | {} {}\n",
                bar.label,
                "█".repeat(bar_cells(bar.value, max)),
                bar.value
            )
        })
        .collect();
    format!("{}\n{rows}", chart.title)
}

/// One decimal place, with exact ties (odd multiples of 0.25) rounded away
/// from zero the way `Number.toFixed(1)` does.
pub fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        let tenths = (quarters.abs() * 2.5 + 0.5).floor().copysign(value);
        return format!("{:.1}", tenths / 10.0);
    }
    format!("{value:.1}")
}

fn bar_cells(value: f64, max: f64) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / max) * BAR_WIDTH as f64).round() as usize
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
