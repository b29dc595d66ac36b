use std::{collections::HashMap, path::Path};

use anyhow::{bail, Context};
use config::{Config, Environment, File};
use serde::Deserialize;
use server_api::model::{ModelSettings, ModelStats};
use weather_integration::OPENWEATHERMAP_BASE_URL;

pub const SETTINGS_FILE: &str = "server.toml";
const ENV_PREFIX: &str = "APP";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub openweathermap_api_key: Option<String>,
    pub weather_base_url: String,
    pub anomaly_threshold: f64,
    pub mean_yield: f64,
    pub std_dev_yield: f64,
}

impl Settings {
    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        match self.openweathermap_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => bail!("OPENWEATHERMAP_API_KEY environment variable not set"),
        }
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            stats: ModelStats {
                mean_yield: self.mean_yield,
                std_dev_yield: self.std_dev_yield,
            },
            anomaly_threshold: self.anomaly_threshold,
        }
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), None)
}

/// Layers defaults, the optional settings file and the environment, in that order.
///
/// `env` replaces the process environment when given.
pub(crate) fn load_settings_from(
    path: &Path,
    env: Option<HashMap<String, String>>,
) -> anyhow::Result<Settings> {
    let model = ModelSettings::default();
    let lookup = |key: &str| match &env {
        Some(vars) => vars.get(key).cloned(),
        None => std::env::var(key).ok(),
    };

    let mut settings: Settings = Config::builder()
        .set_default("bind_addr", "127.0.0.1:8000")?
        .set_default("weather_base_url", OPENWEATHERMAP_BASE_URL)?
        .set_default("anomaly_threshold", model.anomaly_threshold)?
        .set_default("mean_yield", model.stats.mean_yield)?
        .set_default("std_dev_yield", model.stats.std_dev_yield)?
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .source(env.clone()),
        )
        .build()
        .with_context(|| format!("failed to load settings from '{}'", path.display()))?
        .try_deserialize()
        .context("invalid server settings")?;

    if lookup("APP__BIND_ADDR").is_none() {
        if let Some(v) = lookup("SERVER_BIND") {
            settings.bind_addr = v;
        }
    }
    if lookup("APP__OPENWEATHERMAP_API_KEY").is_none() {
        if let Some(v) = lookup("OPENWEATHERMAP_API_KEY") {
            settings.openweathermap_api_key = Some(v);
        }
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
