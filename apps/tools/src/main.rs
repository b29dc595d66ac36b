use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use server_api::{
    model::{ModelSettings, ModelStats, DEFAULT_ANOMALY_THRESHOLD},
    simulate_with_weather,
};
use shared::domain::{LiveWeatherData, SimulationRequest};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod calibrate;

use calibrate::{fit_stats, synthesize, CalibrationParams};

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Toml,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fit anomaly statistics on synthetic data and print them as server settings.
    Calibrate {
        #[arg(long, default_value_t = 1000)]
        samples: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, default_value_t = 250.0)]
        yield_factor: f64,
        #[arg(long, default_value_t = 15.0)]
        noise_std: f64,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Run the yield model offline for a known humidity.
    Simulate {
        #[arg(long)]
        surface_area: f64,
        /// Relative humidity as a fraction, e.g. 0.45.
        #[arg(long)]
        humidity: f64,
        #[arg(long, default_value_t = 20.0)]
        temperature: f64,
        #[arg(long, default_value = "offline")]
        location: String,
        #[arg(long, default_value_t = DEFAULT_ANOMALY_THRESHOLD)]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Calibrate {
            samples,
            seed,
            yield_factor,
            noise_std,
            format,
        } => {
            let params = CalibrationParams {
                samples,
                seed,
                yield_factor,
                noise_std,
            };
            info!(?params, "calibrate: generating synthetic samples");
            let Some(stats) = fit_stats(&synthesize(&params)) else {
                bail!("need at least 2 samples to fit statistics (got {samples})");
            };
            println!("{}", render_stats(&stats, format)?);
        }
        Command::Simulate {
            surface_area,
            humidity,
            temperature,
            location,
            threshold,
        } => {
            if !(0.0..=1.0).contains(&humidity) {
                bail!("humidity must be a fraction between 0 and 1 (got {humidity})");
            }
            let request = SimulationRequest::new(surface_area, location);
            request.validate()?;
            let model = ModelSettings {
                anomaly_threshold: threshold,
                ..ModelSettings::default()
            };
            let response = simulate_with_weather(
                &request,
                LiveWeatherData {
                    relative_humidity: humidity,
                    temperature_celsius: temperature,
                },
                &model,
            );
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn render_stats(stats: &ModelStats, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(stats)?,
        OutputFormat::Toml => toml::to_string(stats).context("encode toml")?,
    })
}
