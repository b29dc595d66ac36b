//! Synthetic "normal" yield data for fitting the anomaly detector's statistics.

use rand::{rngs::SmallRng, Rng, SeedableRng};
use server_api::model::ModelStats;

pub const HUMIDITY_MIN: f64 = 0.20;
pub const HUMIDITY_MAX: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationParams {
    pub samples: usize,
    pub seed: u64,
    pub yield_factor: f64,
    pub noise_std: f64,
}

impl Default for CalibrationParams {
    fn default() -> Self {
        Self {
            samples: 1000,
            seed: 42,
            yield_factor: 250.0,
            noise_std: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub humidity: f64,
    pub yield_liters: f64,
}

/// Humidity drawn uniformly from `[HUMIDITY_MIN, HUMIDITY_MAX)`, yield linear in humidity
/// plus gaussian noise, never negative.
pub fn synthesize(params: &CalibrationParams) -> Vec<Sample> {
    let mut rng = SmallRng::seed_from_u64(params.seed);
    (0..params.samples)
        .map(|_| {
            let humidity = rng.random_range(HUMIDITY_MIN..HUMIDITY_MAX);
            let noise = standard_normal(&mut rng) * params.noise_std;
            Sample {
                humidity,
                yield_liters: (humidity * params.yield_factor + noise).max(0.0),
            }
        })
        .collect()
}

// Box-Muller; `1 - u` keeps the log argument in (0, 1].
fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Mean and sample standard deviation of the yields. `None` with fewer than two samples.
pub fn fit_stats(samples: &[Sample]) -> Option<ModelStats> {
    if samples.len() < 2 {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().map(|s| s.yield_liters).sum::<f64>() / n;
    let variance = samples
        .iter()
        .map(|s| (s.yield_liters - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    Some(ModelStats {
        mean_yield: mean,
        std_dev_yield: variance.sqrt(),
    })
}
