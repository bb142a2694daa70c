//! Periodic, noise and random-walk generators.

use rand::distr::Uniform;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

use crate::embedding::TimeSeries;
use crate::error::{Result, TdaError};

/// x(t) = A sin(2πt / period), t = 0..len
pub fn sine_wave(len: usize, period: f64, amplitude: f64) -> TimeSeries {
    (0..len)
        .map(|t| amplitude * (2.0 * PI * t as f64 / period).sin())
        .collect::<Vec<f64>>()
        .into()
}

/// Sine wave plus Gaussian noise N(0, noise_std²)
pub fn noisy_sine(
    len: usize,
    period: f64,
    amplitude: f64,
    noise_std: f64,
    seed: u64,
) -> Result<TimeSeries> {
    let normal = gaussian(noise_std)?;
    let mut rng = StdRng::seed_from_u64(seed);

    Ok(sine_wave(len, period, amplitude)
        .values()
        .iter()
        .map(|x| x + normal.sample(&mut rng))
        .collect::<Vec<f64>>()
        .into())
}

/// Gaussian white noise N(0, std²)
pub fn white_noise(len: usize, std: f64, seed: u64) -> Result<TimeSeries> {
    let normal = gaussian(std)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..len)
        .map(|_| normal.sample(&mut rng))
        .collect::<Vec<f64>>()
        .into())
}

/// Independent samples from U[low, high)
pub fn uniform_noise(len: usize, low: f64, high: f64, seed: u64) -> Result<TimeSeries> {
    let uniform = Uniform::new(low, high).map_err(|e| {
        TdaError::InvalidParameter(format!("uniform noise on [{low}, {high}): {e}"))
    })?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..len)
        .map(|_| uniform.sample(&mut rng))
        .collect::<Vec<f64>>()
        .into())
}

/// Cumulative sum of Gaussian steps, starting at 0
pub fn random_walk(len: usize, step_std: f64, seed: u64) -> Result<TimeSeries> {
    let normal = gaussian(step_std)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut position = 0.0;
    let mut values = Vec::with_capacity(len);
    for _ in 0..len {
        values.push(position);
        position += normal.sample(&mut rng);
    }
    Ok(values.into())
}

pub(crate) fn gaussian(std: f64) -> Result<Normal<f64>> {
    if !std.is_finite() || std < 0.0 {
        return Err(TdaError::InvalidParameter(format!(
            "noise standard deviation must be non-negative, got {std}"
        )));
    }
    Normal::new(0.0, std).map_err(|e| TdaError::InvalidParameter(e.to_string()))
}
