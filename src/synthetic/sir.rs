//! SIR Epidemic Model
//!
//! Compartmental model on population fractions:
//!
//!   dS/dt = -β S I
//!   dI/dt =  β S I - γ I
//!   dR/dt =  γ I
//!
//! with S + I + R = 1. The basic reproduction number is R₀ = β/γ:
//!
//! - R₀ > 1: an epidemic wave (I rises, peaks, decays)
//! - R₀ ≤ 1: the infection dies out monotonically
//!
//! The observed series is the infected fraction I(t), optionally with
//! multiplicative log-normal noise to mimic reporting error.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;

use super::generators::gaussian;
use crate::embedding::TimeSeries;
use crate::error::{Result, TdaError};

/// Compartment fractions at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SirState {
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
}

/// SIR model integrated with RK4
#[derive(Debug, Clone)]
pub struct SirModel {
    /// Transmission rate β
    beta: f64,
    /// Recovery rate γ
    gamma: f64,
    /// Initial infected fraction
    initial_infected: f64,
    /// Integration timestep
    dt: f64,
    /// Observation noise: (std of log-factor, seed)
    noise: Option<(f64, u64)>,
}

impl SirModel {
    pub fn new(beta: f64, gamma: f64) -> Result<Self> {
        for (name, value) in [("beta", beta), ("gamma", gamma)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TdaError::InvalidParameter(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(Self {
            beta,
            gamma,
            initial_infected: 1e-3,
            dt: 0.1,
            noise: None,
        })
    }

    /// Set initial infected fraction (clamped to (0, 1)).
    pub fn initial_infected(mut self, fraction: f64) -> Self {
        self.initial_infected = fraction.clamp(f64::EPSILON, 1.0 - f64::EPSILON);
        self
    }

    /// Set integration timestep.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Multiply each observation by exp(ε), ε ~ N(0, std²).
    pub fn noise(mut self, std: f64, seed: u64) -> Self {
        self.noise = Some((std, seed));
        self
    }

    /// Basic reproduction number R₀ = β/γ
    pub fn r0(&self) -> f64 {
        self.beta / self.gamma
    }

    pub fn initial_state(&self) -> SirState {
        SirState {
            susceptible: 1.0 - self.initial_infected,
            infected: self.initial_infected,
            recovered: 0.0,
        }
    }

    fn derivatives(&self, s: f64, i: f64) -> (f64, f64, f64) {
        let infection = self.beta * s * i;
        let recovery = self.gamma * i;
        (-infection, infection - recovery, recovery)
    }

    /// RK4 integration step
    fn rk4_step(&self, state: SirState) -> SirState {
        let dt = self.dt;
        let SirState { susceptible: s, infected: i, recovered: r } = state;

        let k1 = self.derivatives(s, i);
        let k2 = self.derivatives(s + k1.0 * dt / 2.0, i + k1.1 * dt / 2.0);
        let k3 = self.derivatives(s + k2.0 * dt / 2.0, i + k2.1 * dt / 2.0);
        let k4 = self.derivatives(s + k3.0 * dt, i + k3.1 * dt);

        let step = |k1: f64, k2: f64, k3: f64, k4: f64| (k1 + 2.0 * k2 + 2.0 * k3 + k4) * dt / 6.0;

        // Keep fractions non-negative
        SirState {
            susceptible: (s + step(k1.0, k2.0, k3.0, k4.0)).max(0.0),
            infected: (i + step(k1.1, k2.1, k3.1, k4.1)).max(0.0),
            recovered: (r + step(k1.2, k2.2, k3.2, k4.2)).max(0.0),
        }
    }

    /// Full trajectory: `n_samples` states, one every `sample_every` steps
    pub fn trajectory(&self, n_samples: usize, sample_every: usize) -> Result<Vec<SirState>> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(TdaError::InvalidParameter(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if sample_every == 0 {
            return Err(TdaError::InvalidParameter(
                "sample_every must be at least 1".to_string(),
            ));
        }

        let mut state = self.initial_state();
        let mut out = Vec::with_capacity(n_samples);
        for _ in 0..n_samples {
            out.push(state);
            for _ in 0..sample_every {
                state = self.rk4_step(state);
            }
        }
        Ok(out)
    }

    /// Observed infected-fraction series
    pub fn simulate(&self, n_samples: usize, sample_every: usize) -> Result<TimeSeries> {
        let infected = self
            .trajectory(n_samples, sample_every)?
            .into_iter()
            .map(|state| state.infected);

        let values: Vec<f64> = match self.noise {
            None => infected.collect(),
            Some((std, seed)) => {
                let normal = gaussian(std)?;
                let mut rng = StdRng::seed_from_u64(seed);
                infected
                    .map(|x| x * normal.sample(&mut rng).exp())
                    .collect()
            }
        };
        Ok(values.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn population_is_conserved() {
        let model = SirModel::new(0.5, 0.1).unwrap();
        for state in model.trajectory(200, 5).unwrap() {
            let total = state.susceptible + state.infected + state.recovered;
            assert_relative_eq!(total, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn epidemic_wave_above_threshold() {
        let model = SirModel::new(0.5, 0.1).unwrap().initial_infected(0.01);
        assert_relative_eq!(model.r0(), 5.0);

        let series = model.simulate(300, 5).unwrap();
        let values = series.values();
        let (peak_idx, peak) = values
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::MIN), |best, (i, x)| if x > best.1 { (i, x) } else { best });

        assert!(peak > 0.3);
        assert!(peak_idx > 0 && peak_idx < values.len() - 1);
        assert!(values[values.len() - 1] < peak / 10.0);
    }

    #[test]
    fn dies_out_below_threshold() {
        let model = SirModel::new(0.05, 0.1).unwrap().initial_infected(0.01);
        let series = model.simulate(100, 10).unwrap();
        let values = series.values();
        assert!(values.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn noisy_observations_are_seeded() {
        let model = SirModel::new(0.4, 0.1).unwrap().noise(0.1, 42);
        let a = model.simulate(50, 5).unwrap();
        let b = model.simulate(50, 5).unwrap();
        assert_eq!(a, b);
        assert!(a.values().iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn invalid_parameters() {
        assert!(SirModel::new(0.0, 0.1).is_err());
        assert!(SirModel::new(0.3, f64::NAN).is_err());
        let model = SirModel::new(0.3, 0.1).unwrap();
        assert!(model.trajectory(10, 0).is_err());
        assert!(model.clone().dt(0.0).trajectory(10, 1).is_err());
    }
}
