//! Synthetic Series
//!
//! Seeded generators for exercising the pipeline without external data:
//!
//! - **Periodic**: `sine_wave`, `noisy_sine` → one dominant loop in the
//!   delay embedding (β₁ = 1)
//! - **Noise**: `white_noise`, `uniform_noise` → no persistent loops
//! - **Random walk**: non-stationary drift
//! - **SIR epidemic**: infected fraction of an RK4-integrated SIR model
//!
//! Every stochastic generator takes an explicit seed, so the same call
//! always produces the same series.

mod generators;
mod sir;

pub use generators::{noisy_sine, random_walk, sine_wave, uniform_noise, white_noise};
pub use sir::{SirModel, SirState};
