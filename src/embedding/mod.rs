//! Embedding Module: From Scalar Series to Point Clouds
//!
//! A scalar time series x(0), x(1), ..., x(L-1) is lifted into a point
//! cloud by the time-delay (Takens) embedding:
//!
//!   v(i) = [x(i), x(i+τ), x(i+2τ), ..., x(i+dτ)] ∈ ℝ^(d+1)
//!
//! where d is the dimension lag and τ the sample lag. Periodic signals
//! trace closed curves in the embedding space, which persistent homology
//! then detects as long-lived H1 features.

mod series;
mod takens;

pub use series::TimeSeries;
pub use takens::{embed, PointCloud, TakensEmbedding};
