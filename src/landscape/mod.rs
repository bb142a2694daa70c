//! Landscape Module: Vector Summaries of Persistence Diagrams
//!
//! Persistence landscapes turn a diagram into a fixed-length real vector
//! that standard distances can compare. Each pair (b, d) contributes a
//! tent function
//!
//!   Λ(x) = max(0, min(x - b, d - x))
//!
//! peaking at (d - b)/2 over the midpoint (b + d)/2. The k-th landscape
//! level λₖ(x) is the k-th largest tent value at x.

mod transform;

pub use transform::{to_landscape, LandscapeConfig, LandscapeDomain, PersistenceLandscape};
