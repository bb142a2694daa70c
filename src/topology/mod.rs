//! Topology Module: Persistent Homology of Point Clouds
//!
//! For a point cloud X we construct the Vietoris-Rips filtration VR_ε(X)
//! indexed by the scale parameter ε. Persistent homology tracks the birth
//! and death of topological features (connected components, loops, voids)
//! across this filtration.
//!
//! The homology routine sits behind [`PersistenceComputer`] so it can be
//! swapped for another implementation; [`RipsPersistence`] is the exact
//! boundary-matrix reduction shipped with the crate.

mod betti;
mod diagram;
mod persistence;
mod vietoris_rips;

pub use betti::{BettiCurve, BettiNumbers};
pub use diagram::{PersistenceDiagram, PersistencePair};
pub use persistence::{PersistenceComputer, RipsPersistence};
pub use vietoris_rips::{Simplex, VietorisRips};
