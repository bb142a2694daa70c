//! # TDA Series Clustering
//!
//! Topological clustering of time series via persistent homology and
//! persistence landscapes.
//!
//! ## Pipeline
//!
//! Each labelled series goes through the same four stages:
//!
//! 1. **Takens embedding**: the series x(t) becomes a point cloud of
//!    delay vectors [x(i), x(i+τ), ..., x(i+dτ)] ∈ ℝ^(d+1)
//!
//! 2. **Persistent homology**: the Vietoris-Rips filtration of the cloud,
//!    truncated at a distance threshold, yields a persistence diagram of
//!    (birth, death) pairs per homology dimension (β₀, β₁, ...)
//!
//! 3. **Persistence landscape**: the diagram of one homology dimension is
//!    sampled on a fixed grid, giving a vector of length R
//!
//! 4. **Hierarchical clustering**: landscape vectors are compared with an
//!    L^p distance and merged bottom-up (Ward, single, complete, average)
//!
//! Periodic signals trace loops in the embedding and produce tall H1
//! landscapes; noise produces short-lived features and flat landscapes.
//! Series with similar topology end up close in the dendrogram.
//!
//! ## Example
//!
//! ```no_run
//! use std::collections::BTreeMap;
//! use tda_series_clustering::{synthetic, Pipeline, PipelineConfig};
//!
//! let mut series = BTreeMap::new();
//! series.insert("sine".to_string(), synthetic::sine_wave(100, 10.0, 1.0));
//! series.insert("noise".to_string(), synthetic::white_noise(100, 0.5, 7).unwrap());
//!
//! let config = PipelineConfig::default().embedding(3, 2);
//! let output = Pipeline::new(config).unwrap().run(&series).unwrap();
//! println!("{:?}", output.dendrogram.merges());
//! ```
//!
//! ## References
//!
//! - Takens, "Detecting strange attractors in turbulence" (1981)
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Bubenik, "Statistical topological data analysis using persistence
//!   landscapes", JMLR 16 (2015)
//! - Gidea & Katz, "Topological data analysis of financial time series"
//!   (2018)

pub mod clustering;
pub mod embedding;
pub mod error;
pub mod landscape;
pub mod pipeline;
pub mod synthetic;
pub mod topology;

pub use error::{Result, TdaError};

// Re-exports from embedding
pub use embedding::{embed, PointCloud, TakensEmbedding, TimeSeries};

// Re-exports from topology
pub use topology::{
    BettiCurve,
    BettiNumbers,
    PersistenceComputer,
    PersistenceDiagram,
    PersistencePair,
    RipsPersistence,
    Simplex,
    VietorisRips,
};

// Re-exports from landscape
pub use landscape::{to_landscape, LandscapeConfig, LandscapeDomain, PersistenceLandscape};

// Re-exports from clustering
pub use clustering::{
    Clusterer,
    Clustering,
    Dendrogram,
    DistanceMatrix,
    DistanceMetric,
    LandscapeMatrix,
    Linkage,
    Merge,
};

// Re-exports from pipeline
pub use pipeline::{
    ExcludedSeries,
    FailurePolicy,
    Pipeline,
    PipelineConfig,
    PipelineOutput,
    SeriesReport,
};
