//! Hierarchical clustering of landscape vectors.
//!
//! Landscapes of N series are stacked into an N×R matrix, compared with a
//! configurable L^p metric, and merged bottom-up into a dendrogram using
//! Ward, single, complete or average linkage.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use tda_series_clustering::clustering::{Clusterer, Linkage};
//!
//! let mut landscapes = BTreeMap::new();
//! landscapes.insert("a".to_string(), vec![0.0, 1.0, 0.0]);
//! landscapes.insert("b".to_string(), vec![0.0, 1.1, 0.0]);
//! landscapes.insert("c".to_string(), vec![3.0, 4.0, 3.0]);
//!
//! let clusterer = Clusterer::default().linkage(Linkage::Average);
//! let dendrogram = clusterer.cluster(&landscapes).unwrap();
//! assert_eq!(dendrogram.merges().len(), 2);
//! assert_eq!(dendrogram.cut(2).unwrap(), vec![0, 0, 1]);
//! ```

mod clusterer;
mod dendrogram;
mod distance;
mod linkage;
mod matrix;

pub use clusterer::{Clusterer, Clustering};
pub use dendrogram::{Dendrogram, Merge};
pub use distance::{DistanceMatrix, DistanceMetric};
pub use linkage::Linkage;
pub use matrix::LandscapeMatrix;
