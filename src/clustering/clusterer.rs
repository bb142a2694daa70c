//! Landscape clustering front end.

use std::collections::BTreeMap;

use super::linkage::agglomerate;
use super::{Dendrogram, DistanceMatrix, DistanceMetric, LandscapeMatrix, Linkage};
use crate::error::{Result, TdaError};

/// Distance + linkage configuration for clustering landscapes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clusterer {
    pub metric: DistanceMetric,
    pub linkage: Linkage,
}

/// Everything produced by one clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    pub landscapes: LandscapeMatrix,
    pub distances: DistanceMatrix,
    pub dendrogram: Dendrogram,
}

impl Clusterer {
    pub fn new(metric: DistanceMetric, linkage: Linkage) -> Self {
        Self { metric, linkage }
    }

    /// Set distance metric.
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Set linkage rule.
    pub fn linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Ward's variance criterion is only defined for Euclidean distances.
    pub fn validate(&self) -> Result<()> {
        self.metric.validate()?;
        if self.linkage == Linkage::Ward && !self.metric.is_euclidean() {
            return Err(TdaError::InvalidMetric(format!(
                "ward linkage requires euclidean distances, got {:?}",
                self.metric
            )));
        }
        Ok(())
    }

    /// Cluster labelled landscape vectors into a dendrogram
    pub fn cluster<V: AsRef<[f64]>>(&self, landscapes: &BTreeMap<String, V>) -> Result<Dendrogram> {
        self.analyze(landscapes).map(|c| c.dendrogram)
    }

    /// Cluster and keep the landscape matrix and distance matrix
    pub fn analyze<V: AsRef<[f64]>>(
        &self,
        landscapes: &BTreeMap<String, V>,
    ) -> Result<Clustering> {
        self.validate()?;
        let matrix = LandscapeMatrix::from_rows(
            landscapes.iter().map(|(label, v)| (label.as_str(), v)),
        )?;
        let distances = self.distance_matrix(&matrix)?;
        let dendrogram = self.cluster_matrix(&distances)?;

        tracing::debug!(
            series = matrix.n_rows(),
            resolution = matrix.width(),
            metric = ?self.metric,
            linkage = ?self.linkage,
            top_height = dendrogram.heights().last().copied().unwrap_or(0.0),
            "Clustered landscapes"
        );

        Ok(Clustering {
            landscapes: matrix,
            distances,
            dendrogram,
        })
    }

    /// Pairwise distances between the rows of a landscape matrix
    pub fn distance_matrix(&self, matrix: &LandscapeMatrix) -> Result<DistanceMatrix> {
        DistanceMatrix::compute(matrix, self.metric)
    }

    /// Agglomerate a precomputed distance matrix
    pub fn cluster_matrix(&self, distances: &DistanceMatrix) -> Result<Dendrogram> {
        if distances.is_empty() {
            return Err(TdaError::EmptyInput);
        }
        let merges = agglomerate(distances.data(), self.linkage);
        Dendrogram::new(distances.labels().to_vec(), merges)
    }
}
