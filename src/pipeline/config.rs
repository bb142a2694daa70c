//! Pipeline configuration.
//!
//! Every parameter is an explicit field; nothing is read from process-wide
//! state. Missing TOML fields fall back to the defaults below.
//!
//! ```toml
//! dim_lag = 3
//! sample_lag = 2
//! distance_threshold = 2.5
//! linkage = "average"
//! landscape_domain = { kind = "fixed", start = 0.0, end = 2.5 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::clustering::{Clusterer, DistanceMetric, Linkage};
use crate::embedding::TakensEmbedding;
use crate::error::{Result, TdaError};
use crate::landscape::{LandscapeConfig, LandscapeDomain};

/// What to do when one series fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the run with the first failing series (in label order)
    #[default]
    Abort,
    /// Drop failing series and cluster the rest
    Exclude,
}

/// Parameters of a clustering run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of delay lags d (points live in ℝ^(d+1))
    pub dim_lag: usize,
    /// Spacing τ between delay coordinates
    pub sample_lag: usize,
    /// Highest homology dimension computed
    pub max_homology_dimension: usize,
    /// Rips scale cutoff
    pub distance_threshold: f64,
    /// Landscape samples R
    pub landscape_resolution: usize,
    /// Homology dimension summarized by the landscape
    pub landscape_dimension: usize,
    /// Landscape level (1 = envelope)
    pub landscape_level: usize,
    pub landscape_domain: LandscapeDomain,
    pub distance_metric: DistanceMetric,
    pub linkage: Linkage,
    pub failure_policy: FailurePolicy,
    /// Remove NaN/inf samples instead of rejecting the series
    pub drop_missing: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dim_lag: 3,
            sample_lag: 1,
            max_homology_dimension: 1,
            distance_threshold: 2.0,
            landscape_resolution: 500,
            landscape_dimension: 1,
            landscape_level: 1,
            landscape_domain: LandscapeDomain::Threshold,
            distance_metric: DistanceMetric::Euclidean,
            linkage: Linkage::Ward,
            failure_policy: FailurePolicy::Abort,
            drop_missing: false,
        }
    }
}

impl PipelineConfig {
    /// Set embedding lags.
    pub fn embedding(mut self, dim_lag: usize, sample_lag: usize) -> Self {
        self.dim_lag = dim_lag;
        self.sample_lag = sample_lag;
        self
    }

    /// Set highest homology dimension.
    pub fn max_homology_dimension(mut self, max_dim: usize) -> Self {
        self.max_homology_dimension = max_dim;
        self
    }

    /// Set Rips distance threshold.
    pub fn distance_threshold(mut self, threshold: f64) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Set landscape resolution.
    pub fn landscape_resolution(mut self, resolution: usize) -> Self {
        self.landscape_resolution = resolution;
        self
    }

    /// Set homology dimension and level of the landscape.
    pub fn landscape(mut self, dimension: usize, level: usize) -> Self {
        self.landscape_dimension = dimension;
        self.landscape_level = level;
        self
    }

    /// Set landscape sampling domain.
    pub fn landscape_domain(mut self, domain: LandscapeDomain) -> Self {
        self.landscape_domain = domain;
        self
    }

    /// Set distance metric.
    pub fn distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    /// Set linkage rule.
    pub fn linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Set failure policy.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Drop missing samples before embedding.
    pub fn drop_missing(mut self, drop: bool) -> Self {
        self.drop_missing = drop;
        self
    }

    /// Parse a TOML document.
    ///
    /// Syntax errors map to `Config`; an unknown `distance_metric` or
    /// `linkage` maps to `InvalidMetric`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| TdaError::Config(e.to_string()))?;

        if let Some(value) = table.get("distance_metric") {
            value
                .clone()
                .try_into::<DistanceMetric>()
                .map_err(|e| TdaError::InvalidMetric(format!("distance_metric: {e}")))?;
        }
        if let Some(value) = table.get("linkage") {
            value
                .clone()
                .try_into::<Linkage>()
                .map_err(|e| TdaError::InvalidMetric(format!("linkage: {e}")))?;
        }

        let config: Self = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| TdaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TdaError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        self.takens()?;
        if !self.distance_threshold.is_finite() || self.distance_threshold <= 0.0 {
            return Err(TdaError::InvalidParameter(format!(
                "distance_threshold must be positive and finite, got {}",
                self.distance_threshold
            )));
        }
        if self.landscape_dimension > self.max_homology_dimension {
            return Err(TdaError::InvalidParameter(format!(
                "landscape_dimension {} exceeds max_homology_dimension {}",
                self.landscape_dimension, self.max_homology_dimension
            )));
        }
        self.landscape_config().validate()?;
        self.clusterer().validate()
    }

    /// Embedding parameters
    pub fn takens(&self) -> Result<TakensEmbedding> {
        TakensEmbedding::new(self.dim_lag, self.sample_lag)
    }

    pub fn landscape_config(&self) -> LandscapeConfig {
        LandscapeConfig {
            dimension: self.landscape_dimension,
            resolution: self.landscape_resolution,
            level: self.landscape_level,
            domain: self.landscape_domain,
        }
    }

    pub fn clusterer(&self) -> Clusterer {
        Clusterer::new(self.distance_metric, self.linkage)
    }
}
