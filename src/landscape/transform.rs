//! Persistence Landscapes: Functional Summaries of Persistence Diagrams
//!
//! Landscapes are sampled on R evenly spaced points, so every landscape
//! built with the same resolution has the same length no matter how many
//! pairs the diagram holds.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TdaError};
use crate::topology::{PersistenceDiagram, PersistencePair};

/// Sampling domain of a landscape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LandscapeDomain {
    /// From the smallest birth to the largest death of the selected pairs
    Observed,
    /// [0, distance threshold] of the diagram
    #[default]
    Threshold,
    /// An explicit interval, shared by every series
    Fixed { start: f64, end: f64 },
}

/// Landscape parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandscapeConfig {
    /// Homology dimension whose pairs build the landscape
    pub dimension: usize,
    /// Number of sample points R
    pub resolution: usize,
    /// Landscape level, 1 = envelope of all tents
    pub level: usize,
    pub domain: LandscapeDomain,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            dimension: 1,
            resolution: 500,
            level: 1,
            domain: LandscapeDomain::Threshold,
        }
    }
}

impl LandscapeConfig {
    /// Set homology dimension.
    pub fn dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set number of samples.
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set landscape level.
    pub fn level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Set sampling domain.
    pub fn domain(mut self, domain: LandscapeDomain) -> Self {
        self.domain = domain;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(TdaError::InvalidParameter(
                "landscape resolution must be positive".to_string(),
            ));
        }
        if self.level == 0 {
            return Err(TdaError::InvalidParameter(
                "landscape level starts at 1".to_string(),
            ));
        }
        if let LandscapeDomain::Fixed { start, end } = self.domain {
            if !start.is_finite() || !end.is_finite() || end < start {
                return Err(TdaError::InvalidParameter(format!(
                    "landscape domain [{start}, {end}] is not a finite interval"
                )));
            }
        }
        Ok(())
    }
}

/// A sampled persistence landscape
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceLandscape {
    values: Vec<f64>,
    start: f64,
    end: f64,
    dimension: usize,
    level: usize,
}

impl PersistenceLandscape {
    /// Compute persistence landscape from diagram
    pub fn from_diagram(pd: &PersistenceDiagram, config: &LandscapeConfig) -> Result<Self> {
        config.validate()?;

        let pairs: Vec<&PersistencePair> = pd.dim(config.dimension);
        let (start, end) = match config.domain {
            LandscapeDomain::Fixed { start, end } => (start, end),
            LandscapeDomain::Threshold => (0.0, pd.threshold()),
            LandscapeDomain::Observed if pairs.is_empty() => (0.0, 0.0),
            LandscapeDomain::Observed => (
                pairs.iter().map(|p| p.birth).fold(f64::INFINITY, f64::min),
                pairs.iter().map(|p| p.death).fold(f64::NEG_INFINITY, f64::max),
            ),
        };

        let resolution = config.resolution;
        if pairs.is_empty() {
            return Ok(Self {
                values: vec![0.0; resolution],
                start,
                end,
                dimension: config.dimension,
                level: config.level,
            });
        }

        let mut heights: Vec<f64> = Vec::with_capacity(pairs.len());
        let values = sample_grid(start, end, resolution)
            .map(|t| {
                heights.clear();
                heights.extend(
                    pairs
                        .iter()
                        .map(|p| tent_function(t, p.birth, p.death))
                        .filter(|&h| h > 0.0),
                );
                kth_largest(&mut heights, config.level)
            })
            .collect();

        Ok(Self {
            values,
            start,
            end,
            dimension: config.dimension,
            level: config.level,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Sample positions matching `values()`
    pub fn grid(&self) -> Vec<f64> {
        sample_grid(self.start, self.end, self.values.len()).collect()
    }

    /// Largest landscape value
    pub fn peak(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// L^p norm of the landscape function (trapezoidal rule)
    pub fn lp_norm(&self, p: f64) -> f64 {
        let func = &self.values;
        if func.len() < 2 || self.end <= self.start {
            return 0.0;
        }

        let dt = (self.end - self.start) / (func.len() - 1) as f64;
        let mut integral = 0.0;
        for i in 1..func.len() {
            let avg = (func[i].abs().powf(p) + func[i-1].abs().powf(p)) / 2.0;
            integral += dt * avg;
        }

        integral.powf(1.0 / p)
    }

    /// Inner product with another landscape sampled on the same grid
    pub fn inner_product(&self, other: &PersistenceLandscape) -> Result<f64> {
        self.check_compatible(other)?;
        if self.values.len() < 2 || self.end <= self.start {
            return Ok(0.0);
        }

        let dt = (self.end - self.start) / (self.values.len() - 1) as f64;
        let (f1, f2) = (&self.values, &other.values);
        let mut product = 0.0;
        for i in 1..f1.len() {
            product += dt * (f1[i] * f2[i] + f1[i-1] * f2[i-1]) / 2.0;
        }
        Ok(product)
    }

    fn check_compatible(&self, other: &PersistenceLandscape) -> Result<()> {
        if self.values.len() != other.values.len() {
            return Err(TdaError::DimensionMismatch {
                expected: self.values.len(),
                got: other.values.len(),
            });
        }
        if self.domain() != other.domain() {
            return Err(TdaError::InvalidParameter(format!(
                "landscapes sampled on different grids: {:?} vs {:?}",
                self.domain(),
                other.domain()
            )));
        }
        Ok(())
    }
}

impl AsRef<[f64]> for PersistenceLandscape {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Build the landscape of `diagram` for one homology dimension.
///
/// Samples R points over the observed birth-death range.
pub fn to_landscape(
    diagram: &PersistenceDiagram,
    homology_dimension: usize,
    resolution: usize,
) -> Result<PersistenceLandscape> {
    let config = LandscapeConfig::default()
        .dimension(homology_dimension)
        .resolution(resolution)
        .domain(LandscapeDomain::Observed);
    PersistenceLandscape::from_diagram(diagram, &config)
}

/// R evenly spaced points on [start, end]; R = 1 gives the midpoint
fn sample_grid(start: f64, end: f64, resolution: usize) -> impl Iterator<Item = f64> {
    let step = if resolution > 1 {
        (end - start) / (resolution - 1) as f64
    } else {
        0.0
    };
    let origin = if resolution == 1 { (start + end) / 2.0 } else { start };
    (0..resolution).map(move |i| origin + i as f64 * step)
}

/// Tent function for a persistence pair
fn tent_function(t: f64, birth: f64, death: f64) -> f64 {
    (t - birth).min(death - t).max(0.0)
}

/// k-th largest value (1-based), 0 if fewer than k values
fn kth_largest(values: &mut [f64], k: usize) -> f64 {
    if k > values.len() {
        return 0.0;
    }
    if k == 1 {
        return values.iter().copied().fold(0.0, f64::max);
    }
    values.sort_unstable_by(|a, b| b.total_cmp(a));
    values[k - 1]
}
