//! Distance metrics and labelled distance matrices.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use super::LandscapeMatrix;
use crate::error::{Result, TdaError};

/// L^p distance between landscape vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// L2 distance
    #[default]
    Euclidean,
    /// L1 distance
    Manhattan,
    /// L∞ distance
    Chebyshev,
    /// General L^p distance, p ≥ 1
    Minkowski { p: f64 },
}

impl DistanceMetric {
    /// Only p ≥ 1 gives a true metric (triangle inequality).
    pub fn validate(&self) -> Result<()> {
        if let DistanceMetric::Minkowski { p } = *self {
            if p.is_nan() || p < 1.0 {
                return Err(TdaError::InvalidMetric(format!(
                    "minkowski p must be >= 1, got {p}"
                )));
            }
        }
        Ok(())
    }

    pub fn is_euclidean(&self) -> bool {
        match *self {
            DistanceMetric::Euclidean => true,
            DistanceMetric::Minkowski { p } => p == 2.0,
            _ => false,
        }
    }

    /// Distance between two equal-length vectors
    pub fn distance(&self, a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
        let diffs = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs());
        match *self {
            DistanceMetric::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            DistanceMetric::Manhattan => diffs.sum(),
            DistanceMetric::Chebyshev => diffs.fold(0.0, f64::max),
            DistanceMetric::Minkowski { p } if p.is_infinite() => diffs.fold(0.0, f64::max),
            DistanceMetric::Minkowski { p } => diffs.map(|d| d.powf(p)).sum::<f64>().powf(1.0 / p),
        }
    }
}

/// Symmetric N×N matrix of pairwise distances with zero diagonal
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    labels: Vec<String>,
    data: Array2<f64>,
}

impl DistanceMatrix {
    /// Pairwise distances between the rows of a landscape matrix
    pub fn compute(landscapes: &LandscapeMatrix, metric: DistanceMetric) -> Result<Self> {
        metric.validate()?;

        let n = landscapes.n_rows();
        let mut data = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in i + 1..n {
                let d = metric.distance(landscapes.row(i), landscapes.row(j));
                data[[i, j]] = d;
                data[[j, i]] = d;
            }
        }

        Ok(Self {
            labels: landscapes.labels().to_vec(),
            data,
        })
    }

    /// Wrap a precomputed matrix after checking it is a valid distance matrix
    pub fn from_array(labels: Vec<String>, data: Array2<f64>) -> Result<Self> {
        let n = labels.len();
        if data.nrows() != n || data.ncols() != n {
            return Err(TdaError::DimensionMismatch {
                expected: n,
                got: if data.nrows() != n { data.nrows() } else { data.ncols() },
            });
        }
        for i in 0..n {
            if data[[i, i]] != 0.0 {
                return Err(TdaError::InvalidParameter(format!(
                    "distance matrix diagonal must be zero (row {i})"
                )));
            }
            for j in i + 1..n {
                let d = data[[i, j]];
                if !d.is_finite() || d < 0.0 || d != data[[j, i]] {
                    return Err(TdaError::InvalidParameter(format!(
                        "distance matrix entry ({i}, {j}) must be finite, non-negative and symmetric"
                    )));
                }
            }
        }
        Ok(Self { labels, data })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[[i, j]]
    }

    /// Distance between two labelled series
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == a)?;
        let j = self.labels.iter().position(|l| l == b)?;
        Some(self.data[[i, j]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn matrix() -> LandscapeMatrix {
        LandscapeMatrix::from_rows([
            ("a", vec![0.0, 0.0]),
            ("b", vec![3.0, 4.0]),
            ("c", vec![1.0, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn metrics() {
        let a = array![0.0, 0.0];
        let b = array![3.0, -4.0];
        assert_relative_eq!(DistanceMetric::Euclidean.distance(a.view(), b.view()), 5.0);
        assert_relative_eq!(DistanceMetric::Manhattan.distance(a.view(), b.view()), 7.0);
        assert_relative_eq!(DistanceMetric::Chebyshev.distance(a.view(), b.view()), 4.0);
        assert_relative_eq!(
            DistanceMetric::Minkowski { p: 2.0 }.distance(a.view(), b.view()),
            5.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            DistanceMetric::Minkowski { p: f64::INFINITY }.distance(a.view(), b.view()),
            4.0
        );
    }

    #[test]
    fn minkowski_below_one_is_not_a_metric() {
        let err = DistanceMetric::Minkowski { p: 0.5 }.validate().unwrap_err();
        assert!(matches!(err, TdaError::InvalidMetric(_)));
        assert!(DistanceMetric::Minkowski { p: f64::NAN }.validate().is_err());
        assert!(DistanceMetric::Minkowski { p: 1.0 }.validate().is_ok());
    }

    #[test]
    fn symmetric_with_zero_diagonal() {
        let dm = DistanceMatrix::compute(&matrix(), DistanceMetric::Euclidean).unwrap();
        for i in 0..3 {
            assert_eq!(dm.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(dm.get(i, j), dm.get(j, i));
            }
        }
        assert_relative_eq!(dm.between("a", "b").unwrap(), 5.0);
        assert_relative_eq!(dm.between("c", "a").unwrap(), 1.0);
        assert!(dm.between("a", "z").is_none());
    }

    #[test]
    fn from_array_validates() {
        let labels = vec!["x".to_string(), "y".to_string()];
        assert!(DistanceMatrix::from_array(labels.clone(), array![[0.0, 1.0], [1.0, 0.0]]).is_ok());
        assert!(DistanceMatrix::from_array(labels.clone(), array![[0.0, 1.0], [2.0, 0.0]]).is_err());
        assert!(DistanceMatrix::from_array(labels.clone(), array![[1.0, 1.0], [1.0, 0.0]]).is_err());
        assert!(matches!(
            DistanceMatrix::from_array(labels, array![[0.0]]),
            Err(TdaError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }
}
