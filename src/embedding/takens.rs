//! Time-Delay Embedding
//!
//! Builds delay vectors from a scalar series. Point i of the cloud is the
//! window starting at sample i, so the cloud keeps the temporal order of
//! the series even though the Vietoris-Rips construction downstream treats
//! it as an unordered set.

use ndarray::{Array2, ArrayView1};

use super::TimeSeries;
use crate::error::{Result, TdaError};

/// Point cloud produced by an embedding, one row per point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    points: Array2<f64>,
}

impl PointCloud {
    /// Wrap an existing (n_points × dimension) array.
    pub fn from_array(points: Array2<f64>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    pub fn n_points(&self) -> usize {
        self.points.nrows()
    }

    /// Ambient dimension (d + 1 for a delay embedding)
    pub fn dimension(&self) -> usize {
        self.points.ncols()
    }

    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.points.row(i)
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Euclidean distance matrix between all points
    pub fn distance_matrix(&self) -> Array2<f64> {
        let n = self.n_points();
        let dim = self.dimension();

        let mut dm = Array2::<f64>::zeros((n, n));

        for i in 0..n {
            for j in i + 1..n {
                let mut dist_sq = 0.0;
                for d in 0..dim {
                    let diff = self.points[[i, d]] - self.points[[j, d]];
                    dist_sq += diff * diff;
                }
                let dist = dist_sq.sqrt();
                dm[[i, j]] = dist;
                dm[[j, i]] = dist;
            }
        }

        dm
    }
}

/// Delay-embedding parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakensEmbedding {
    /// Number of lags d; points live in ℝ^(d+1)
    pub dim_lag: usize,
    /// Sample spacing τ between coordinates
    pub sample_lag: usize,
}

impl TakensEmbedding {
    pub fn new(dim_lag: usize, sample_lag: usize) -> Result<Self> {
        if dim_lag == 0 {
            return Err(TdaError::InvalidParameter(
                "dim_lag must be at least 1".to_string(),
            ));
        }
        if sample_lag == 0 {
            return Err(TdaError::InvalidParameter(
                "sample_lag must be at least 1".to_string(),
            ));
        }
        Ok(Self { dim_lag, sample_lag })
    }

    /// Number of samples covered by one window minus one (d·τ).
    ///
    /// Saturates at `usize::MAX`; no series can be that long.
    pub fn window_span(&self) -> usize {
        self.dim_lag.saturating_mul(self.sample_lag)
    }

    /// Number of points produced from a series of length `len`
    pub fn points_for(&self, len: usize) -> usize {
        len.saturating_sub(self.window_span())
    }

    /// Embed a series into ℝ^(d+1)
    pub fn embed(&self, series: &[f64]) -> Result<PointCloud> {
        let span = self.window_span();
        if series.len() <= span {
            return Err(TdaError::InsufficientLength {
                needed: span.saturating_add(1),
                got: series.len(),
            });
        }

        let n_points = series.len() - span;
        let dim = self.dim_lag + 1;
        let points = Array2::from_shape_fn((n_points, dim), |(i, k)| {
            series[i + k * self.sample_lag]
        });

        Ok(PointCloud { points })
    }
}

/// Embed a time series with dimension lag `dim_lag` and sample lag `sample_lag`.
pub fn embed(series: &TimeSeries, dim_lag: usize, sample_lag: usize) -> Result<PointCloud> {
    TakensEmbedding::new(dim_lag, sample_lag)?.embed(series.values())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_embedding_shape() {
        let series = TimeSeries::new((0..20).map(|i| i as f64).collect());
        let cloud = embed(&series, 2, 3).unwrap();

        // 20 - 2*3 = 14 points in 3D
        assert_eq!(cloud.n_points(), 14);
        assert_eq!(cloud.dimension(), 3);

        // Point i = (x[i], x[i+3], x[i+6])
        assert_eq!(cloud.point(0).to_vec(), vec![0.0, 3.0, 6.0]);
        assert_eq!(cloud.point(13).to_vec(), vec![13.0, 16.0, 19.0]);
    }

    #[test]
    fn test_too_short() {
        let series = TimeSeries::new(vec![1.0; 6]);
        let err = embed(&series, 2, 3).unwrap_err();
        assert_eq!(err, TdaError::InsufficientLength { needed: 7, got: 6 });

        // One sample longer than the span gives a single point
        let series = TimeSeries::new(vec![1.0; 7]);
        assert_eq!(embed(&series, 2, 3).unwrap().n_points(), 1);
    }

    #[test]
    fn test_zero_lags_rejected() {
        let series = TimeSeries::new(vec![0.0; 10]);
        assert!(matches!(
            embed(&series, 0, 1),
            Err(TdaError::InvalidParameter(_))
        ));
        assert!(matches!(
            embed(&series, 1, 0),
            Err(TdaError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_distance_matrix() {
        let cloud = PointCloud::from_array(array![[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]]);
        let dm = cloud.distance_matrix();

        assert_relative_eq!(dm[[0, 1]], 5.0, epsilon = 1e-12);
        assert_relative_eq!(dm[[1, 0]], 5.0, epsilon = 1e-12);
        assert_relative_eq!(dm[[0, 2]], 1.0, epsilon = 1e-12);
        assert_eq!(dm[[2, 2]], 0.0);
    }

    #[test]
    fn test_points_for() {
        let emb = TakensEmbedding::new(3, 5).unwrap();
        assert_eq!(emb.window_span(), 15);
        assert_eq!(emb.points_for(100), 85);
        assert_eq!(emb.points_for(10), 0);
    }

    #[test]
    fn test_huge_lags_are_too_long() {
        let series = TimeSeries::new(vec![0.0; 10]);
        let err = embed(&series, usize::MAX / 2, 3).unwrap_err();
        assert_eq!(
            err,
            TdaError::InsufficientLength { needed: usize::MAX, got: 10 }
        );

        let emb = TakensEmbedding::new(1 << 62, 8).unwrap();
        assert_eq!(emb.window_span(), usize::MAX);
        assert_eq!(emb.points_for(1_000), 0);
        assert!(emb.embed(&[0.0; 1_000]).is_err());
    }
}
