//! Labelled N×R matrix of landscape vectors.

use ndarray::{Array2, ArrayView1};

use crate::error::{Result, TdaError};

/// Landscape vectors stacked as rows, labels in sorted order
#[derive(Debug, Clone, PartialEq)]
pub struct LandscapeMatrix {
    labels: Vec<String>,
    data: Array2<f64>,
}

impl LandscapeMatrix {
    /// Stack labelled vectors into a matrix.
    ///
    /// Rows are sorted by label. Every vector must have the length of the
    /// first one (in label order).
    pub fn from_rows<I, L, V>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<String>,
        V: AsRef<[f64]>,
    {
        let mut rows: Vec<(String, V)> = rows.into_iter().map(|(l, v)| (l.into(), v)).collect();
        if rows.is_empty() {
            return Err(TdaError::EmptyInput);
        }
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        if let Some(dup) = rows.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(TdaError::InvalidParameter(format!(
                "duplicate series label '{}'",
                dup[0].0
            )));
        }

        let width = rows[0].1.as_ref().len();
        if let Some((_, v)) = rows.iter().find(|(_, v)| v.as_ref().len() != width) {
            return Err(TdaError::DimensionMismatch {
                expected: width,
                got: v.as_ref().len(),
            });
        }

        let mut data = Array2::<f64>::zeros((rows.len(), width));
        for (i, (_, v)) in rows.iter().enumerate() {
            for (j, &x) in v.as_ref().iter().enumerate() {
                data[[i, j]] = x;
            }
        }

        let labels = rows.into_iter().map(|(l, _)| l).collect();
        Ok(Self { labels, data })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Number of series N
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Landscape length R
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.data.row(i)
    }

    /// Row of the given label
    pub fn get(&self, label: &str) -> Option<ArrayView1<'_, f64>> {
        self.index_of(label).map(|i| self.data.row(i))
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.binary_search_by(|l| l.as_str().cmp(label)).ok()
    }
}
