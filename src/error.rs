//! Error types for the topological clustering pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, TdaError>;

/// Errors raised by the embedding, persistence, landscape and clustering stages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TdaError {
    /// Series too short for the chosen embedding lags.
    #[error("insufficient length: need at least {needed} samples, got {got}")]
    InsufficientLength { needed: usize, got: usize },

    /// Fewer than two points reached the homology computation.
    #[error("degenerate point cloud: need at least 2 points, got {points}")]
    DegenerateCloud { points: usize },

    /// Vectors or columns of unequal length.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Unsupported distance metric or linkage combination.
    #[error("invalid metric: {0}")]
    InvalidMetric(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Nothing to cluster.
    #[error("empty input: no series to process")]
    EmptyInput,

    /// A single series failed inside a batch run.
    #[error("series '{label}' failed: {source}")]
    Series {
        label: String,
        #[source]
        source: Box<TdaError>,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl TdaError {
    /// Wrap this error with the label of the series that produced it.
    pub fn for_series(self, label: impl Into<String>) -> Self {
        TdaError::Series {
            label: label.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = TdaError::InsufficientLength { needed: 16, got: 10 };
        assert_eq!(
            err.to_string(),
            "insufficient length: need at least 16 samples, got 10"
        );

        let err = TdaError::DegenerateCloud { points: 1 };
        assert_eq!(
            err.to_string(),
            "degenerate point cloud: need at least 2 points, got 1"
        );

        let err = TdaError::DimensionMismatch {
            expected: 500,
            got: 499,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 500, got 499");

        let err = TdaError::InvalidMetric("minkowski p must be >= 1".to_string());
        assert_eq!(err.to_string(), "invalid metric: minkowski p must be >= 1");
    }

    #[test]
    fn series_wrapper_keeps_source() {
        let err = TdaError::DegenerateCloud { points: 0 }.for_series("cpi");
        match &err {
            TdaError::Series { label, source } => {
                assert_eq!(label, "cpi");
                assert_eq!(**source, TdaError::DegenerateCloud { points: 0 });
            }
            other => panic!("unexpected variant: {other:?}"),
        }
        assert!(err.to_string().starts_with("series 'cpi' failed"));
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = TdaError::EmptyInput;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
