//! Time series container.

use chrono::{DateTime, Utc};

use crate::error::{Result, TdaError};

/// Ordered real-valued samples, optionally timestamped.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    timestamps: Option<Vec<DateTime<Utc>>>,
}

impl TimeSeries {
    /// Create an untimestamped series.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            timestamps: None,
        }
    }

    /// Create a timestamped series. Both vectors must have the same length.
    pub fn with_timestamps(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(TdaError::DimensionMismatch {
                expected: values.len(),
                got: timestamps.len(),
            });
        }
        Ok(Self {
            values,
            timestamps: Some(timestamps),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn timestamps(&self) -> Option<&[DateTime<Utc>]> {
        self.timestamps.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Remove NaN and infinite samples together with their timestamps.
    pub fn drop_missing(&self) -> Self {
        let keep: Vec<usize> = self
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, _)| i)
            .collect();

        let values = keep.iter().map(|&i| self.values[i]).collect();
        let timestamps = self
            .timestamps
            .as_ref()
            .map(|ts| keep.iter().map(|&i| ts[i]).collect());

        Self { values, timestamps }
    }

    /// True if any sample is NaN or infinite.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }
}

impl From<Vec<f64>> for TimeSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for TimeSeries {
    fn from(values: &[f64]) -> Self {
        Self::new(values.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn monthly(n: usize) -> Vec<DateTime<Utc>> {
        let base = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        (0..n).map(|i| base + Duration::days(30 * i as i64)).collect()
    }

    #[test]
    fn timestamps_must_match_values() {
        let err = TimeSeries::with_timestamps(monthly(3), vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, TdaError::DimensionMismatch { expected: 2, got: 3 });
    }

    #[test]
    fn drop_missing_keeps_alignment() {
        let ts = monthly(5);
        let series =
            TimeSeries::with_timestamps(ts.clone(), vec![1.0, f64::NAN, 3.0, f64::INFINITY, 5.0])
                .unwrap();
        assert!(series.has_missing());

        let clean = series.drop_missing();
        assert_eq!(clean.values(), &[1.0, 3.0, 5.0]);
        assert_eq!(clean.timestamps().unwrap(), &[ts[0], ts[2], ts[4]]);
        assert!(!clean.has_missing());
    }

    #[test]
    fn drop_missing_without_timestamps() {
        let series = TimeSeries::new(vec![f64::NAN, 2.0]);
        let clean = series.drop_missing();
        assert_eq!(clean.len(), 1);
        assert!(clean.timestamps().is_none());
    }
}
