//! Pipeline execution.

use rayon::prelude::*;
use std::collections::BTreeMap;

use super::{FailurePolicy, PipelineConfig};
use crate::clustering::{Dendrogram, DistanceMatrix, LandscapeMatrix};
use crate::embedding::{TakensEmbedding, TimeSeries};
use crate::error::{Result, TdaError};
use crate::landscape::{LandscapeConfig, PersistenceLandscape};
use crate::topology::{PersistenceComputer, PersistenceDiagram, RipsPersistence};

/// Per-series artifacts
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesReport {
    /// Points in the delay embedding
    pub n_points: usize,
    pub diagram: PersistenceDiagram,
    pub landscape: PersistenceLandscape,
}

/// A series dropped under [`FailurePolicy::Exclude`]
#[derive(Debug, Clone, PartialEq)]
pub struct ExcludedSeries {
    pub label: String,
    pub error: TdaError,
}

/// Result of a full run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub landscapes: LandscapeMatrix,
    pub distances: DistanceMatrix,
    pub dendrogram: Dendrogram,
    pub reports: BTreeMap<String, SeriesReport>,
    pub excluded: Vec<ExcludedSeries>,
}

/// Embedding → persistence → landscape → clustering over labelled series
#[derive(Debug, Clone)]
pub struct Pipeline<C = RipsPersistence> {
    config: PipelineConfig,
    takens: TakensEmbedding,
    landscape: LandscapeConfig,
    computer: C,
}

impl Pipeline<RipsPersistence> {
    /// Pipeline using the bundled Vietoris-Rips persistence
    pub fn new(config: PipelineConfig) -> Result<Self> {
        Self::with_computer(config, RipsPersistence)
    }
}

impl<C: PersistenceComputer> Pipeline<C> {
    /// Pipeline using a custom persistence routine
    pub fn with_computer(config: PipelineConfig, computer: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            takens: config.takens()?,
            landscape: config.landscape_config(),
            config,
            computer,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the per-series stages on one series
    pub fn process(&self, series: &TimeSeries) -> Result<SeriesReport> {
        let cleaned;
        let series = if series.has_missing() {
            if !self.config.drop_missing {
                return Err(TdaError::InvalidParameter(
                    "series contains missing values".to_string(),
                ));
            }
            cleaned = series.drop_missing();
            &cleaned
        } else {
            series
        };

        let cloud = self.takens.embed(series.values())?;
        let diagram = self.computer.compute(
            &cloud,
            self.config.max_homology_dimension,
            self.config.distance_threshold,
        )?;
        let landscape = PersistenceLandscape::from_diagram(&diagram, &self.landscape)?;

        Ok(SeriesReport {
            n_points: cloud.n_points(),
            diagram,
            landscape,
        })
    }

    /// Process every series in parallel and apply the failure policy.
    ///
    /// Under `Abort` the error of the first failing label (in sorted order)
    /// is returned.
    pub fn process_all(
        &self,
        series: &BTreeMap<String, TimeSeries>,
    ) -> Result<(BTreeMap<String, SeriesReport>, Vec<ExcludedSeries>)> {
        let entries: Vec<(&String, &TimeSeries)> = series.iter().collect();
        let results: Vec<(&String, Result<SeriesReport>)> = entries
            .par_iter()
            .map(|&(label, s)| (label, self.process(s)))
            .collect();

        let mut reports = BTreeMap::new();
        let mut excluded = Vec::new();
        for (label, result) in results {
            match result {
                Ok(report) => {
                    tracing::debug!(
                        series = %label,
                        points = report.n_points,
                        pairs = report.diagram.pairs().len(),
                        h1_pairs = report.diagram.count(1),
                        peak = report.landscape.peak(),
                        "Computed landscape"
                    );
                    reports.insert(label.clone(), report);
                }
                Err(error) => match self.config.failure_policy {
                    FailurePolicy::Abort => return Err(error.for_series(label.as_str())),
                    FailurePolicy::Exclude => {
                        tracing::warn!(series = %label, error = %error, "Excluding series");
                        excluded.push(ExcludedSeries {
                            label: label.clone(),
                            error,
                        });
                    }
                },
            }
        }

        Ok((reports, excluded))
    }

    /// Full run: landscapes for every series, then distances and dendrogram
    pub fn run(&self, series: &BTreeMap<String, TimeSeries>) -> Result<PipelineOutput> {
        if series.is_empty() {
            return Err(TdaError::EmptyInput);
        }

        let (reports, excluded) = self.process_all(series)?;
        let landscapes: BTreeMap<String, &PersistenceLandscape> = reports
            .iter()
            .map(|(label, report)| (label.clone(), &report.landscape))
            .collect();

        let clustering = self.config.clusterer().analyze(&landscapes)?;

        tracing::info!(
            series = series.len(),
            clustered = reports.len(),
            excluded = excluded.len(),
            dim_lag = self.config.dim_lag,
            sample_lag = self.config.sample_lag,
            threshold = self.config.distance_threshold,
            linkage = ?self.config.linkage,
            "Pipeline run complete"
        );

        Ok(PipelineOutput {
            landscapes: clustering.landscapes,
            distances: clustering.distances,
            dendrogram: clustering.dendrogram,
            reports,
            excluded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::PointCloud;
    use crate::topology::PersistencePair;

    fn sine(len: usize, period: f64) -> TimeSeries {
        TimeSeries::new(
            (0..len)
                .map(|t| (2.0 * std::f64::consts::PI * t as f64 / period).sin())
                .collect(),
        )
    }

    fn small_config() -> PipelineConfig {
        PipelineConfig::default()
            .embedding(1, 3)
            .distance_threshold(2.5)
            .landscape_resolution(50)
    }

    #[test]
    fn process_reports_shapes() {
        let pipeline = Pipeline::new(small_config()).unwrap();
        let report = pipeline.process(&sine(40, 12.0)).unwrap();
        assert_eq!(report.n_points, 37);
        assert_eq!(report.landscape.len(), 50);
        assert!(report.diagram.count(1) >= 1);
    }

    #[test]
    fn missing_values_rejected_unless_dropped() {
        let mut values = sine(40, 12.0).values().to_vec();
        values[5] = f64::NAN;
        let series = TimeSeries::new(values);

        let strict = Pipeline::new(small_config()).unwrap();
        assert!(matches!(
            strict.process(&series),
            Err(TdaError::InvalidParameter(_))
        ));

        let lenient = Pipeline::new(small_config().drop_missing(true)).unwrap();
        assert_eq!(lenient.process(&series).unwrap().n_points, 36);
    }

    #[test]
    fn abort_reports_first_failing_label() {
        let mut input = BTreeMap::new();
        input.insert("a_short".to_string(), TimeSeries::new(vec![1.0, 2.0]));
        input.insert("b_sine".to_string(), sine(40, 12.0));
        input.insert("c_short".to_string(), TimeSeries::new(vec![1.0]));

        let pipeline = Pipeline::new(small_config()).unwrap();
        match pipeline.run(&input).unwrap_err() {
            TdaError::Series { label, source } => {
                assert_eq!(label, "a_short");
                assert_eq!(*source, TdaError::InsufficientLength { needed: 4, got: 2 });
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn exclude_drops_failing_series() {
        let mut input = BTreeMap::new();
        input.insert("short".to_string(), TimeSeries::new(vec![1.0, 2.0]));
        input.insert("sine_a".to_string(), sine(40, 12.0));
        input.insert("sine_b".to_string(), sine(40, 10.0));

        let pipeline =
            Pipeline::new(small_config().failure_policy(FailurePolicy::Exclude)).unwrap();
        let output = pipeline.run(&input).unwrap();

        assert_eq!(output.excluded.len(), 1);
        assert_eq!(output.excluded[0].label, "short");
        assert_eq!(output.dendrogram.n_leaves(), 2);
        assert_eq!(output.distances.labels(), &["sine_a".to_string(), "sine_b".to_string()]);
    }

    #[test]
    fn empty_input_rejected() {
        let pipeline = Pipeline::new(small_config()).unwrap();
        assert_eq!(
            pipeline.run(&BTreeMap::new()).unwrap_err(),
            TdaError::EmptyInput
        );
    }

    /// Persistence routine that reports a single fixed loop
    struct FixedLoop;

    impl PersistenceComputer for FixedLoop {
        fn compute(
            &self,
            _cloud: &PointCloud,
            _max_dimension: usize,
            distance_threshold: f64,
        ) -> Result<PersistenceDiagram> {
            Ok(PersistenceDiagram::from_pairs(
                [PersistencePair::new(1, 0.5, 1.5)],
                distance_threshold,
            ))
        }
    }

    #[test]
    fn custom_computer_is_used() {
        let pipeline = Pipeline::with_computer(small_config(), FixedLoop).unwrap();
        let report = pipeline.process(&sine(40, 12.0)).unwrap();
        assert_eq!(report.diagram.count(1), 1);
        assert!((report.landscape.peak() - 0.5).abs() < 0.05);
    }
}
