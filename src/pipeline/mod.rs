//! Pipeline Module: Series → Landscape → Dendrogram
//!
//! Runs the same sequence for every labelled series
//!
//! ```text
//! series ─▶ embed ─▶ Vietoris-Rips persistence ─▶ landscape ─┐
//! series ─▶ embed ─▶ Vietoris-Rips persistence ─▶ landscape ─┼─▶ distances ─▶ dendrogram
//! series ─▶ embed ─▶ Vietoris-Rips persistence ─▶ landscape ─┘
//! ```
//!
//! The per-series stages are independent and run in parallel; clustering
//! starts once every landscape has been collected.

mod config;
mod runner;

pub use config::{FailurePolicy, PipelineConfig};
pub use runner::{ExcludedSeries, Pipeline, PipelineOutput, SeriesReport};
