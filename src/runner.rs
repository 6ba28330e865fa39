use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::catalog::{CategoryNode, load_catalog};
use crate::collector::QueryCollector;
use crate::config::RunConfig;
use crate::errors::ProbeError;
use crate::estimator::{Estimator, HttpEstimator};
use crate::evidence::{EvidenceSink, FsEvidenceWriter};
use crate::metrics::RunMetrics;
use crate::search::ThresholdSearch;
use crate::traversal::KeywordPropagator;

/// Summary of one completed discovery run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Wall-clock start of the run.
    pub started_at: DateTime<Utc>,
    /// Total run duration in seconds.
    pub elapsed_secs: f64,
    /// Aggregate traversal counters.
    pub metrics: RunMetrics,
    /// Records written to the results document.
    pub records_written: usize,
}

/// Execute a full discovery run from configuration.
///
/// Loads the catalog, resets the evidence directory, walks the taxonomy with
/// a blocking HTTP estimator, and writes the results document exactly once.
pub fn run(config: &RunConfig) -> Result<RunSummary, ProbeError> {
    let catalog = load_catalog(&config.catalog_path)?;
    let estimator = HttpEstimator::with_timeout(config.endpoint.clone(), config.timeout);
    let evidence = FsEvidenceWriter::create(&config.evidence_dir)?;
    run_with(&catalog, &estimator, &evidence, &config.results_path)
}

/// Execute a discovery run over preloaded inputs and explicit collaborators.
///
/// Split out from [`run`] so tests and embedders can substitute the
/// estimator and the evidence sink.
pub fn run_with(
    catalog: &[CategoryNode],
    estimator: &dyn Estimator,
    evidence: &dyn EvidenceSink,
    results_path: &Path,
) -> Result<RunSummary, ProbeError> {
    let started_at = Utc::now();
    let timer = Instant::now();
    info!(
        "[brandprobe:run] starting traversal of {} categor(ies) at {}",
        catalog.len(),
        started_at.to_rfc3339()
    );

    let propagator = KeywordPropagator::new(ThresholdSearch::new(estimator, evidence));
    let mut collector = QueryCollector::new();
    let metrics = propagator.walk(catalog, &mut collector)?;

    let records_written = collector.len();
    collector.into_results().write_to(results_path)?;

    let elapsed_secs = timer.elapsed().as_secs_f64();
    info!(
        "[brandprobe:run] finished in {elapsed_secs:.2}s ({})",
        metrics.summary_line()
    );
    Ok(RunSummary {
        started_at,
        elapsed_secs,
        metrics,
        records_written,
    })
}
