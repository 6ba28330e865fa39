#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Taxonomy catalog types and JSON loading.
pub mod catalog;
/// Ordered aggregation of accepted query records and final output document.
pub mod collector;
/// Run configuration types.
pub mod config;
/// Centralized constants used across query building, search, and output.
pub mod constants;
/// Estimator probe interface and blocking HTTP client.
pub mod estimator;
/// Evidence persistence for accepted probe responses.
pub mod evidence;
/// Catalog construction from spreadsheet-style brand listings.
pub mod ingestion;
/// Aggregate run metrics helpers.
pub mod metrics;
/// Query payload types and brand-name query building.
pub mod query;
/// End-to-end run orchestration.
pub mod runner;
/// Adaptive threshold search over optional keywords.
pub mod search;
/// Depth-first taxonomy traversal with keyword propagation.
pub mod traversal;
/// Shared type aliases.
pub mod types;

mod errors;

pub use catalog::{CategoryNode, TypeNode, load_catalog, parse_catalog};
pub use collector::{QueryCollector, RunResults};
pub use config::RunConfig;
pub use errors::ProbeError;
pub use estimator::{Estimator, EstimatorResult, HttpEstimator, SourceEstimate};
pub use evidence::{EvidenceSink, FsEvidenceWriter, NullEvidenceSink};
pub use metrics::RunMetrics;
pub use query::{BrandQueryRecord, MatchMode, Query, QueryKeyword};
pub use runner::{RunSummary, run};
pub use search::{BrandOutcome, ProbeOutcome, ThresholdSearch};
pub use traversal::KeywordPropagator;
pub use types::{BrandName, Keyword, NodeName, SourceKey, UrlString};
