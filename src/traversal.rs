use indexmap::IndexSet;
use tracing::warn;

use crate::catalog::{CategoryNode, TypeNode};
use crate::collector::QueryCollector;
use crate::errors::ProbeError;
use crate::metrics::RunMetrics;
use crate::search::{BrandOutcome, ThresholdSearch};
use crate::types::Keyword;

/// Depth-first taxonomy walker accumulating ancestor keyword sets.
///
/// Keyword accumulation is copy-on-branch: every child receives its own
/// cloned set, so sibling subtrees never alias and brand-level processing
/// stays free of shared mutable state. Sets are `IndexSet`s, giving
/// order-preserving, first-occurrence-wins deduplication.
pub struct KeywordPropagator<'a> {
    search: ThresholdSearch<'a>,
}

impl<'a> KeywordPropagator<'a> {
    /// Create a propagator driving `search` for every brand leaf.
    pub fn new(search: ThresholdSearch<'a>) -> Self {
        Self { search }
    }

    /// Walk every category in catalog order, feeding accepted records into
    /// `collector` and returning aggregate metrics.
    ///
    /// Probe failures are contained per brand: logged, counted, and the walk
    /// continues. Any other error aborts the run.
    pub fn walk(
        &self,
        catalog: &[CategoryNode],
        collector: &mut QueryCollector,
    ) -> Result<RunMetrics, ProbeError> {
        let mut metrics = RunMetrics::default();
        for category in catalog {
            self.visit_category(category, &IndexSet::new(), collector, &mut metrics)?;
        }
        Ok(metrics)
    }

    fn visit_category(
        &self,
        category: &CategoryNode,
        inherited: &IndexSet<Keyword>,
        collector: &mut QueryCollector,
        metrics: &mut RunMetrics,
    ) -> Result<(), ProbeError> {
        for child in &category.children {
            let mut child_inherited = inherited.clone();
            // Category-level general keywords join only at the first level
            // below the category root.
            if inherited.is_empty() {
                child_inherited.extend(category.keywords.iter().cloned());
            }
            child_inherited.extend(child.keywords.iter().cloned());
            self.visit_type(child, &child_inherited, collector, metrics)?;
        }
        Ok(())
    }

    fn visit_type(
        &self,
        node: &TypeNode,
        inherited: &IndexSet<Keyword>,
        collector: &mut QueryCollector,
        metrics: &mut RunMetrics,
    ) -> Result<(), ProbeError> {
        let mut candidate_set = inherited.clone();
        candidate_set.extend(node.keywords.iter().cloned());
        let candidates: Vec<Keyword> = candidate_set.into_iter().collect();

        for brand in &node.brands {
            metrics.brands_visited += 1;
            match self.search.run(brand, &candidates) {
                Ok(BrandOutcome::Accepted(record)) => {
                    metrics.accepted += 1;
                    collector.push(record);
                }
                Ok(BrandOutcome::RequiredOnly(_)) => metrics.required_only += 1,
                Ok(BrandOutcome::NotFound) => metrics.not_found += 1,
                Err(err) if err.is_probe_failure() => {
                    warn!(
                        "[brandprobe:walk] probe failed for brand '{brand}': {err}; continuing with next brand"
                    );
                    metrics.probe_failures += 1;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_catalog;
    use crate::errors::ProbeError;
    use crate::estimator::{Estimator, EstimatorResult};
    use crate::evidence::NullEvidenceSink;
    use crate::query::Query;
    use std::sync::Mutex;

    /// Estimator that records the optional clause of every expansion probe
    /// and reports everything as unmatched past the word stage.
    struct RecordingEstimator {
        optional_sets: Mutex<Vec<Vec<Keyword>>>,
    }

    impl RecordingEstimator {
        fn new() -> Self {
            Self {
                optional_sets: Mutex::new(Vec::new()),
            }
        }
    }

    impl Estimator for RecordingEstimator {
        fn estimate(&self, query: &Query) -> Result<EstimatorResult, ProbeError> {
            if let Some(optional) = &query.optional {
                self.optional_sets
                    .lock()
                    .expect("lock")
                    .push(optional.iter().map(|entry| entry.keyword.clone()).collect());
                // Empty at threshold 1 keeps the walk moving while still
                // exposing the candidate set that reached the estimator.
                return crate::estimator::parse_estimator_response(r#"{"sources": {}}"#);
            }
            crate::estimator::parse_estimator_response(
                r#"{"sources": {"stub": {"quantity": 1, "urls": []}}}"#,
            )
        }
    }

    fn walk_catalog(raw: &str) -> Vec<Vec<Keyword>> {
        let catalog = parse_catalog(raw).expect("catalog");
        let estimator = RecordingEstimator::new();
        let sink = NullEvidenceSink;
        let propagator = KeywordPropagator::new(ThresholdSearch::new(&estimator, &sink));
        let mut collector = QueryCollector::new();
        propagator.walk(&catalog, &mut collector).expect("walk");
        estimator.optional_sets.into_inner().expect("lock")
    }

    #[test]
    fn candidate_sets_deduplicate_first_seen_order() {
        let sets = walk_catalog(
            r#"[{
                "name": "distilled",
                "keywords": ["alcohol", "juniper"],
                "children": [
                    {"name": "gin", "keywords": ["juniper", "botanical"], "brands": ["Bombay"]}
                ]
            }]"#,
        );
        assert_eq!(sets, vec![vec!["alcohol", "juniper", "botanical"]]);
    }

    #[test]
    fn sibling_subtrees_get_independent_keyword_sets() {
        let sets = walk_catalog(
            r#"[{
                "name": "distilled",
                "keywords": ["alcohol"],
                "children": [
                    {"name": "gin", "keywords": ["juniper"], "brands": ["Bombay"]},
                    {"name": "rum", "keywords": ["cane"], "brands": ["Havana"]}
                ]
            }]"#,
        );
        // The gin branch's keywords never leak into the rum branch.
        assert_eq!(
            sets,
            vec![
                vec!["alcohol", "juniper"],
                vec!["alcohol", "cane"],
            ]
        );
    }

    #[test]
    fn categories_with_empty_keywords_still_propagate_type_keywords() {
        let sets = walk_catalog(
            r#"[{
                "name": "fermented",
                "keywords": [],
                "children": [
                    {"name": "sake", "keywords": ["rice"], "brands": ["Gekkeikan"]}
                ]
            }]"#,
        );
        assert_eq!(sets, vec![vec!["rice"]]);
    }
}
