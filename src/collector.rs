use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ProbeError;
use crate::query::BrandQueryRecord;

/// Ordered aggregation of accepted per-brand query records.
///
/// Records arrive in traversal order and are emitted exactly once, wrapped
/// as `{"results": [...]}`, after traversal completes.
#[derive(Debug, Default)]
pub struct QueryCollector {
    records: Vec<BrandQueryRecord>,
}

impl QueryCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accepted record in traversal order.
    pub fn push(&mut self, record: BrandQueryRecord) {
        self.records.push(record);
    }

    /// Number of collected records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Wrap the collected records for final serialization, consuming the
    /// collector so nothing can be appended after emission.
    pub fn into_results(self) -> RunResults {
        RunResults {
            results: self.records,
        }
    }
}

/// Final output document written once per run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResults {
    /// Accepted records in traversal order.
    pub results: Vec<BrandQueryRecord>,
}

impl RunResults {
    /// Write the document as pretty-printed JSON.
    pub fn write_to(&self, path: &Path) -> Result<(), ProbeError> {
        let raw = serde_json::to_vec_pretty(self).map_err(|err| {
            ProbeError::Evidence(format!("failed encoding results document: {err}"))
        })?;
        fs::write(path, raw)?;
        info!(
            "[brandprobe:collector] wrote {} record(s) to {}",
            self.results.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{MatchMode, QueryKeyword};

    fn record(id: &str) -> BrandQueryRecord {
        BrandQueryRecord {
            id: id.to_string(),
            required: vec![QueryKeyword::new(id, MatchMode::Word)],
            optional: Some(vec![QueryKeyword::new("juniper", MatchMode::Word)]),
            optional_threshold: Some(1),
        }
    }

    #[test]
    fn collector_preserves_append_order() {
        let mut collector = QueryCollector::new();
        assert!(collector.is_empty());
        collector.push(record("Bombay"));
        collector.push(record("Hendrick-s"));
        assert_eq!(collector.len(), 2);

        let results = collector.into_results();
        let ids: Vec<&str> = results
            .results
            .iter()
            .map(|entry| entry.id.as_str())
            .collect();
        assert_eq!(ids, vec!["Bombay", "Hendrick-s"]);
    }

    #[test]
    fn results_document_wraps_records_under_results_key() {
        let mut collector = QueryCollector::new();
        collector.push(record("Bombay"));
        let value = serde_json::to_value(collector.into_results()).expect("serialize");
        assert!(value["results"].is_array());
        assert_eq!(value["results"][0]["id"], "Bombay");
    }
}
