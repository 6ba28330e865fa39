/// Aggregate per-run traversal counters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Brands visited by the traversal.
    pub brands_visited: usize,
    /// Brands that produced an accepted output record.
    pub accepted: usize,
    /// Brands that matched only on the required clause.
    pub required_only: usize,
    /// Brands whose bare contains-mode query matched nothing.
    pub not_found: usize,
    /// Brands skipped because a probe failed in transit or decode.
    pub probe_failures: usize,
}

impl RunMetrics {
    /// Brands that terminated without an output record.
    pub fn without_record(&self) -> usize {
        self.required_only + self.not_found + self.probe_failures
    }

    /// One-line human-readable summary for run logs.
    pub fn summary_line(&self) -> String {
        format!(
            "visited={} accepted={} required_only={} not_found={} probe_failures={}",
            self.brands_visited,
            self.accepted,
            self.required_only,
            self.not_found,
            self.probe_failures
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_record_sums_non_accepted_outcomes() {
        let metrics = RunMetrics {
            brands_visited: 10,
            accepted: 4,
            required_only: 3,
            not_found: 2,
            probe_failures: 1,
        };
        assert_eq!(metrics.without_record(), 6);
        assert_eq!(metrics.without_record() + metrics.accepted, metrics.brands_visited);
    }

    #[test]
    fn summary_line_reports_every_counter() {
        let metrics = RunMetrics {
            brands_visited: 2,
            accepted: 1,
            required_only: 1,
            ..RunMetrics::default()
        };
        let line = metrics.summary_line();
        assert!(line.contains("visited=2"));
        assert!(line.contains("accepted=1"));
        assert!(line.contains("probe_failures=0"));
    }
}
