use std::path::PathBuf;
use std::time::Duration;

use crate::constants::estimator::DEFAULT_TIMEOUT_SECS;
use crate::constants::output::{
    DEFAULT_CATALOG_FILE, DEFAULT_EVIDENCE_DIR, DEFAULT_RESULTS_FILE,
};

/// Top-level run configuration.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Estimator endpoint receiving query POSTs.
    pub endpoint: String,
    /// Per-probe timeout; a timeout is treated as a transport failure.
    pub timeout: Duration,
    /// Path of the catalog input document.
    pub catalog_path: PathBuf,
    /// Directory for per-brand evidence files, cleared at run start.
    pub evidence_dir: PathBuf,
    /// Path of the final results document.
    pub results_path: PathBuf,
}

impl RunConfig {
    /// Create a configuration for `endpoint` with default paths and timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            evidence_dir: PathBuf::from(DEFAULT_EVIDENCE_DIR),
            results_path: PathBuf::from(DEFAULT_RESULTS_FILE),
        }
    }

    /// Override the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the catalog input path.
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    /// Override the evidence directory.
    pub fn with_evidence_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.evidence_dir = dir.into();
        self
    }

    /// Override the results document path.
    pub fn with_results_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.results_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_defaults_around_the_endpoint() {
        let config = RunConfig::new("http://localhost:8080/estimate");
        assert_eq!(config.endpoint, "http://localhost:8080/estimate");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.catalog_path, PathBuf::from("alcohols.json"));
        assert_eq!(config.evidence_dir, PathBuf::from("output"));
        assert_eq!(config.results_path, PathBuf::from("queries.json"));
    }

    #[test]
    fn builder_setters_override_fields() {
        let config = RunConfig::new("http://e")
            .with_timeout(Duration::from_secs(5))
            .with_catalog_path("cat.json")
            .with_evidence_dir("ev")
            .with_results_path("out.json");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.catalog_path, PathBuf::from("cat.json"));
        assert_eq!(config.evidence_dir, PathBuf::from("ev"));
        assert_eq!(config.results_path, PathBuf::from("out.json"));
    }
}
