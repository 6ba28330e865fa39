use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ureq::Agent;

use crate::constants::estimator::{DEFAULT_TIMEOUT_SECS, USER_AGENT};
use crate::errors::ProbeError;
use crate::query::Query;
use crate::types::{SourceKey, UrlString};

/// Per-source match estimate returned by the estimator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEstimate {
    /// Number of matching items reported by this source.
    pub quantity: u64,
    /// Result URLs backing the reported quantity.
    #[serde(default)]
    pub urls: Vec<UrlString>,
}

/// Full estimator response keyed by source, in response order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorResult {
    /// Estimates keyed by source identifier.
    pub sources: IndexMap<SourceKey, SourceEstimate>,
}

impl EstimatorResult {
    /// Sum of `quantity` across every reporting source.
    pub fn total_quantity(&self) -> u64 {
        self.sources.values().map(|source| source.quantity).sum()
    }

    /// All result URLs across sources, in response order.
    pub fn all_urls(&self) -> impl Iterator<Item = &str> {
        self.sources
            .values()
            .flat_map(|source| source.urls.iter().map(String::as_str))
    }
}

/// Estimator-facing probe interface.
///
/// Implementations submit one query and return the parsed per-source
/// estimates. No retries at this layer; a failed call surfaces as a
/// probe failure handled at brand granularity.
pub trait Estimator {
    /// Submit `query` and return the parsed response.
    fn estimate(&self, query: &Query) -> Result<EstimatorResult, ProbeError>;
}

/// Blocking HTTP estimator client POSTing JSON query payloads.
pub struct HttpEstimator {
    endpoint: String,
    agent: Agent,
}

impl HttpEstimator {
    /// Create a client for `endpoint` with the default per-probe timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-probe timeout.
    ///
    /// A timed-out probe is reported as a transport failure.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .user_agent(USER_AGENT)
            .build();
        Self {
            endpoint: endpoint.into(),
            agent: config.new_agent(),
        }
    }

    /// Endpoint this client submits queries to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Estimator for HttpEstimator {
    fn estimate(&self, query: &Query) -> Result<EstimatorResult, ProbeError> {
        debug!(
            "[brandprobe:estimator] POST {} required={} optional={}",
            self.endpoint,
            query.required.len(),
            query.optional.as_ref().map(Vec::len).unwrap_or(0)
        );
        let response = self
            .agent
            .post(&self.endpoint)
            .send_json(query)
            .map_err(|err| ProbeError::Transport {
                endpoint: self.endpoint.clone(),
                reason: err.to_string(),
            })?;
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|err| ProbeError::Transport {
                endpoint: self.endpoint.clone(),
                reason: format!("failed reading response body: {err}"),
            })?;
        parse_estimator_response(&body)
    }
}

/// Parse an estimator response body.
///
/// A body without a `sources` mapping, or with a non-integer `quantity`,
/// is malformed and treated like a transport failure by the search layer.
pub fn parse_estimator_response(body: &str) -> Result<EstimatorResult, ProbeError> {
    serde_json::from_str(body).map_err(|err| ProbeError::MalformedResponse {
        details: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_response_sums_quantities_across_sources() {
        let body = r#"{
            "sources": {
                "shop_a": {"quantity": 3, "urls": ["https://a.example/gin"]},
                "shop_b": {"quantity": 2, "urls": []}
            }
        }"#;
        let result = parse_estimator_response(body).expect("parse");
        assert_eq!(result.total_quantity(), 5);
        let urls: Vec<&str> = result.all_urls().collect();
        assert_eq!(urls, vec!["https://a.example/gin"]);
    }

    #[test]
    fn parse_response_preserves_source_order() {
        let body = r#"{"sources": {"z": {"quantity": 1, "urls": ["u1"]}, "a": {"quantity": 1, "urls": ["u2"]}}}"#;
        let result = parse_estimator_response(body).expect("parse");
        let keys: Vec<&SourceKey> = result.sources.keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
        let urls: Vec<&str> = result.all_urls().collect();
        assert_eq!(urls, vec!["u1", "u2"]);
    }

    #[test]
    fn parse_response_rejects_missing_sources() {
        let err = parse_estimator_response(r#"{"total": 5}"#).expect_err("must fail");
        assert!(matches!(err, ProbeError::MalformedResponse { .. }));
        assert!(err.is_probe_failure());
    }

    #[test]
    fn parse_response_rejects_non_numeric_quantity() {
        let body = r#"{"sources": {"shop_a": {"quantity": "many", "urls": []}}}"#;
        let err = parse_estimator_response(body).expect_err("must fail");
        assert!(matches!(err, ProbeError::MalformedResponse { .. }));
    }

    #[test]
    fn parse_response_rejects_negative_quantity() {
        let body = r#"{"sources": {"shop_a": {"quantity": -1, "urls": []}}}"#;
        assert!(parse_estimator_response(body).is_err());
    }

    #[test]
    fn empty_sources_map_reports_zero_quantity() {
        let result = parse_estimator_response(r#"{"sources": {}}"#).expect("parse");
        assert_eq!(result.total_quantity(), 0);
        assert_eq!(result.all_urls().count(), 0);
    }
}
