use regex::RegexBuilder;
use tracing::info;

use crate::constants::search::INITIAL_OPTIONAL_THRESHOLD;
use crate::errors::ProbeError;
use crate::estimator::{Estimator, EstimatorResult};
use crate::evidence::EvidenceSink;
use crate::query::{BrandQueryRecord, MatchMode, Query, QueryKeyword};
use crate::types::{Keyword, UrlString};

/// Outcome of a single estimator probe.
///
/// Transport and decode failures travel on the `Err` channel of the
/// surrounding `Result`, completing the success/empty/failure triad.
#[derive(Clone, Debug)]
pub enum ProbeOutcome {
    /// The probe matched; carries the summed quantity and the raw response.
    Success {
        total_quantity: u64,
        result: EstimatorResult,
    },
    /// The probe completed but matched nothing.
    Empty,
}

/// Terminal outcome of the per-brand query search.
#[derive(Clone, Debug, PartialEq)]
pub enum BrandOutcome {
    /// The bare contains-mode query matched nothing; no record, no evidence.
    NotFound,
    /// Only a required clause survived; not emitted to the final output.
    RequiredOnly(Vec<QueryKeyword>),
    /// Optional refinement succeeded and produced an output record.
    Accepted(BrandQueryRecord),
}

/// Per-brand adaptive query search against an estimator.
///
/// Escalates from bare contains-mode matching to an evidence-refined
/// optional-keyword query: contains probe, word probe, linear threshold
/// expansion over inherited candidate keywords, then URL-evidence
/// refinement of the surviving optional set.
pub struct ThresholdSearch<'a> {
    estimator: &'a dyn Estimator,
    evidence: &'a dyn EvidenceSink,
}

impl<'a> ThresholdSearch<'a> {
    /// Create a search over `estimator`, persisting accepted raw responses
    /// into `evidence`.
    pub fn new(estimator: &'a dyn Estimator, evidence: &'a dyn EvidenceSink) -> Self {
        Self {
            estimator,
            evidence,
        }
    }

    /// Run the full state machine for one brand.
    ///
    /// `candidates` is the deduplicated keyword set inherited from ancestor
    /// taxonomy nodes. Probe failures abort this brand only and surface as
    /// `Err`; the caller decides containment.
    pub fn run(&self, brand: &str, candidates: &[Keyword]) -> Result<BrandOutcome, ProbeError> {
        let contains = Query::build(brand, MatchMode::Contains);
        let ProbeOutcome::Success { .. } = self.probe(brand, &contains)? else {
            return Ok(BrandOutcome::NotFound);
        };

        let word = Query::build(brand, MatchMode::Word);
        let ProbeOutcome::Success { .. } = self.probe(brand, &word)? else {
            return Ok(BrandOutcome::RequiredOnly(contains.required));
        };

        self.expand_optional(brand, word, candidates)
    }

    /// Linear forward scan over the optional threshold, then URL-evidence
    /// refinement of the candidate keyword set.
    ///
    /// The quantity/threshold relation is not monotone enough to bisect;
    /// the scan stops at the first empty probe.
    fn expand_optional(
        &self,
        brand: &str,
        word_query: Query,
        candidates: &[Keyword],
    ) -> Result<BrandOutcome, ProbeError> {
        let required = word_query.required.clone();
        let mut query = word_query.with_optional_keywords(
            candidates,
            MatchMode::Word,
            INITIAL_OPTIONAL_THRESHOLD,
        );
        let mut threshold = INITIAL_OPTIONAL_THRESHOLD;
        let mut last_good: Option<u32> = None;
        let mut evidence_urls: Vec<UrlString> = Vec::new();

        loop {
            match self.probe(brand, &query)? {
                ProbeOutcome::Success { result, .. } => {
                    last_good = Some(threshold);
                    evidence_urls.extend(result.all_urls().map(str::to_string));
                    threshold += 1;
                    query.optional_threshold = Some(threshold);
                }
                ProbeOutcome::Empty => break,
            }
        }

        let Some(threshold) = last_good else {
            return Ok(BrandOutcome::RequiredOnly(required));
        };

        let confirmed = confirmed_keywords(&evidence_urls, candidates);
        info!(
            "[brandprobe:search] '{brand}' accepted at threshold {threshold} with {}/{} confirmed keyword(s)",
            confirmed.len(),
            candidates.len()
        );
        Ok(BrandOutcome::Accepted(BrandQueryRecord {
            id: brand.to_string(),
            required,
            optional: Some(
                confirmed
                    .into_iter()
                    .map(|keyword| QueryKeyword::new(keyword, MatchMode::Word))
                    .collect(),
            ),
            optional_threshold: Some(threshold),
        }))
    }

    /// Issue one probe, log the outcome, and persist evidence for nonzero
    /// probes that carry an optional clause.
    fn probe(&self, brand: &str, query: &Query) -> Result<ProbeOutcome, ProbeError> {
        let result = self.estimator.estimate(query)?;
        let total_quantity = result.total_quantity();
        let mode = query
            .required
            .first()
            .map(|entry| entry.mode)
            .unwrap_or(MatchMode::Contains);
        let threshold_info = query
            .optional_threshold
            .map(|value| format!(" optionalThreshold={value}"))
            .unwrap_or_default();

        if total_quantity == 0 {
            info!("[brandprobe:search] '{brand}' was NOT found (mode {mode}{threshold_info})");
            return Ok(ProbeOutcome::Empty);
        }
        info!(
            "[brandprobe:search] '{brand}' was found (mode {mode}{threshold_info}): total quantity {total_quantity}"
        );
        if query.optional.is_some() {
            self.evidence.record(brand, &result)?;
        }
        Ok(ProbeOutcome::Success {
            total_quantity,
            result,
        })
    }
}

/// Candidate keywords confirmed as a whole word (case-insensitive) in at
/// least one URL, preserving candidate order.
pub fn confirmed_keywords(urls: &[UrlString], candidates: &[Keyword]) -> Vec<Keyword> {
    candidates
        .iter()
        .filter(|keyword| keyword_confirmed(keyword, urls))
        .cloned()
        .collect()
}

fn keyword_confirmed(keyword: &str, urls: &[UrlString]) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(keyword));
    // Escaped literals always compile; an unbuildable pattern counts as unconfirmed.
    let Ok(matcher) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        return false;
    };
    urls.iter().any(|url| matcher.is_match(url))
}
