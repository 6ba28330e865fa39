use serde::{Deserialize, Serialize};

use crate::constants::query::{
    NORMALIZATION_REPLACEMENT, NORMALIZED_PUNCTUATION, TOKEN_SEPARATOR,
};
use crate::types::{BrandName, Keyword};

/// Keyword matching strategy understood by the estimator.
///
/// The semantics are opaque to this crate beyond being a query field: `c`
/// is substring containment, `m` is word-boundary matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    /// Substring containment (`c`).
    #[serde(rename = "c")]
    Contains,
    /// Whole-word matching (`m`).
    #[serde(rename = "m")]
    Word,
}

impl MatchMode {
    /// Wire tag for this mode (`c` or `m`).
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Contains => "c",
            Self::Word => "m",
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One keyword clause entry tagged with its matching mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryKeyword {
    pub keyword: Keyword,
    pub mode: MatchMode,
}

impl QueryKeyword {
    /// Build a keyword entry.
    pub fn new(keyword: impl Into<Keyword>, mode: MatchMode) -> Self {
        Self {
            keyword: keyword.into(),
            mode,
        }
    }
}

/// Estimator query payload.
///
/// `optional` and `optional_threshold` are both present or both absent;
/// [`Query::with_optional_keywords`] is the only constructor for the pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub required: Vec<QueryKeyword>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<Vec<QueryKeyword>>,
    #[serde(
        rename = "optionalThreshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub optional_threshold: Option<u32>,
}

impl Query {
    /// Build a required-only query from a brand name.
    ///
    /// Apostrophes, colons, and periods are replaced by hyphens before the
    /// name is split on single spaces, so normalization never introduces
    /// extra tokens. Empty names are not validated and yield one empty
    /// keyword entry.
    pub fn build(name: &str, mode: MatchMode) -> Self {
        let required = normalize_brand_name(name)
            .split(TOKEN_SEPARATOR)
            .map(|token| QueryKeyword::new(token, mode))
            .collect();
        Self {
            required,
            optional: None,
            optional_threshold: None,
        }
    }

    /// Return this query augmented with an optional clause.
    ///
    /// Input keywords are not deduplicated; that is the caller's
    /// responsibility.
    pub fn with_optional_keywords(
        mut self,
        keywords: &[Keyword],
        mode: MatchMode,
        threshold: u32,
    ) -> Self {
        self.optional = Some(
            keywords
                .iter()
                .map(|keyword| QueryKeyword::new(keyword.clone(), mode))
                .collect(),
        );
        self.optional_threshold = Some(threshold);
        self
    }
}

/// Accepted per-brand query record emitted to the final results document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandQueryRecord {
    /// Brand name the query was discovered for.
    pub id: BrandName,
    /// Word-mode required clause.
    pub required: Vec<QueryKeyword>,
    /// Optional keywords confirmed by result-URL evidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<Vec<QueryKeyword>>,
    /// Last optional threshold that still returned matches.
    #[serde(
        rename = "optionalThreshold",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub optional_threshold: Option<u32>,
}

/// Replace normalized punctuation with hyphens, leaving spacing untouched.
pub fn normalize_brand_name(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if NORMALIZED_PUNCTUATION.contains(&ch) {
                NORMALIZATION_REPLACEMENT
            } else {
                ch
            }
        })
        .collect()
}
