use std::io;

use thiserror::Error;

/// Error type for catalog loading, estimator transport, and persistence failures.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("catalog input is malformed or unreadable: {0}")]
    Catalog(String),
    #[error("estimator request to '{endpoint}' failed: {reason}")]
    Transport { endpoint: String, reason: String },
    #[error("estimator returned a malformed response: {details}")]
    MalformedResponse { details: String },
    #[error("evidence output failure: {0}")]
    Evidence(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ProbeError {
    /// True for failures contained at brand granularity (probe transport/decode).
    ///
    /// Everything else escalates to the run level.
    pub fn is_probe_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::MalformedResponse { .. }
        )
    }
}
