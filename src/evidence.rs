use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::constants::output::EVIDENCE_EXTENSION;
use crate::errors::ProbeError;
use crate::estimator::EstimatorResult;

/// Sink for raw estimator responses accepted as query evidence.
///
/// The search layer hands over the raw response of every nonzero probe that
/// carries an optional clause; later successes for the same brand overwrite
/// earlier ones, leaving the last accepted response persisted.
pub trait EvidenceSink {
    /// Persist the raw response backing an accepted probe for `brand`.
    fn record(&self, brand: &str, result: &EstimatorResult) -> Result<(), ProbeError>;
}

/// Evidence sink that drops every response (tests, dry runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEvidenceSink;

impl EvidenceSink for NullEvidenceSink {
    fn record(&self, _brand: &str, _result: &EstimatorResult) -> Result<(), ProbeError> {
        Ok(())
    }
}

/// Filesystem evidence writer persisting one pretty-printed JSON file per brand.
pub struct FsEvidenceWriter {
    root: PathBuf,
}

impl FsEvidenceWriter {
    /// Create a writer rooted at `root`, creating the directory and clearing
    /// stale evidence files from previous runs.
    ///
    /// The reset is idempotent: an existing empty directory is left as-is,
    /// subdirectories are never touched.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, ProbeError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| {
            ProbeError::Evidence(format!(
                "failed creating evidence dir {}: {err}",
                root.display()
            ))
        })?;
        let entries = fs::read_dir(&root).map_err(|err| {
            ProbeError::Evidence(format!(
                "failed listing evidence dir {}: {err}",
                root.display()
            ))
        })?;
        let mut cleared = 0usize;
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if path.is_file() {
                fs::remove_file(&path).map_err(|err| {
                    ProbeError::Evidence(format!(
                        "failed clearing stale evidence {}: {err}",
                        path.display()
                    ))
                })?;
                cleared += 1;
            }
        }
        if cleared > 0 {
            info!(
                "[brandprobe:evidence] cleared {cleared} stale file(s) under {}",
                root.display()
            );
        }
        Ok(Self { root })
    }

    /// Directory evidence files are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target path for a brand's evidence file.
    pub fn evidence_path(&self, brand: &str) -> PathBuf {
        self.root
            .join(sanitize_brand_filename(brand))
            .with_extension(EVIDENCE_EXTENSION)
    }
}

impl EvidenceSink for FsEvidenceWriter {
    fn record(&self, brand: &str, result: &EstimatorResult) -> Result<(), ProbeError> {
        let path = self.evidence_path(brand);
        let raw = serde_json::to_vec_pretty(result).map_err(|err| {
            ProbeError::Evidence(format!("failed encoding evidence for '{brand}': {err}"))
        })?;
        fs::write(&path, raw).map_err(|err| {
            ProbeError::Evidence(format!(
                "failed writing evidence {}: {err}",
                path.display()
            ))
        })
    }
}

/// Map a brand name to a filesystem-safe file stem.
///
/// Alphanumerics, spaces, hyphens, and underscores pass through; everything
/// else becomes an underscore. Empty names get a placeholder stem.
pub fn sanitize_brand_filename(brand: &str) -> String {
    let sanitized: String = brand
        .chars()
        .map(|ch| {
            if ch.is_alphanumeric() || ch == ' ' || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.trim().is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::parse_estimator_response;
    use tempfile::tempdir;

    #[test]
    fn sanitize_passes_safe_characters() {
        assert_eq!(sanitize_brand_filename("Bombay Sapphire"), "Bombay Sapphire");
        assert_eq!(sanitize_brand_filename("Label 5"), "Label 5");
    }

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_brand_filename("a/b\\c"), "a_b_c");
        assert_eq!(sanitize_brand_filename("..."), "___");
        assert_eq!(sanitize_brand_filename(""), "unnamed");
    }

    #[test]
    fn create_clears_stale_files_but_keeps_subdirs() {
        let temp = tempdir().expect("tempdir");
        let root = temp.path().join("output");
        fs::create_dir_all(root.join("keep")).expect("subdir");
        fs::write(root.join("stale.json"), b"{}").expect("stale file");

        let writer = FsEvidenceWriter::create(&root).expect("writer");
        assert!(!root.join("stale.json").exists());
        assert!(root.join("keep").is_dir());
        assert_eq!(writer.root(), root.as_path());

        // Idempotent on an already-clean directory.
        FsEvidenceWriter::create(&root).expect("second create");
    }

    #[test]
    fn record_writes_pretty_json_per_brand() {
        let temp = tempdir().expect("tempdir");
        let writer = FsEvidenceWriter::create(temp.path().join("output")).expect("writer");
        let result = parse_estimator_response(
            r#"{"sources": {"shop_a": {"quantity": 2, "urls": ["https://a.example"]}}}"#,
        )
        .expect("parse");

        writer.record("Jack Daniel's", &result).expect("record");
        let path = writer.evidence_path("Jack Daniel's");
        assert!(path.file_name().is_some_and(|name| name == "Jack Daniel_s.json"));
        let raw = fs::read_to_string(path).expect("read back");
        let round_trip = parse_estimator_response(&raw).expect("round trip");
        assert_eq!(round_trip, result);
    }
}
