//! Types for the download orchestrator.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::candidates::RankedCandidate;

/// Errors that stop a run before or between phases.
///
/// Individual search and download failures never show up here; they are
/// logged, counted in the [`RunReport`], and skipped.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Tuple file unreadable or empty.
    #[error("tuple input error: {0}")]
    Sampler(#[from] crate::sampler::SamplerError),

    /// Download folder could not be created.
    #[error("download folder unusable: {0}")]
    Destination(#[source] crate::fetcher::FetchError),
}

/// Counters collected during the search phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Searches sent to the provider.
    pub searches_issued: usize,
    /// Searches that failed and counted as zero results.
    pub searches_failed: usize,
    /// URLs accepted into the candidate store (with repeats).
    pub urls_accepted: usize,
    /// Directory-style URLs discarded by the validity filter.
    pub urls_rejected: usize,
}

/// Outcome of the download phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadStats {
    /// URLs handed to the fetcher.
    pub attempted: usize,
    /// Fetches that completed.
    pub succeeded: usize,
    /// Fetches that failed and were skipped.
    pub failed: usize,
    /// Distinct files written, in the order the downloads completed.
    pub saved: Vec<PathBuf>,
}

/// Summary of one complete run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// Size of the tuple population.
    pub tuples_loaded: usize,
    pub searches_issued: usize,
    pub searches_failed: usize,
    /// Every URL returned by the provider, valid or not.
    pub urls_offered: usize,
    pub urls_rejected: usize,
    pub distinct_candidates: usize,
    /// Head of the ranked list chosen for download, with counts.
    pub selected: Vec<RankedCandidate>,
    pub downloads_attempted: usize,
    pub downloads_succeeded: usize,
    pub downloads_failed: usize,
    pub saved_files: Vec<PathBuf>,
}

impl RunReport {
    /// Whether every selected document ended up on disk.
    pub fn is_complete(&self) -> bool {
        self.downloads_failed == 0 && self.downloads_succeeded == self.selected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        RunReport {
            started_at: Utc::now(),
            duration_ms: 12,
            tuples_loaded: 2,
            searches_issued: 4,
            searches_failed: 1,
            urls_offered: 7,
            urls_rejected: 1,
            distinct_candidates: 3,
            selected: vec![RankedCandidate {
                url: "http://e.com/u2".to_string(),
                count: 2,
            }],
            downloads_attempted: 1,
            downloads_succeeded: 1,
            downloads_failed: 0,
            saved_files: vec![PathBuf::from("/tmp/out/u2")],
        }
    }

    #[test]
    fn test_run_report_serialization() {
        let json = serde_json::to_string(&report()).unwrap();
        let parsed: RunReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.searches_issued, 4);
        assert_eq!(parsed.selected[0].url, "http://e.com/u2");
        assert_eq!(parsed.saved_files, vec![PathBuf::from("/tmp/out/u2")]);
    }

    #[test]
    fn test_is_complete() {
        let mut r = report();
        assert!(r.is_complete());

        r.downloads_failed = 1;
        r.downloads_succeeded = 0;
        assert!(!r.is_complete());
    }

    #[test]
    fn test_error_display() {
        let err = OrchestratorError::from(crate::sampler::SamplerError::EmptyPopulation);
        assert_eq!(err.to_string(), "tuple input error: no tuples to sample from");
    }
}
