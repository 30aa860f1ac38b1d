//! Two-phase run orchestration.
//!
//! The orchestrator wires the components of a run together:
//! - **Search**: sampled tuples are searched (bounded worker pool) and every
//!   returned URL is offered to a single-owner `CandidateStore`
//! - **Download**: once all searches have finished, the top of the ranked
//!   candidate list is fetched into the download folder

mod runner;
mod types;

pub use runner::DownloadOrchestrator;
pub use types::{DownloadStats, OrchestratorError, RunReport, SearchStats};
