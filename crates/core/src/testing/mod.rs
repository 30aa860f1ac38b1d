//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the external collaborator
//! traits plus a scripted random source, so whole runs can be driven without
//! network access and with exact, repeatable schedules.
//!
//! # Example
//!
//! ```rust,ignore
//! use tuplefetch_core::testing::{MockFetcher, MockSearcher, ScriptedSource};
//!
//! let searcher = MockSearcher::new();
//! searcher.set_results("ruby gems", vec!["http://e.com/u1"]).await;
//!
//! let fetcher = MockFetcher::new();
//! let source = ScriptedSource::new(vec![0, 1, 0, 1]);
//! ```

mod mock_fetcher;
mod mock_searcher;

pub use mock_fetcher::MockFetcher;
pub use mock_searcher::{MockSearcher, RecordedSearch};

use crate::sampler::RandomSource;

/// [`RandomSource`] that replays a fixed list of picks, cycling when exhausted.
///
/// Picks are returned as given, even when out of range for the population;
/// the sampler clamps them.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, next: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, _len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.next % self.picks.len()];
        self.next += 1;
        pick
    }
}
