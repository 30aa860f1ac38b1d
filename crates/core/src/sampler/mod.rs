//! Tuple loading and random search scheduling.
//!
//! Tuples are free-form search phrases, one per line of an input file. A
//! [`TupleSampler`] draws from them uniformly with replacement to build the
//! search schedule for a run. The randomness comes from an injectable
//! [`RandomSource`] so schedules can be reproduced exactly.

mod source;
mod tuples;

pub use source::{RandomSource, RngSource};
pub use tuples::{load_tuples, parse_tuples};

use thiserror::Error;

/// Errors raised while loading tuples or building a sampler.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("no tuples to sample from")]
    EmptyPopulation,

    #[error("failed to read tuple file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Draws search tuples uniformly at random, with replacement.
pub struct TupleSampler<S> {
    tuples: Vec<String>,
    searches: usize,
    source: S,
}

impl<S: RandomSource> TupleSampler<S> {
    /// Build a sampler that will produce `searches` draws from `tuples`.
    ///
    /// Fails with [`SamplerError::EmptyPopulation`] when `tuples` is empty,
    /// even if `searches` is 0.
    pub fn new(tuples: Vec<String>, searches: usize, source: S) -> Result<Self, SamplerError> {
        if tuples.is_empty() {
            return Err(SamplerError::EmptyPopulation);
        }
        Ok(Self {
            tuples,
            searches,
            source,
        })
    }

    /// The full population, in input order.
    pub fn tuples(&self) -> &[String] {
        &self.tuples
    }

    /// Number of draws the schedule will produce.
    pub fn len(&self) -> usize {
        self.searches
    }

    pub fn is_empty(&self) -> bool {
        self.searches == 0
    }

    /// Lazily draw the search schedule.
    ///
    /// Each call starts a fresh schedule of `len()` draws that continues the
    /// random source where the previous one stopped.
    pub fn schedule(&mut self) -> Schedule<'_, S> {
        Schedule {
            tuples: &self.tuples,
            source: &mut self.source,
            remaining: self.searches,
        }
    }
}

/// Iterator over the tuples selected for searching.
pub struct Schedule<'a, S> {
    tuples: &'a [String],
    source: &'a mut S,
    remaining: usize,
}

impl<'a, S: RandomSource> Iterator for Schedule<'a, S> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let tuples: &'a [String] = self.tuples;
        // Clamp so a misbehaving source can never index outside the population.
        let idx = self.source.pick(tuples.len()).min(tuples.len() - 1);
        Some(tuples[idx].as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: RandomSource> ExactSizeIterator for Schedule<'_, S> {}
