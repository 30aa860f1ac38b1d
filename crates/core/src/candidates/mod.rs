//! Candidate URL aggregation.
//!
//! Every URL returned by a search is offered to a [`CandidateStore`], which
//! counts how many times each distinct URL recurs across the whole search
//! phase. The download phase reads the store back as a frequency-ordered
//! list: a URL found by many different tuples is taken to be more relevant
//! than one found once.

mod store;

pub use store::{is_valid_document, CandidateStore, RankedCandidate};
