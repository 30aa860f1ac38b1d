//! Web search abstraction.
//!
//! This module provides a `Searcher` trait that turns one tuple into a list
//! of result URLs, plus `WebSearcher`, an HTTP backend for providers that
//! answer with an XML result set.

mod response;
mod types;
mod web;

pub use response::parse_result_urls;
pub use types::*;
pub use web::WebSearcher;
