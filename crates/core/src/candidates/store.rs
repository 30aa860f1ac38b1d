//! In-memory multiset of candidate URLs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Whether `url` looks like a document rather than a directory listing.
///
/// The only rule is the trailing path separator. Well-formedness is not
/// checked here; a malformed URL simply fails later at fetch time.
pub fn is_valid_document(url: &str) -> bool {
    !url.ends_with('/')
}

/// A distinct URL together with how many times it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub url: String,
    pub count: u32,
}

/// Occurrence counts for every accepted URL of a run.
///
/// Entries are kept in first-seen order so that ranking is deterministic:
/// URLs with equal counts come out in the order they were first offered.
#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    /// url -> position in `entries`
    index: HashMap<String, usize>,
    entries: Vec<RankedCandidate>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sighting of `url`.
    ///
    /// Directory-style URLs are discarded without touching the store.
    /// Returns whether the URL was accepted.
    pub fn offer(&mut self, url: &str) -> bool {
        if !is_valid_document(url) {
            return false;
        }

        match self.index.get(url) {
            Some(&pos) => {
                self.entries[pos].count += 1;
            }
            None => {
                self.index.insert(url.to_string(), self.entries.len());
                self.entries.push(RankedCandidate {
                    url: url.to_string(),
                    count: 1,
                });
            }
        }
        true
    }

    /// How many times `url` was accepted, or `None` if it never was.
    pub fn count(&self, url: &str) -> Option<u32> {
        self.index.get(url).map(|&pos| self.entries[pos].count)
    }

    /// Number of distinct URLs stored.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of accepted offers (sum of all counts).
    pub fn total_offers(&self) -> u64 {
        self.entries.iter().map(|e| e.count as u64).sum()
    }

    /// Distinct URLs ordered by descending count, ties in first-seen order.
    pub fn ranked(&self) -> Vec<RankedCandidate> {
        let mut ranked = self.entries.clone();
        // sort_by is stable, so equal counts keep insertion order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    /// The first `n` URLs of [`ranked`](Self::ranked).
    pub fn top(&self, n: usize) -> Vec<String> {
        self.ranked().into_iter().take(n).map(|c| c.url).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn urls(ranked: &[RankedCandidate]) -> Vec<&str> {
        ranked.iter().map(|c| c.url.as_str()).collect()
    }

    #[test]
    fn test_is_valid_document() {
        assert!(is_valid_document("http://example.com/a/b.pdf"));
        assert!(is_valid_document("http://example.com"));
        assert!(!is_valid_document("http://example.com/dir/"));
        assert!(!is_valid_document("/"));
    }

    #[test]
    fn test_empty_store_ranks_nothing() {
        let store = CandidateStore::new();
        assert!(store.is_empty());
        assert!(store.ranked().is_empty());
        assert!(store.top(5).is_empty());
        assert_eq!(store.count("http://example.com/a"), None);
    }

    #[test]
    fn test_offer_directory_is_noop() {
        let mut store = CandidateStore::new();
        store.offer("http://example.com/a.pdf");

        assert!(!store.offer("http://example.com/dir/"));
        assert!(!store.offer("http://example.com/dir/"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.count("http://example.com/a.pdf"), Some(1));
        assert_eq!(store.count("http://example.com/dir/"), None);
        assert_eq!(store.total_offers(), 1);
    }

    #[test]
    fn test_repeated_offer_counts_exactly() {
        let mut store = CandidateStore::new();
        for _ in 0..7 {
            assert!(store.offer("http://example.com/seven.txt"));
        }
        store.offer("http://example.com/once.txt");

        assert_eq!(store.count("http://example.com/seven.txt"), Some(7));
        assert_eq!(store.len(), 2);
        assert_eq!(store.ranked()[0].url, "http://example.com/seven.txt");
    }

    #[test]
    fn test_ranked_orders_by_descending_count() {
        let mut store = CandidateStore::new();
        for url in ["u1", "u2", "u3", "u2", "u3", "u3"] {
            store.offer(url);
        }

        let ranked = store.ranked();
        assert_eq!(urls(&ranked), vec!["u3", "u2", "u1"]);
        assert_eq!(
            ranked.iter().map(|c| c.count).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let mut store = CandidateStore::new();
        for url in ["u1", "u2", "u2", "u3"] {
            store.offer(url);
        }

        assert_eq!(urls(&store.ranked()), vec!["u2", "u1", "u3"]);
    }

    #[test]
    fn test_ranked_reflects_latest_state() {
        let mut store = CandidateStore::new();
        store.offer("a");
        store.offer("b");
        assert_eq!(urls(&store.ranked()), vec!["a", "b"]);

        store.offer("b");
        assert_eq!(urls(&store.ranked()), vec!["b", "a"]);
    }

    #[test]
    fn test_ranked_is_distinct_and_non_increasing() {
        // xorshift to get a long, irregular offer sequence without extra deps
        let mut state: u32 = 0x9e37_79b9;
        let mut store = CandidateStore::new();
        let mut offered = HashSet::new();
        for _ in 0..500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let n = state % 40;
            let url = if n % 9 == 0 {
                format!("http://host/dir{}/", n)
            } else {
                format!("http://host/doc{}", n)
            };
            if store.offer(&url) {
                offered.insert(url);
            }
        }

        let ranked = store.ranked();
        let distinct: HashSet<_> = ranked.iter().map(|c| c.url.clone()).collect();
        assert_eq!(distinct.len(), ranked.len());
        assert_eq!(distinct, offered);
        assert!(ranked.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(store.total_offers(), ranked.iter().map(|c| c.count as u64).sum::<u64>());
    }

    #[test]
    fn test_top_truncates() {
        let mut store = CandidateStore::new();
        for url in ["u1", "u2", "u2", "u3"] {
            store.offer(url);
        }
        assert_eq!(store.top(1), vec!["u2".to_string()]);
        assert_eq!(store.top(10).len(), 3);
        assert!(store.top(0).is_empty());
    }
}
