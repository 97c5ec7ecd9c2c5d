//! Module implementing the per-neuron cache of outgoing links.
//!
//! Each entry is either uncached or holds the materialized list of (target, weight) pairs of one neuron.
//! Entries are filled lazily through a shared reference and must be invalidated by every structural change of the links.

use std::sync::OnceLock;

/// The (target, weight) pairs of the links leaving a neuron.
pub type Neighbors = Vec<(usize, f64)>;

#[derive(Debug, Clone, Default)]
pub struct AdjacencyCache {
    entries: Vec<OnceLock<Neighbors>>,
}

impl AdjacencyCache {
    /// Create a cache with the given number of uncached entries.
    pub fn with_len(len: usize) -> Self {
        let mut cache = AdjacencyCache::default();
        cache.resize(len);
        cache
    }

    /// Grow with uncached entries or truncate trailing ones.
    pub fn resize(&mut self, len: usize) {
        self.entries.resize_with(len, OnceLock::new);
    }

    /// Returns true if the entry has been materialized, including a materialized empty list.
    pub fn is_cached(&self, node: usize) -> bool {
        self.entries
            .get(node)
            .map_or(false, |entry| entry.get().is_some())
    }

    /// Returns the cached entry, materializing it with the provided function first if needed.
    /// Returns None for a node beyond the cache.
    pub fn get_or_init<F>(&self, node: usize, f: F) -> Option<&[(usize, f64)]>
    where
        F: FnOnce() -> Neighbors,
    {
        self.entries
            .get(node)
            .map(|entry| entry.get_or_init(f).as_slice())
    }

    /// Drop the entry of the node, if cached.
    pub fn invalidate(&mut self, node: usize) {
        if let Some(entry) = self.entries.get_mut(node) {
            entry.take();
        }
    }

    /// Drop all entries.
    pub fn invalidate_all(&mut self) {
        self.entries.iter_mut().for_each(|entry| {
            entry.take();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_is_cached() {
        let cache = AdjacencyCache::with_len(2);
        assert!(!cache.is_cached(0));
        assert_eq!(cache.get_or_init(0, Vec::new), Some(&[][..]));
        assert!(cache.is_cached(0));
        assert!(!cache.is_cached(1));
    }

    #[test]
    fn test_materialized_once() {
        let cache = AdjacencyCache::with_len(1);
        let mut calls = 0;
        cache.get_or_init(0, || {
            calls += 1;
            vec![(1, 0.5)]
        });
        let neighbors = cache.get_or_init(0, || vec![(2, 1.0)]);
        assert_eq!(calls, 1);
        assert_eq!(neighbors, Some(&[(1, 0.5)][..]));
    }

    #[test]
    fn test_invalidate() {
        let mut cache = AdjacencyCache::with_len(3);
        cache.get_or_init(0, || vec![(1, 0.5)]);
        cache.get_or_init(1, Vec::new);
        cache.invalidate(0);
        assert!(!cache.is_cached(0));
        assert!(cache.is_cached(1));
        assert_eq!(cache.get_or_init(0, || vec![(2, 1.0)]), Some(&[(2, 1.0)][..]));

        cache.invalidate_all();
        assert!((0..3).all(|node| !cache.is_cached(node)));
        cache.invalidate(7);
    }

    #[test]
    fn test_resize() {
        let mut cache = AdjacencyCache::with_len(3);
        cache.get_or_init(2, Vec::new);
        cache.resize(2);
        assert_eq!(cache.get_or_init(1, Vec::new), Some(&[][..]));
        assert_eq!(cache.get_or_init(2, Vec::new), None);
        cache.resize(4);
        assert!(!cache.is_cached(2));
        assert_eq!(cache.get_or_init(4, Vec::new), None);
    }
}
