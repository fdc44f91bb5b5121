// src/history.rs
// Bounded, insertion-ordered window of recently served quote ids. Owned by
// the orchestrator instance, never persisted, never shared with favorites.

use std::collections::{HashSet, VecDeque};

pub const DEFAULT_CAPACITY: usize = 9;

#[derive(Debug)]
pub struct RecentHistory {
    order: VecDeque<String>,
    seen: HashSet<String>,
    cap: usize,
}

impl RecentHistory {
    pub fn with_capacity(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            order: VecDeque::with_capacity(cap + 1),
            seen: HashSet::with_capacity(cap + 1),
            cap,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Record an id as most-recently served. Re-inserting a known id
    /// refreshes its position instead of double-counting it. Evicts the
    /// oldest entry once over capacity.
    pub fn insert(&mut self, id: &str) {
        if self.seen.contains(id) {
            self.order.retain(|x| x != id);
        } else {
            self.seen.insert(id.to_string());
        }
        self.order.push_back(id.to_string());

        while self.order.len() > self.cap {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
    }

    /// Wholesale reset, used when every reachable quote has been seen.
    pub fn reset(&mut self) {
        self.order.clear();
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinsert_refreshes_recency() {
        let mut h = RecentHistory::with_capacity(3);
        h.insert("a");
        h.insert("b");
        h.insert("a"); // "a" is now newest
        h.insert("c");
        h.insert("d"); // evicts "b", the oldest
        assert!(h.contains("a"));
        assert!(!h.contains("b"));
        assert!(h.contains("c"));
        assert!(h.contains("d"));
    }
}
