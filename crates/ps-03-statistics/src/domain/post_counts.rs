//! # Per-key Post Counts
//!
//! Counts accepted updates per key while remembering the order in which keys
//! were first seen. Ranking sorts on (count desc, first-seen asc) with a
//! stable sort, so ties never depend on hash map iteration order.

use shared_types::{ProlificKey, PublicKey};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCounts {
    /// Position in `order` for each key.
    index: HashMap<PublicKey, usize>,
    /// Keys in first-seen order with their counts.
    order: Vec<(PublicKey, u64)>,
    total: u64,
}

impl PostCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more post for `pubkey`, returning its new count.
    pub fn record(&mut self, pubkey: PublicKey) -> u64 {
        self.total += 1;
        match self.index.get(&pubkey) {
            Some(&i) => {
                self.order[i].1 += 1;
                self.order[i].1
            }
            None => {
                self.index.insert(pubkey, self.order.len());
                self.order.push((pubkey, 1));
                1
            }
        }
    }

    /// Posts recorded for `pubkey`, zero if unseen.
    pub fn get(&self, pubkey: &PublicKey) -> u64 {
        self.index.get(pubkey).map_or(0, |&i| self.order[i].1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Sum of all per-key counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The `n` most prolific keys, ties in first-seen order.
    pub fn top(&self, n: usize) -> Vec<ProlificKey> {
        let mut ranked: Vec<&(PublicKey, u64)> = self.order.iter().collect();
        // `sort_by` is stable: equal counts keep first-seen order.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|&(pubkey, count)| ProlificKey { pubkey, count })
            .collect()
    }
}

impl FromIterator<PublicKey> for PostCounts {
    fn from_iter<I: IntoIterator<Item = PublicKey>>(iter: I) -> Self {
        let mut counts = PostCounts::new();
        for key in iter {
            counts.record(key);
        }
        counts
    }
}
