//! Search count → words index.

use std::collections::{BTreeMap, BTreeSet};

use crate::index::Order;

/// Search count → words with exactly that count, alphabetical within a bucket.
///
/// Every stored word sits in exactly one bucket, the one keyed by its entry's
/// search count. Empty buckets are removed.
#[derive(Debug, Clone, Default)]
pub struct FrequencyIndex {
    buckets: BTreeMap<u64, BTreeSet<String>>,
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Words with exactly `count` searches.
    pub fn bucket(&self, count: u64) -> Option<&BTreeSet<String>> {
        self.buckets.get(&count)
    }

    /// (count, words) pairs in the requested order.
    pub fn iter(&self, order: Order) -> Box<dyn Iterator<Item = (u64, &BTreeSet<String>)> + '_> {
        let pairs = self.buckets.iter().map(|(count, words)| (*count, words));
        match order {
            Order::Ascending => Box::new(pairs),
            Order::Descending => Box::new(pairs.rev()),
        }
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of words across all buckets.
    pub fn word_count(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    pub(crate) fn insert(&mut self, count: u64, word: &str) {
        self.buckets.entry(count).or_default().insert(word.to_string());
    }

    pub(crate) fn remove(&mut self, count: u64, word: &str) {
        if let Some(words) = self.buckets.get_mut(&count) {
            words.remove(word);
            if words.is_empty() {
                self.buckets.remove(&count);
            }
        }
    }

    /// Move `word` from bucket `from` to bucket `to`.
    pub(crate) fn migrate(&mut self, word: &str, from: u64, to: u64) {
        if from == to {
            return;
        }
        self.remove(from, word);
        self.insert(to, word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_prunes_old_bucket() {
        let mut index = FrequencyIndex::new();
        index.insert(1, "cat");
        index.insert(1, "dog");

        index.migrate("cat", 1, 2);
        assert!(index.bucket(2).unwrap().contains("cat"));
        assert!(!index.bucket(1).unwrap().contains("cat"));

        index.migrate("dog", 1, 2);
        assert!(index.bucket(1).is_none());
        assert_eq!(index.len(), 1);
        assert_eq!(index.word_count(), 2);
    }

    #[test]
    fn test_iteration_order() {
        let mut index = FrequencyIndex::new();
        index.insert(3, "zebra");
        index.insert(1, "bee");
        index.insert(3, "ant");

        let ascending: Vec<(u64, Vec<&str>)> = index
            .iter(Order::Ascending)
            .map(|(count, words)| (count, words.iter().map(String::as_str).collect()))
            .collect();
        assert_eq!(ascending, vec![(1, vec!["bee"]), (3, vec!["ant", "zebra"])]);

        let descending: Vec<u64> = index.iter(Order::Descending).map(|(c, _)| c).collect();
        assert_eq!(descending, vec![3, 1]);
    }
}
