//! Tag → words inverted index.

use std::collections::{BTreeMap, BTreeSet};

/// Tag → set of words carrying it.
///
/// A word is in bucket `t` iff its entry's tag set contains `t`. Buckets are
/// dropped as soon as they become empty, so a missing bucket means "no words
/// for this tag".
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    buckets: BTreeMap<String, BTreeSet<String>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Words carrying `tag`, if any.
    pub fn words(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.buckets.get(tag)
    }

    pub fn contains(&self, tag: &str, word: &str) -> bool {
        self.buckets
            .get(tag)
            .is_some_and(|words| words.contains(word))
    }

    /// Tags in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// (tag, words) pairs in ascending tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.buckets.iter().map(|(tag, words)| (tag.as_str(), words))
    }

    /// Number of non-empty tags.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub(crate) fn insert(&mut self, tag: &str, word: &str) {
        self.buckets
            .entry(tag.to_string())
            .or_default()
            .insert(word.to_string());
    }

    pub(crate) fn remove(&mut self, tag: &str, word: &str) {
        if let Some(words) = self.buckets.get_mut(tag) {
            words.remove(word);
            if words.is_empty() {
                self.buckets.remove(tag);
            }
        }
    }
}
