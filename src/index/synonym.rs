//! Word → synonyms index.

use std::collections::BTreeSet;

use ahash::AHashMap;

/// Word → set of synonym words.
///
/// The relation is one-directional: registering `b` as a synonym of `a` does
/// not register `a` under `b`. Synonym words need not be stored words.
#[derive(Debug, Clone, Default)]
pub struct SynonymIndex {
    synonyms: AHashMap<String, BTreeSet<String>>,
}

impl SynonymIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synonyms registered for `word`, if it ever had one.
    pub fn get(&self, word: &str) -> Option<&BTreeSet<String>> {
        self.synonyms.get(word)
    }

    pub fn contains_key(&self, word: &str) -> bool {
        self.synonyms.contains_key(word)
    }

    /// Words that have synonyms, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.synonyms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }

    /// Add `synonym` under `word` and return the resulting set.
    pub(crate) fn insert(&mut self, word: &str, synonym: String) -> &BTreeSet<String> {
        let set = self.synonyms.entry(word.to_string()).or_default();
        set.insert(synonym);
        set
    }

    pub(crate) fn remove_word(&mut self, word: &str) -> Option<BTreeSet<String>> {
        self.synonyms.remove(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_one_directional() {
        let mut index = SynonymIndex::new();
        index.insert("big", "large".to_string());
        let set = index.insert("big", "huge".to_string());
        assert_eq!(set.len(), 2);

        assert!(index.contains_key("big"));
        assert!(index.get("large").is_none());
        assert!(index.get("big").unwrap().contains("huge"));
    }

    #[test]
    fn test_remove_word() {
        let mut index = SynonymIndex::new();
        index.insert("big", "large".to_string());
        let removed = index.remove_word("big").unwrap();
        assert!(removed.contains("large"));
        assert!(index.is_empty());
        assert!(index.remove_word("big").is_none());
    }
}
