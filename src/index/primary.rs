//! Authoritative word → entry mapping.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry as MapEntry;

use crate::entry::Entry;
use crate::error::{Result, WordBankError};
use crate::index::Order;
use crate::matcher::prefix_range;

/// Word → [`Entry`], kept in lexicographic word order for range scans.
///
/// Holds at most one entry per word. Keys are expected to be normalized by
/// the caller.
#[derive(Debug, Clone, Default)]
pub struct PrimaryIndex {
    entries: BTreeMap<String, Entry>,
}

impl PrimaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.entries.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words in ascending order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in the requested order.
    pub fn iter(&self, order: Order) -> Box<dyn Iterator<Item = &Entry> + '_> {
        match order {
            Order::Ascending => Box::new(self.entries.values()),
            Order::Descending => Box::new(self.entries.values().rev()),
        }
    }

    /// Entries whose word starts with `prefix`, ascending.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        prefix_range(&self.entries, prefix).map(|(_, entry)| entry)
    }

    /// Insert a new entry, refusing to replace an existing one.
    pub(crate) fn insert(&mut self, entry: Entry) -> Result<&Entry> {
        match self.entries.entry(entry.word().to_string()) {
            MapEntry::Occupied(occupied) => {
                Err(WordBankError::word_already_exists(occupied.key().as_str()))
            }
            MapEntry::Vacant(vacant) => Ok(&*vacant.insert(entry)),
        }
    }

    pub(crate) fn get_mut(&mut self, word: &str) -> Result<&mut Entry> {
        self.entries
            .get_mut(word)
            .ok_or_else(|| WordBankError::no_word_found(word))
    }

    pub(crate) fn remove(&mut self, word: &str) -> Result<Entry> {
        self.entries
            .remove(word)
            .ok_or_else(|| WordBankError::no_word_found(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &str) -> Entry {
        Entry::new(word.to_string(), format!("meaning of {word}"), 1, 0)
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut index = PrimaryIndex::new();
        index.insert(entry("apple")).unwrap();

        let err = index.insert(entry("apple")).unwrap_err();
        assert!(matches!(err, WordBankError::WordAlreadyExists(w) if w == "apple"));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("apple").unwrap().meaning(), "meaning of apple");
    }

    #[test]
    fn test_iteration_order() {
        let mut index = PrimaryIndex::new();
        for word in ["pear", "apple", "fig"] {
            index.insert(entry(word)).unwrap();
        }

        let ascending: Vec<&str> = index.iter(Order::Ascending).map(Entry::word).collect();
        assert_eq!(ascending, vec!["apple", "fig", "pear"]);

        let descending: Vec<&str> = index.iter(Order::Descending).map(Entry::word).collect();
        assert_eq!(descending, vec!["pear", "fig", "apple"]);
    }

    #[test]
    fn test_with_prefix() {
        let mut index = PrimaryIndex::new();
        for word in ["cat", "car", "cart", "dog"] {
            index.insert(entry(word)).unwrap();
        }

        let found: Vec<&str> = index.with_prefix("ca").map(Entry::word).collect();
        assert_eq!(found, vec!["car", "cart", "cat"]);
        assert_eq!(index.with_prefix("z").count(), 0);
    }

    #[test]
    fn test_remove_missing_word() {
        let mut index = PrimaryIndex::new();
        assert!(matches!(
            index.remove("ghost"),
            Err(WordBankError::NoWordFound(_))
        ));
    }
}
