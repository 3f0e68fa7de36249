//! The stored record for one word.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalize a word key: trimmed and lower-cased.
pub fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Normalize a tag: trimmed, case preserved.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_string()
}

/// One word with its meaning, tags, example sentence and search count.
///
/// Entries are owned by the primary index. Derived indexes refer to an entry
/// by its word only, so the fields here are the single source of truth.
/// Synonyms are kept in the synonym index, not on the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    word: String,
    meaning: String,
    tags: BTreeSet<String>,
    example: Option<String>,
    search_count: u64,
    added_seq: u64,
}

impl Entry {
    pub(crate) fn new(word: String, meaning: String, search_count: u64, added_seq: u64) -> Self {
        Entry {
            word,
            meaning,
            tags: BTreeSet::new(),
            example: None,
            search_count,
            added_seq,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn meaning(&self) -> &str {
        &self.meaning
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn example(&self) -> Option<&str> {
        self.example.as_deref()
    }

    /// Number of times the word has been looked up, starting at the
    /// configured initial count when added.
    pub fn search_count(&self) -> u64 {
        self.search_count
    }

    /// Position in insertion order; larger is newer.
    pub fn added_seq(&self) -> u64 {
        self.added_seq
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub(crate) fn set_meaning(&mut self, meaning: String) {
        self.meaning = meaning;
    }

    pub(crate) fn set_example(&mut self, example: String) {
        self.example = Some(example);
    }

    /// Returns true if the tag was not already present.
    pub(crate) fn insert_tag(&mut self, tag: String) -> bool {
        self.tags.insert(tag)
    }

    /// Returns true if the tag was present.
    pub(crate) fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    pub(crate) fn set_search_count(&mut self, count: u64) {
        self.search_count = count;
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.meaning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  Cat "), "cat");
        assert_eq!(normalize_word("ÉCOLE"), "école");
        assert_eq!(normalize_word("   "), "");
    }

    #[test]
    fn test_normalize_tag_keeps_case() {
        assert_eq!(normalize_tag(" Animal "), "Animal");
    }

    #[test]
    fn test_entry_tags() {
        let mut entry = Entry::new("cat".to_string(), "a small feline".to_string(), 1, 0);
        assert!(entry.insert_tag("animal".to_string()));
        assert!(!entry.insert_tag("animal".to_string()));
        assert!(entry.has_tag("animal"));
        assert!(entry.remove_tag("animal"));
        assert!(!entry.remove_tag("animal"));
        assert!(entry.tags().is_empty());
    }

    #[test]
    fn test_entry_display() {
        let entry = Entry::new("cat".to_string(), "a small feline".to_string(), 1, 0);
        assert_eq!(entry.to_string(), "cat: a small feline");
        assert_eq!(entry.example(), None);
        assert_eq!(entry.search_count(), 1);
    }
}
