//! The word bank: one primary index plus its derived indexes behind a single
//! mutation API.
//!
//! Every mutating method validates its input first, then updates the primary
//! index and every derived index it affects before returning. No method
//! returns between those steps, so a reader never sees a word in a tag or
//! frequency bucket that its entry does not agree with.
//!
//! # Example
//!
//! ```
//! use wordbank::store::WordBank;
//!
//! # fn main() -> wordbank::error::Result<()> {
//! let mut bank = WordBank::new();
//! bank.add_word_with_tags("Cat", "a small feline", ["animal"])?;
//! bank.increase_search_count("cat")?;
//!
//! assert_eq!(bank.search_meaning("CAT")?, "a small feline");
//! assert_eq!(bank.get("cat").unwrap().search_count(), 2);
//! assert!(bank.words_for_tag("animal")?.contains("cat"));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeSet;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::WordBankConfig;
use crate::entry::{Entry, normalize_tag, normalize_word};
use crate::error::{Result, WordBankError};
use crate::index::{FrequencyIndex, Order, PrimaryIndex, SynonymIndex, TagIndex};
use crate::matcher::{Suggestion, closest_words};

/// Outcome of [`WordBank::delete_tags`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRemoval {
    /// Tags the word carried and no longer does.
    pub removed: BTreeSet<String>,
    /// Requested tags the word did not carry.
    pub not_present: BTreeSet<String>,
}

/// Outcome of [`WordBank::bulk_load`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub words_loaded: usize,
    pub tags_applied: usize,
    /// One message per record that was skipped.
    pub skipped: Vec<String>,
}

/// The vocabulary store.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    primary: PrimaryIndex,
    tags: TagIndex,
    synonyms: SynonymIndex,
    frequency: FrequencyIndex,
    config: WordBankConfig,
    next_seq: u64,
}

fn word_key(word: &str) -> Result<String> {
    let key = normalize_word(word);
    if key.is_empty() {
        return Err(WordBankError::empty_input("word"));
    }
    Ok(key)
}

fn required_text(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(WordBankError::empty_input(field));
    }
    Ok(value.to_string())
}

fn collect_tags<I>(tags: I) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| {
            let tag = normalize_tag(tag.as_ref());
            if tag.is_empty() {
                Err(WordBankError::empty_input("tag"))
            } else {
                Ok(tag)
            }
        })
        .collect()
}

impl WordBank {
    /// Create an empty bank with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bank with a custom configuration.
    pub fn with_config(config: WordBankConfig) -> Self {
        WordBank {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &WordBankConfig {
        &self.config
    }

    pub fn get(&self, word: &str) -> Option<&Entry> {
        self.primary.get(&normalize_word(word))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.primary.contains(&normalize_word(word))
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Number of tags carried by at least one word.
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn primary_index(&self) -> &PrimaryIndex {
        &self.primary
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tags
    }

    pub fn synonym_index(&self) -> &SynonymIndex {
        &self.synonyms
    }

    pub fn frequency_index(&self) -> &FrequencyIndex {
        &self.frequency
    }

    /// Add a word without tags.
    pub fn add_word(&mut self, word: &str, meaning: &str) -> Result<Entry> {
        self.add_word_with_tags(word, meaning, std::iter::empty::<&str>())
    }

    /// Add a word with its initial tags.
    ///
    /// The word is lower-cased. Fails with `WordAlreadyExists` if it is
    /// already stored, leaving the stored entry untouched.
    pub fn add_word_with_tags<I>(&mut self, word: &str, meaning: &str, tags: I) -> Result<Entry>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let key = word_key(word)?;
        let meaning = required_text(meaning, "meaning")?;
        let tags = collect_tags(tags)?;
        if self.primary.contains(&key) {
            return Err(WordBankError::word_already_exists(key));
        }

        let mut entry = Entry::new(
            key.clone(),
            meaning,
            self.config.initial_search_count,
            self.next_seq,
        );
        for tag in tags {
            entry.insert_tag(tag);
        }

        let entry = self.primary.insert(entry)?.clone();
        self.next_seq += 1;
        for tag in entry.tags() {
            self.tags.insert(tag, &key);
        }
        self.frequency.insert(entry.search_count(), &key);

        debug!("added {key:?} with {} tag(s)", entry.tags().len());
        Ok(entry)
    }

    /// Remove a word from the bank and from every index it appears in.
    ///
    /// The word's own synonym set goes with it; other words that list it as
    /// a synonym keep that reference.
    pub fn delete_word(&mut self, word: &str) -> Result<Entry> {
        let key = word_key(word)?;
        let entry = self.primary.remove(&key)?;
        for tag in entry.tags() {
            self.tags.remove(tag, &key);
        }
        self.frequency.remove(entry.search_count(), &key);
        self.synonyms.remove_word(&key);

        debug!("deleted {key:?}");
        Ok(entry)
    }

    /// Remove tags from a word.
    ///
    /// Succeeds as long as the word exists; requested tags the word does not
    /// carry are reported in [`TagRemoval::not_present`].
    pub fn delete_tags<I>(&mut self, word: &str, tags: I) -> Result<TagRemoval>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let key = word_key(word)?;
        let entry = self.primary.get_mut(&key)?;

        let requested: BTreeSet<String> = tags
            .into_iter()
            .map(|tag| normalize_tag(tag.as_ref()))
            .filter(|tag| !tag.is_empty())
            .collect();

        let mut removal = TagRemoval::default();
        for tag in requested {
            if entry.remove_tag(&tag) {
                self.tags.remove(&tag, &key);
                removal.removed.insert(tag);
            } else {
                removal.not_present.insert(tag);
            }
        }

        debug!(
            "removed {} tag(s) from {key:?}, {} not present",
            removal.removed.len(),
            removal.not_present.len()
        );
        Ok(removal)
    }

    /// Replace a word's meaning.
    pub fn edit_meaning(&mut self, word: &str, new_meaning: &str) -> Result<Entry> {
        let key = word_key(word)?;
        let meaning = required_text(new_meaning, "meaning")?;
        let entry = self.primary.get_mut(&key)?;
        entry.set_meaning(meaning);

        debug!("edited meaning of {key:?}");
        Ok(entry.clone())
    }

    /// Attach tags to a word and return its full resulting tag set.
    pub fn add_tags<I>(&mut self, word: &str, tags: I) -> Result<BTreeSet<String>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let key = word_key(word)?;
        let tags = collect_tags(tags)?;
        let entry = self.primary.get_mut(&key)?;

        for tag in tags {
            if entry.insert_tag(tag.clone()) {
                self.tags.insert(&tag, &key);
            }
        }

        debug!("{key:?} now has {} tag(s)", entry.tags().len());
        Ok(entry.tags().clone())
    }

    /// Register one synonym for a word. See [`WordBank::add_synonyms`].
    pub fn add_synonym(&mut self, word: &str, synonym: &str) -> Result<BTreeSet<String>> {
        self.add_synonyms(word, [synonym])
    }

    /// Register synonyms for a word and return its full synonym set.
    ///
    /// The word must be stored; the synonyms need not be. Only `word`'s set
    /// is updated: the reverse direction is left to the caller.
    pub fn add_synonyms<I>(&mut self, word: &str, synonyms: I) -> Result<BTreeSet<String>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let key = word_key(word)?;
        let synonyms = synonyms
            .into_iter()
            .map(|synonym| {
                let synonym = normalize_word(synonym.as_ref());
                if synonym.is_empty() {
                    Err(WordBankError::empty_input("synonym"))
                } else {
                    Ok(synonym)
                }
            })
            .collect::<Result<Vec<String>>>()?;
        if synonyms.is_empty() {
            return Err(WordBankError::empty_input("synonym"));
        }
        if !self.primary.contains(&key) {
            return Err(WordBankError::no_word_found(key));
        }

        for synonym in synonyms {
            self.synonyms.insert(&key, synonym);
        }
        let current = self.synonyms.get(&key).cloned().unwrap_or_default();

        debug!("{key:?} now has {} synonym(s)", current.len());
        Ok(current)
    }

    /// Attach a usage example to a word, replacing any previous one.
    pub fn add_example(&mut self, word: &str, example: &str) -> Result<Entry> {
        let key = word_key(word)?;
        let example = required_text(example, "example")?;
        let entry = self.primary.get_mut(&key)?;
        entry.set_example(example);

        debug!("set example for {key:?}");
        Ok(entry.clone())
    }

    /// Exact meaning lookup. Does not count as a search.
    pub fn search_meaning(&self, word: &str) -> Result<&str> {
        let key = word_key(word)?;
        self.primary
            .get(&key)
            .map(Entry::meaning)
            .ok_or_else(|| WordBankError::no_word_found(key))
    }

    /// The word's usage example, if one was added.
    pub fn search_example(&self, word: &str) -> Result<Option<&str>> {
        let key = word_key(word)?;
        self.primary
            .get(&key)
            .map(Entry::example)
            .ok_or_else(|| WordBankError::no_word_found(key))
    }

    /// Count one more search of `word` and return the new count.
    pub fn increase_search_count(&mut self, word: &str) -> Result<u64> {
        let key = word_key(word)?;
        let entry = self.primary.get_mut(&key)?;
        let old_count = entry.search_count();
        let new_count = old_count.checked_add(1).ok_or_else(|| {
            WordBankError::invalid_argument(format!("search count of {key:?} overflowed"))
        })?;

        self.frequency.migrate(&key, old_count, new_count);
        entry.set_search_count(new_count);

        debug!("search count of {key:?}: {old_count} -> {new_count}");
        Ok(new_count)
    }

    /// Put a stored word at an explicit search count, moving its frequency
    /// bucket along with it. Used when restoring a snapshot.
    pub(crate) fn restore_search_count(&mut self, word: &str, count: u64) -> Result<()> {
        let key = word_key(word)?;
        let entry = self.primary.get_mut(&key)?;
        self.frequency.migrate(&key, entry.search_count(), count);
        entry.set_search_count(count);
        Ok(())
    }

    /// All words starting with `prefix`, in lexicographic order.
    pub fn search_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = normalize_word(prefix);
        if prefix.is_empty() {
            return Err(WordBankError::empty_input("prefix"));
        }

        let words: Vec<String> = self
            .primary
            .with_prefix(&prefix)
            .map(|entry| entry.word().to_string())
            .collect();
        if words.is_empty() {
            return Err(WordBankError::no_word_found(prefix));
        }
        Ok(words)
    }

    /// Stored words close to `word`, nearest first. Never fails; an empty
    /// result means nothing is close enough.
    pub fn suggest_closest(&self, word: &str, max_results: Option<usize>) -> Vec<String> {
        self.suggest_closest_scored(word, max_results)
            .into_iter()
            .map(|suggestion| suggestion.word)
            .collect()
    }

    /// Like [`WordBank::suggest_closest`] but keeps each edit distance.
    pub fn suggest_closest_scored(&self, word: &str, max_results: Option<usize>) -> Vec<Suggestion> {
        closest_words(
            &normalize_word(word),
            self.primary.words(),
            &self.config.suggestion,
            max_results,
        )
    }

    /// Every (word, meaning) pair in word order.
    pub fn list_words(&self, order: Order) -> Vec<(String, String)> {
        self.primary
            .iter(order)
            .map(|entry| (entry.word().to_string(), entry.meaning().to_string()))
            .collect()
    }

    /// Every (search count, words) bucket in count order; words within a
    /// bucket are alphabetical.
    pub fn list_by_frequency(&self, order: Order) -> Vec<(u64, Vec<String>)> {
        self.frequency
            .iter(order)
            .map(|(count, words)| (count, words.iter().cloned().collect()))
            .collect()
    }

    /// The most recently added words, newest first.
    pub fn recently_added(&self, limit: usize) -> Vec<Entry> {
        let mut entries: Vec<&Entry> = self.primary.iter(Order::Ascending).collect();
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.added_seq()));
        entries.into_iter().take(limit).cloned().collect()
    }

    pub fn words_for_tag(&self, tag: &str) -> Result<BTreeSet<String>> {
        let tag = normalize_tag(tag);
        self.tags
            .words(&tag)
            .cloned()
            .ok_or_else(|| WordBankError::no_tag_found(tag))
    }

    /// Tags of a word, read from its entry.
    pub fn tags_for_word(&self, word: &str) -> Result<BTreeSet<String>> {
        let key = word_key(word)?;
        self.primary
            .get(&key)
            .map(|entry| entry.tags().clone())
            .ok_or_else(|| WordBankError::no_word_found(key))
    }

    /// Synonyms registered for a word. Fails with `NoSynonymFound` if none
    /// ever were, whether or not the word itself is stored.
    pub fn synonyms_for_word(&self, word: &str) -> Result<BTreeSet<String>> {
        let key = word_key(word)?;
        self.synonyms
            .get(&key)
            .cloned()
            .ok_or_else(|| WordBankError::no_synonym_found(key))
    }

    /// Snapshot accessor: every (word, meaning) pair, ascending.
    pub fn all_words(&self) -> Vec<(String, String)> {
        self.list_words(Order::Ascending)
    }

    /// Snapshot accessor: every (tag, words) pair, ascending by tag.
    pub fn all_tags(&self) -> Vec<(String, Vec<String>)> {
        self.tags
            .iter()
            .map(|(tag, words)| (tag.to_string(), words.iter().cloned().collect()))
            .collect()
    }

    /// Rebuild state from (word, meaning) pairs and (tag, words) pairs.
    ///
    /// Records that cannot be applied (duplicate or empty words, tag members
    /// that are not stored) are skipped and listed in the report.
    pub fn bulk_load<W, T, M, S>(&mut self, words: W, tags: T) -> LoadReport
    where
        W: IntoIterator<Item = (S, S)>,
        T: IntoIterator<Item = (S, M)>,
        M: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();

        for (word, meaning) in words {
            match self.add_word(word.as_ref(), meaning.as_ref()) {
                Ok(_) => report.words_loaded += 1,
                Err(e) => {
                    warn!("skipping word {:?}: {e}", word.as_ref());
                    report.skipped.push(format!("word {:?}: {e}", word.as_ref()));
                }
            }
        }

        for (tag, members) in tags {
            for member in members {
                match self.add_tags(member.as_ref(), [tag.as_ref()]) {
                    Ok(_) => report.tags_applied += 1,
                    Err(e) => {
                        warn!("skipping tag {:?} on {:?}: {e}", tag.as_ref(), member.as_ref());
                        report
                            .skipped
                            .push(format!("tag {:?} on {:?}: {e}", tag.as_ref(), member.as_ref()));
                    }
                }
            }
        }

        debug!(
            "bulk load: {} word(s), {} tag assignment(s), {} skipped",
            report.words_loaded,
            report.tags_applied,
            report.skipped.len()
        );
        report
    }

    /// Check every cross-index invariant.
    pub fn verify_integrity(&self) -> Result<()> {
        for entry in self.primary.iter(Order::Ascending) {
            let word = entry.word();
            for tag in entry.tags() {
                if !self.tags.contains(tag, word) {
                    return Err(WordBankError::integrity(format!(
                        "{word:?} carries tag {tag:?} but is missing from its bucket"
                    )));
                }
            }
            let in_bucket = self
                .frequency
                .bucket(entry.search_count())
                .is_some_and(|words| words.contains(word));
            if !in_bucket {
                return Err(WordBankError::integrity(format!(
                    "{word:?} is missing from frequency bucket {}",
                    entry.search_count()
                )));
            }
        }

        for (tag, words) in self.tags.iter() {
            if words.is_empty() {
                return Err(WordBankError::integrity(format!("tag bucket {tag:?} is empty")));
            }
            for word in words {
                if !self.primary.get(word).is_some_and(|entry| entry.has_tag(tag)) {
                    return Err(WordBankError::integrity(format!(
                        "tag bucket {tag:?} lists {word:?} which does not carry it"
                    )));
                }
            }
        }

        for (count, words) in self.frequency.iter(Order::Ascending) {
            if words.is_empty() {
                return Err(WordBankError::integrity(format!(
                    "frequency bucket {count} is empty"
                )));
            }
            for word in words {
                if self.primary.get(word).map(Entry::search_count) != Some(count) {
                    return Err(WordBankError::integrity(format!(
                        "frequency bucket {count} lists {word:?} with a different count"
                    )));
                }
            }
        }
        if self.frequency.word_count() != self.primary.len() {
            return Err(WordBankError::integrity(format!(
                "frequency index holds {} word(s), primary index {}",
                self.frequency.word_count(),
                self.primary.len()
            )));
        }

        if let Some(orphan) = self.synonyms.keys().find(|word| !self.primary.contains(word)) {
            return Err(WordBankError::integrity(format!(
                "synonyms registered for unknown word {orphan:?}"
            )));
        }

        Ok(())
    }
}
