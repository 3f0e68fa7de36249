//! Meaning lookup with an external dictionary fallback.
//!
//! [`resolve_meaning`] is the full search flow: a stored word counts one more
//! search; an unknown word is looked up in a [`MeaningSource`] and, if found
//! there, added to the bank.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::entry::normalize_word;
use crate::error::{Result, WordBankError};
use crate::store::WordBank;

/// Something that can supply the meaning of a word the bank does not hold.
pub trait MeaningSource {
    /// Return the meaning of `word`, or `WordBankError::Lookup` if unknown.
    fn lookup(&self, word: &str) -> Result<String>;
}

/// A fixed word → meaning table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlossarySource {
    meanings: HashMap<String, String>,
}

impl GlossarySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a glossary from a JSON object of `"word": "meaning"` pairs.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let raw: HashMap<String, String> = serde_json::from_str(&content)?;
        Ok(raw.into_iter().collect())
    }

    pub fn insert(&mut self, word: &str, meaning: &str) {
        self.meanings
            .insert(normalize_word(word), meaning.trim().to_string());
    }

    pub fn len(&self) -> usize {
        self.meanings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meanings.is_empty()
    }
}

impl<W: AsRef<str>, M: AsRef<str>> FromIterator<(W, M)> for GlossarySource {
    fn from_iter<I: IntoIterator<Item = (W, M)>>(iter: I) -> Self {
        let mut glossary = GlossarySource::new();
        for (word, meaning) in iter {
            glossary.insert(word.as_ref(), meaning.as_ref());
        }
        glossary
    }
}

impl MeaningSource for GlossarySource {
    fn lookup(&self, word: &str) -> Result<String> {
        self.meanings
            .get(&normalize_word(word))
            .filter(|meaning| !meaning.is_empty())
            .cloned()
            .ok_or_else(|| WordBankError::lookup(format!("no glossary entry for \"{word}\"")))
    }
}

/// Outcome of [`resolve_meaning`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    /// The word was stored; its search count has been increased.
    Found { meaning: String, search_count: u64 },
    /// The word was fetched from the source and added to the bank.
    Fetched {
        meaning: String,
        suggestions: Vec<String>,
    },
    /// Neither the bank nor the source knew the word.
    NotFound {
        reason: String,
        suggestions: Vec<String>,
    },
}

/// Search for `word`, falling back to `source` when it is not stored.
///
/// Suggestions are always computed against the bank as it was before the
/// fetched word was added, so a fetched word never suggests itself.
pub fn resolve_meaning(
    bank: &mut WordBank,
    source: Option<&dyn MeaningSource>,
    word: &str,
    max_suggestions: Option<usize>,
) -> Result<Resolution> {
    if bank.contains(word) {
        let search_count = bank.increase_search_count(word)?;
        let meaning = bank.search_meaning(word)?.to_string();
        return Ok(Resolution::Found {
            meaning,
            search_count,
        });
    }
    if normalize_word(word).is_empty() {
        return Err(WordBankError::empty_input("word"));
    }

    let suggestions = bank.suggest_closest(word, max_suggestions);
    let Some(source) = source else {
        return Ok(Resolution::NotFound {
            reason: WordBankError::no_word_found(normalize_word(word)).to_string(),
            suggestions,
        });
    };

    match source.lookup(word) {
        Ok(meaning) => {
            let entry = bank.add_word(word, &meaning)?;
            debug!("fetched {:?} from external source", entry.word());
            Ok(Resolution::Fetched {
                meaning: entry.meaning().to_string(),
                suggestions,
            })
        }
        Err(e) => Ok(Resolution::NotFound {
            reason: e.to_string(),
            suggestions,
        }),
    }
}
