//! Configuration for the word bank and its closest-word matcher.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WordBankError};

/// Configuration for a [`WordBank`](crate::store::WordBank).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordBankConfig {
    /// Search count given to a newly added word.
    /// 1 means "added and known".
    pub initial_search_count: u64,

    /// Closest-word suggestion settings.
    pub suggestion: SuggestionConfig,
}

impl Default for WordBankConfig {
    fn default() -> Self {
        WordBankConfig {
            initial_search_count: 1,
            suggestion: SuggestionConfig::default(),
        }
    }
}

impl WordBankConfig {
    /// Read a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: WordBankConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the indexes cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.initial_search_count == 0 {
            return Err(WordBankError::invalid_argument(
                "initial_search_count must be at least 1",
            ));
        }
        self.suggestion.validate()
    }
}

/// Configuration for closest-word ("did you mean") suggestions.
///
/// A stored word is a candidate when its edit distance to the query is at
/// most `max_distance`, or at most `max_distance_ratio` of the query length,
/// whichever allows more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Absolute edit distance always accepted.
    pub max_distance: usize,

    /// Edit distance accepted relative to the query length (0.0 to 1.0).
    pub max_distance_ratio: f64,

    /// Maximum number of suggestions. None returns every match.
    pub max_results: Option<usize>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_distance: 2,
            max_distance_ratio: 0.3,
            max_results: None,
        }
    }
}

impl SuggestionConfig {
    /// Largest edit distance accepted for a query of `query_len` chars.
    pub fn distance_limit(&self, query_len: usize) -> usize {
        let relative = (query_len as f64 * self.max_distance_ratio).floor() as usize;
        self.max_distance.max(relative)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.max_distance_ratio) {
            return Err(WordBankError::invalid_argument(format!(
                "max_distance_ratio must be within 0.0..=1.0, got {}",
                self.max_distance_ratio
            )));
        }
        if self.max_results == Some(0) {
            return Err(WordBankError::invalid_argument(
                "max_results must be positive when set",
            ));
        }
        Ok(())
    }
}
