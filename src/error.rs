//! Error types for the wordbank library.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! [`WordBankError`] enum. The first six variants are the semantic failures a
//! caller is expected to recover from (show a message and carry on); the rest
//! wrap I/O, serialization and collaborator failures.
//!
//! # Examples
//!
//! ```
//! use wordbank::error::{Result, WordBankError};
//!
//! fn lookup(word: &str) -> Result<()> {
//!     Err(WordBankError::no_word_found(word))
//! }
//!
//! match lookup("qwerty") {
//!     Ok(_) => println!("found"),
//!     Err(e) => assert_eq!(e.to_string(), "No word found: \"qwerty\""),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for wordbank operations.
#[derive(Error, Debug)]
pub enum WordBankError {
    /// The word is already stored.
    #[error("Word already exists: \"{0}\"")]
    WordAlreadyExists(String),

    /// The word is not stored.
    #[error("No word found: \"{0}\"")]
    NoWordFound(String),

    /// No stored word carries the tag.
    #[error("No tag found: \"{0}\"")]
    NoTagFound(String),

    /// The word never had a synonym registered.
    #[error("No synonym found for: \"{0}\"")]
    NoSynonymFound(String),

    /// A required input was empty after trimming.
    #[error("Empty input: {0} must not be empty")]
    EmptyInput(String),

    /// The bank holds too few distinct meanings to build a quiz question.
    #[error("Not enough words for a quiz: need {required}, have {available}")]
    NotEnoughWordsForQuiz { required: usize, available: usize },

    /// A cross-index invariant does not hold.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// The external dictionary could not provide a meaning.
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Invalid argument or configuration value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors (snapshot and config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with WordBankError.
pub type Result<T> = std::result::Result<T, WordBankError>;

impl WordBankError {
    /// Create a new word-already-exists error.
    pub fn word_already_exists<S: Into<String>>(word: S) -> Self {
        WordBankError::WordAlreadyExists(word.into())
    }

    /// Create a new no-word-found error.
    pub fn no_word_found<S: Into<String>>(word: S) -> Self {
        WordBankError::NoWordFound(word.into())
    }

    /// Create a new no-tag-found error.
    pub fn no_tag_found<S: Into<String>>(tag: S) -> Self {
        WordBankError::NoTagFound(tag.into())
    }

    /// Create a new no-synonym-found error.
    pub fn no_synonym_found<S: Into<String>>(word: S) -> Self {
        WordBankError::NoSynonymFound(word.into())
    }

    /// Create a new empty-input error naming the offending field.
    pub fn empty_input<S: Into<String>>(field: S) -> Self {
        WordBankError::EmptyInput(field.into())
    }

    /// Create a new not-enough-words-for-quiz error.
    pub fn not_enough_words_for_quiz(required: usize, available: usize) -> Self {
        WordBankError::NotEnoughWordsForQuiz {
            required,
            available,
        }
    }

    /// Create a new integrity error.
    pub fn integrity<S: Into<String>>(msg: S) -> Self {
        WordBankError::Integrity(msg.into())
    }

    /// Create a new lookup error.
    pub fn lookup<S: Into<String>>(msg: S) -> Self {
        WordBankError::Lookup(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        WordBankError::InvalidArgument(msg.into())
    }

    /// Whether the error is one of the semantic kinds a caller reports and
    /// moves past.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            WordBankError::WordAlreadyExists(_)
                | WordBankError::NoWordFound(_)
                | WordBankError::NoTagFound(_)
                | WordBankError::NoSynonymFound(_)
                | WordBankError::EmptyInput(_)
                | WordBankError::NotEnoughWordsForQuiz { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = WordBankError::word_already_exists("apple");
        assert_eq!(error.to_string(), "Word already exists: \"apple\"");

        let error = WordBankError::no_tag_found("fruit");
        assert_eq!(error.to_string(), "No tag found: \"fruit\"");

        let error = WordBankError::empty_input("meaning");
        assert_eq!(error.to_string(), "Empty input: meaning must not be empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = WordBankError::from(io_error);

        match error {
            WordBankError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_recoverable_kinds() {
        assert!(WordBankError::no_word_found("cat").is_recoverable());
        assert!(WordBankError::no_synonym_found("cat").is_recoverable());
        assert!(!WordBankError::integrity("bucket mismatch").is_recoverable());
        assert!(!WordBankError::lookup("offline").is_recoverable());
        assert!(WordBankError::not_enough_words_for_quiz(4, 2).is_recoverable());
        assert_eq!(
            WordBankError::not_enough_words_for_quiz(4, 2).to_string(),
            "Not enough words for a quiz: need 4, have 2"
        );
    }
}
