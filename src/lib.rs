//! # wordbank
//!
//! A personal vocabulary store. Each word carries a meaning, optional tags,
//! an optional usage example and a search count. Alongside the primary
//! word index the store keeps three derived indexes in step with it:
//!
//! - tag → words, for "which words carry this tag",
//! - word → synonyms,
//! - search count → words, for frequency listings.
//!
//! ## Features
//!
//! - Exact, prefix and closest-word ("did you mean") lookup
//! - Ascending and descending listings by word or by search count
//! - JSON snapshots with atomic saves
//! - Optional fallback to an external glossary on a lookup miss
//! - Multiple-choice meaning quizzes
//! - A `wordbank` command line front end

pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod index;
pub mod lookup;
pub mod matcher;
pub mod quiz;
pub mod shared;
pub mod snapshot;
pub mod store;
pub mod util;

pub mod prelude {
    pub use crate::config::{SuggestionConfig, WordBankConfig};
    pub use crate::entry::Entry;
    pub use crate::error::{Result, WordBankError};
    pub use crate::index::Order;
    pub use crate::lookup::{GlossarySource, MeaningSource, Resolution, resolve_meaning};
    pub use crate::quiz::{QuizQuestion, QuizReport, generate_quiz, run_quiz};
    pub use crate::shared::SharedWordBank;
    pub use crate::snapshot::Snapshot;
    pub use crate::store::{LoadReport, TagRemoval, WordBank};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
