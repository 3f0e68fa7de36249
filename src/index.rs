//! The primary word store and the indexes derived from it.
//!
//! - [`PrimaryIndex`]: word → [`Entry`](crate::entry::Entry), sorted by word.
//! - [`TagIndex`]: tag → words carrying the tag.
//! - [`SynonymIndex`]: word → synonyms registered for it.
//! - [`FrequencyIndex`]: search count → words with that count.
//!
//! Derived indexes hold words only and are read freely, but every mutator is
//! crate-private: the [`WordBank`](crate::store::WordBank) updates the primary
//! index and all affected derived indexes within one call.

pub mod frequency;
pub mod primary;
pub mod synonym;
pub mod tag;

pub use frequency::FrequencyIndex;
pub use primary::PrimaryIndex;
pub use synonym::SynonymIndex;
pub use tag::TagIndex;

use serde::{Deserialize, Serialize};

/// Iteration direction for full listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}
