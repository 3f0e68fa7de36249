//! Prefix and closest-word queries over the sorted word keys.
//!
//! Prefix queries rely on the keys being kept in a [`BTreeMap`]: the scan
//! starts at the smallest key that is not less than the prefix and stops at
//! the first key that no longer carries it, so only matching keys (plus one)
//! are visited.
//!
//! Closest-word queries score every stored word with a bounded Levenshtein
//! distance. The accepted distance is `max(max_distance, floor(ratio * len))`
//! (see [`SuggestionConfig::distance_limit`]); results are ordered by
//! ascending distance, then alphabetically.

use std::collections::BTreeMap;
use std::ops::Bound;

use serde::{Deserialize, Serialize};

use crate::config::SuggestionConfig;
use crate::util::levenshtein::QueryDistance;

/// A closest-word candidate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Suggestion {
    /// Edit distance from the query. Declared first so the derived ordering
    /// sorts by distance, then by word.
    pub distance: usize,
    /// The stored word.
    pub word: String,
}

/// Iterate the entries whose key starts with `prefix`, in ascending key order.
pub fn prefix_range<'a, V>(
    map: &'a BTreeMap<String, V>,
    prefix: &'a str,
) -> impl Iterator<Item = (&'a String, &'a V)> + 'a {
    map.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |(key, _)| key.starts_with(prefix))
}

/// Score `candidates` against `query` and keep those within the configured
/// distance. An exact match is not a suggestion and is skipped.
///
/// `max_results` overrides `config.max_results` when set.
pub fn closest_words<'a, I>(
    query: &str,
    candidates: I,
    config: &SuggestionConfig,
    max_results: Option<usize>,
) -> Vec<Suggestion>
where
    I: IntoIterator<Item = &'a str>,
{
    let query_distance = QueryDistance::new(query);
    if query_distance.is_empty() {
        return Vec::new();
    }
    let limit = config.distance_limit(query_distance.len());

    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .filter_map(|candidate| {
            query_distance
                .within(candidate, limit)
                .filter(|&distance| distance > 0)
                .map(|distance| Suggestion {
                    distance,
                    word: candidate.to_string(),
                })
        })
        .collect();

    suggestions.sort();
    if let Some(cap) = max_results.or(config.max_results) {
        suggestions.truncate(cap);
    }

    log::trace!(
        "closest words for {query:?} within {limit}: {} match(es)",
        suggestions.len()
    );
    suggestions
}
