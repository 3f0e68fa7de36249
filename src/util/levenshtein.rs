//! Bounded Levenshtein edit distance.
//!
//! Closest-word suggestions score every stored word against one query, so the
//! query is decoded to chars once ([`QueryDistance`]) and each candidate is
//! compared with a row-minimum cutoff that gives up as soon as the limit can no
//! longer be met.

use std::cmp::min;

/// Edit distance in chars between `a` and `b`, if it is at most `limit`.
fn bounded_distance(a: &[char], b: &[char], limit: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > limit {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        return Some(a.len().max(b.len()));
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut row_min = curr_row[0];

        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
            row_min = min(row_min, curr_row[j + 1]);
        }

        // Row minima never decrease, so later rows cannot get back under the limit.
        if row_min > limit {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[b.len()];
    (distance <= limit).then_some(distance)
}

/// A query decoded once and compared against many candidates.
#[derive(Debug, Clone)]
pub struct QueryDistance {
    query_chars: Vec<char>,
}

impl QueryDistance {
    pub fn new(query: &str) -> Self {
        QueryDistance {
            query_chars: query.chars().collect(),
        }
    }

    /// Length of the query in chars.
    pub fn len(&self) -> usize {
        self.query_chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.query_chars.is_empty()
    }

    /// Distance to `candidate` if it is at most `limit`.
    pub fn within(&self, candidate: &str, limit: usize) -> Option<usize> {
        let candidate_chars: Vec<char> = candidate.chars().collect();
        bounded_distance(&self.query_chars, &candidate_chars, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: &str, b: &str) -> usize {
        QueryDistance::new(a).within(b, usize::MAX).unwrap()
    }

    #[test]
    fn test_unbounded_distance() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("cat", "cat"), 0);
        assert_eq!(distance("cat", "cart"), 1);
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("apple", "aplpe"), 2);
    }

    #[test]
    fn test_distance_within_limit() {
        let kitten = QueryDistance::new("kitten");
        assert_eq!(kitten.within("sitting", 3), Some(3));
        assert_eq!(kitten.within("sitting", 2), None);
        assert_eq!(QueryDistance::new("dog").within("dog", 0), Some(0));
        assert_eq!(QueryDistance::new("a").within("abcd", 2), None);
        assert_eq!(QueryDistance::new("").within("ab", 2), Some(2));
    }

    #[test]
    fn test_non_ascii_counts_chars() {
        assert_eq!(distance("café", "cafe"), 1);
        assert_eq!(QueryDistance::new("naïve").within("naive", 1), Some(1));
    }

    #[test]
    fn test_query_distance() {
        let query = QueryDistance::new("recieve");
        assert_eq!(query.len(), 7);
        assert_eq!(query.within("receive", 2), Some(2));
        assert_eq!(query.within("believe", 1), None);
        assert!(query.within("completely", 2).is_none());
    }
}
