//! Shared utility modules used across wordbank components.

pub mod levenshtein;
