//! Output formatting for CLI commands.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, WordBankArgs};
use crate::entry::Entry;
use crate::error::Result;
use crate::lookup::Resolution;
use crate::quiz::QuizReport;
use crate::store::{LoadReport, TagRemoval};

/// A stored word with all its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    pub word: String,
    pub meaning: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    pub search_count: u64,
}

impl From<&Entry> for EntryView {
    fn from(entry: &Entry) -> Self {
        EntryView {
            word: entry.word().to_string(),
            meaning: entry.meaning().to_string(),
            tags: entry.tags().iter().cloned().collect(),
            example: entry.example().map(str::to_string),
            search_count: entry.search_count(),
        }
    }
}

impl fmt::Display for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.word, self.meaning)?;
        if !self.tags.is_empty() {
            write!(f, "\n  tags: {}", self.tags.join(", "))?;
        }
        if let Some(example) = &self.example {
            write!(f, "\n  example: {example}")?;
        }
        write!(f, "\n  searched: {}", self.search_count)
    }
}

/// Several entries, one block each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryList {
    pub entries: Vec<EntryView>,
}

impl fmt::Display for EntryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return write!(f, "(no words)");
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {entry}", i + 1)?;
        }
        Ok(())
    }
}

/// A (word, meaning) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordMeaning {
    pub word: String,
    pub meaning: String,
}

/// A full word listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningList {
    pub words: Vec<WordMeaning>,
}

impl From<Vec<(String, String)>> for MeaningList {
    fn from(pairs: Vec<(String, String)>) -> Self {
        MeaningList {
            words: pairs
                .into_iter()
                .map(|(word, meaning)| WordMeaning { word, meaning })
                .collect(),
        }
    }
}

impl fmt::Display for MeaningList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.words.is_empty() {
            return write!(f, "(no words)");
        }
        let lines: Vec<String> = self
            .words
            .iter()
            .map(|pair| format!("{}: {}", pair.word, pair.meaning))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// A plain list of words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    pub words: Vec<String>,
}

impl fmt::Display for WordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.words.is_empty() {
            return write!(f, "(no words)");
        }
        write!(f, "{}", self.words.join("\n"))
    }
}

/// Words sharing one search count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyBucket {
    pub search_count: u64,
    pub words: Vec<String>,
}

/// Words grouped by search count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyList {
    pub buckets: Vec<FrequencyBucket>,
}

impl From<Vec<(u64, Vec<String>)>> for FrequencyList {
    fn from(buckets: Vec<(u64, Vec<String>)>) -> Self {
        FrequencyList {
            buckets: buckets
                .into_iter()
                .map(|(search_count, words)| FrequencyBucket {
                    search_count,
                    words,
                })
                .collect(),
        }
    }
}

impl fmt::Display for FrequencyList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.buckets.is_empty() {
            return write!(f, "(no words)");
        }
        let lines: Vec<String> = self
            .buckets
            .iter()
            .map(|bucket| format!("{:>5}  {}", bucket.search_count, bucket.words.join(", ")))
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// A name (word or tag) and the set associated with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSet {
    pub name: String,
    pub members: Vec<String>,
}

impl NamedSet {
    pub fn new(name: impl Into<String>, members: BTreeSet<String>) -> Self {
        NamedSet {
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }
}

impl fmt::Display for NamedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.members.is_empty() {
            write!(f, "{}: (none)", self.name)
        } else {
            write!(f, "{}: {}", self.name, self.members.join(", "))
        }
    }
}

/// Every tag with its words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagList {
    pub tags: Vec<NamedSet>,
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tags.is_empty() {
            return write!(f, "(no tags)");
        }
        let lines: Vec<String> = self.tags.iter().map(NamedSet::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// A word's usage example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleView {
    pub word: String,
    pub example: Option<String>,
}

impl fmt::Display for ExampleView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.example {
            Some(example) => write!(f, "{}: {example}", self.word),
            None => write!(f, "{}: (no example)", self.word),
        }
    }
}

/// Summary printed by the check command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub words: usize,
    pub tags: usize,
    pub words_with_synonyms: usize,
    pub frequency_buckets: usize,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ok: {} word(s), {} tag(s), {} word(s) with synonyms, {} frequency bucket(s)",
            self.words, self.tags, self.words_with_synonyms, self.frequency_buckets
        )
    }
}

impl fmt::Display for TagRemoval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<String>| set.iter().cloned().collect::<Vec<_>>().join(", ");
        if self.removed.is_empty() {
            write!(f, "removed: (none)")?;
        } else {
            write!(f, "removed: {}", join(&self.removed))?;
        }
        if !self.not_present.is_empty() {
            write!(f, "\nnot present: {}", join(&self.not_present))?;
        }
        Ok(())
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} word(s), {} tag assignment(s), {} skipped",
            self.words_loaded,
            self.tags_applied,
            self.skipped.len()
        )
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suggestions = match self {
            Resolution::Found {
                meaning,
                search_count,
            } => {
                return write!(f, "{meaning}\n  searched: {search_count}");
            }
            Resolution::Fetched {
                meaning,
                suggestions,
            } => {
                write!(f, "{meaning}\n  (added from glossary)")?;
                suggestions
            }
            Resolution::NotFound {
                reason,
                suggestions,
            } => {
                write!(f, "{reason}")?;
                suggestions
            }
        };
        if !suggestions.is_empty() {
            write!(f, "\nDid you mean: {}?", suggestions.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for QuizReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}/{}", self.correct, self.asked)?;
        if !self.missed.is_empty() {
            write!(f, "\nReview:")?;
            for missed in &self.missed {
                write!(f, "\n  {}: {}", missed.word, missed.meaning)?;
            }
        }
        Ok(())
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &WordBankArgs) -> Result<()>
where
    T: Serialize + fmt::Display,
{
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: fmt::Display>(message: &str, result: &T, args: &WordBankArgs) -> Result<()> {
    if args.verbosity() > 1 && !message.is_empty() {
        println!("{message}");
    }
    println!("{result}");
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &WordBankArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_view_display() {
        let view = EntryView {
            word: "cat".to_string(),
            meaning: "a small feline".to_string(),
            tags: vec!["animal".to_string(), "pet".to_string()],
            example: None,
            search_count: 3,
        };
        assert_eq!(
            view.to_string(),
            "cat: a small feline\n  tags: animal, pet\n  searched: 3"
        );
    }

    #[test]
    fn test_frequency_list_display() {
        let list = FrequencyList::from(vec![
            (4, vec!["cat".to_string()]),
            (1, vec!["dog".to_string(), "fig".to_string()]),
        ]);
        assert_eq!(list.to_string(), "    4  cat\n    1  dog, fig");
        assert_eq!(FrequencyList::default().to_string(), "(no words)");
    }

    #[test]
    fn test_resolution_display() {
        let resolution = Resolution::NotFound {
            reason: "No word found: \"appel\"".to_string(),
            suggestions: vec!["apple".to_string(), "apply".to_string()],
        };
        assert_eq!(
            resolution.to_string(),
            "No word found: \"appel\"\nDid you mean: apple, apply?"
        );
    }

    #[test]
    fn test_tag_removal_display() {
        let removal = TagRemoval {
            removed: BTreeSet::from(["animal".to_string()]),
            not_present: BTreeSet::from(["pet".to_string()]),
        };
        assert_eq!(removal.to_string(), "removed: animal\nnot present: pet");
    }

    #[test]
    fn test_quiz_report_display() {
        let report = QuizReport {
            asked: 4,
            correct: 3,
            missed: vec![crate::quiz::MissedQuestion {
                word: "kiwi".to_string(),
                meaning: "green fruit".to_string(),
            }],
        };
        assert_eq!(report.to_string(), "Score: 3/4\nReview:\n  kiwi: green fruit");
    }

    #[test]
    fn test_json_shape() {
        let list = MeaningList::from(vec![("cat".to_string(), "feline".to_string())]);
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"{"words":[{"word":"cat","meaning":"feline"}]}"#);
    }
}
