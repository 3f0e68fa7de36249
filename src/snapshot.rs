//! JSON snapshots of a word bank.
//!
//! A snapshot stores only primary data: entries (with their search counts and
//! examples), tag memberships and synonym sets. Derived indexes are rebuilt on
//! restore by replaying the records through the normal [`WordBank`] API, so a
//! hand-edited file cannot produce an incoherent bank; records that do not
//! apply are skipped and reported.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ahash::AHashSet;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::WordBankConfig;
use crate::entry::normalize_word;
use crate::error::Result;
use crate::index::Order;
use crate::store::{LoadReport, WordBank};

/// One stored word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default)]
    pub search_count: Option<u64>,
}

/// A tag and the words carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub tag: String,
    pub words: Vec<String>,
}

/// A word and its registered synonyms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymRecord {
    pub word: String,
    pub synonyms: Vec<String>,
}

/// Serializable state of a [`WordBank`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Words in the order they were added.
    pub words: Vec<WordRecord>,
    pub tags: Vec<TagRecord>,
    pub synonyms: Vec<SynonymRecord>,
}

impl Snapshot {
    /// Capture the primary data of `bank`.
    pub fn capture(bank: &WordBank) -> Self {
        let mut entries: Vec<_> = bank.primary_index().iter(Order::Ascending).collect();
        entries.sort_by_key(|entry| entry.added_seq());

        let words = entries
            .into_iter()
            .map(|entry| WordRecord {
                word: entry.word().to_string(),
                meaning: entry.meaning().to_string(),
                example: entry.example().map(str::to_string),
                search_count: Some(entry.search_count()),
            })
            .collect();

        let tags = bank
            .all_tags()
            .into_iter()
            .map(|(tag, words)| TagRecord { tag, words })
            .collect();

        let mut synonyms: Vec<SynonymRecord> = bank
            .synonym_index()
            .keys()
            .filter_map(|word| {
                bank.synonym_index().get(word).map(|set| SynonymRecord {
                    word: word.to_string(),
                    synonyms: set.iter().cloned().collect(),
                })
            })
            .collect();
        synonyms.sort_by(|a, b| a.word.cmp(&b.word));

        Snapshot {
            words,
            tags,
            synonyms,
        }
    }

    /// Build a bank from this snapshot.
    pub fn restore(&self, config: WordBankConfig) -> (WordBank, LoadReport) {
        let mut bank = WordBank::with_config(config);
        let mut report = bank.bulk_load(
            self.words
                .iter()
                .map(|record| (record.word.as_str(), record.meaning.as_str())),
            self.tags.iter().map(|record| {
                (
                    record.tag.as_str(),
                    record.words.iter().map(String::as_str),
                )
            }),
        );

        // bulk_load keeps the first record per word that has a meaning; only
        // that record's example and count belong to the stored entry.
        let mut applied = AHashSet::new();
        for record in &self.words {
            let key = normalize_word(&record.word);
            if key.is_empty() || record.meaning.trim().is_empty() || !bank.contains(&key) {
                continue;
            }
            if !applied.insert(key) {
                continue;
            }
            if let Some(example) = &record.example
                && let Err(e) = bank.add_example(&record.word, example)
            {
                warn!("skipping example of {:?}: {e}", record.word);
                report
                    .skipped
                    .push(format!("example of {:?}: {e}", record.word));
            }
            match record.search_count {
                Some(0) => {
                    warn!("skipping zero search count of {:?}", record.word);
                    report
                        .skipped
                        .push(format!("search count of {:?}: must be positive", record.word));
                }
                Some(count) => {
                    if let Err(e) = bank.restore_search_count(&record.word, count) {
                        warn!("skipping search count of {:?}: {e}", record.word);
                        report
                            .skipped
                            .push(format!("search count of {:?}: {e}", record.word));
                    }
                }
                None => {}
            }
        }

        for record in &self.synonyms {
            if record.synonyms.is_empty() {
                continue;
            }
            if let Err(e) = bank.add_synonyms(&record.word, &record.synonyms) {
                warn!("skipping synonyms of {:?}: {e}", record.word);
                report
                    .skipped
                    .push(format!("synonyms of {:?}: {e}", record.word));
            }
        }

        (bank, report)
    }

    /// Write the snapshot as pretty JSON, atomically replacing `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let parent = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            serde_json::to_writer_pretty(&mut writer, self)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        temp_file.persist(path).map_err(|e| e.error)?;

        info!(
            "saved {} word(s) and {} tag(s) to {}",
            self.words.len(),
            self.tags.len(),
            path.display()
        );
        Ok(())
    }

    /// Read a snapshot from `path`. A missing file is an empty snapshot.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("{} does not exist, starting empty", path.display());
            return Ok(Snapshot::default());
        }

        let reader = BufReader::new(File::open(path)?);
        let snapshot: Snapshot = serde_json::from_reader(reader)?;

        info!(
            "loaded {} word(s) and {} tag(s) from {}",
            snapshot.words.len(),
            snapshot.tags.len(),
            path.display()
        );
        Ok(snapshot)
    }
}

/// Load and restore a bank in one step.
pub fn load_bank<P: AsRef<Path>>(path: P, config: WordBankConfig) -> Result<(WordBank, LoadReport)> {
    Ok(Snapshot::load(path)?.restore(config))
}

/// Capture and save a bank in one step.
pub fn save_bank<P: AsRef<Path>>(bank: &WordBank, path: P) -> Result<()> {
    Snapshot::capture(bank).save(path)
}
