//! Command implementations for the wordbank CLI.
//!
//! Every command loads the snapshot named by `--data`, runs one operation and
//! writes the snapshot back only if the operation changed the bank.

use std::io;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::WordBankConfig;
use crate::error::Result;
use crate::lookup::{GlossarySource, MeaningSource, Resolution, resolve_meaning};
use crate::quiz::{generate_quiz, run_quiz};
use crate::snapshot::{load_bank, save_bank};
use crate::store::WordBank;

/// Execute a CLI command.
pub fn execute_command(args: WordBankArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => WordBankConfig::from_json_file(path)?,
        None => WordBankConfig::default(),
    };

    let (mut bank, report) = load_bank(&args.data, config)?;
    if !report.skipped.is_empty() {
        warn!("loaded {} with problems: {report}", args.data.display());
    }

    let mutated = run_command(&mut bank, &args)?;
    if mutated {
        save_bank(&bank, &args.data)?;
    } else {
        debug!("bank unchanged, not saving");
    }
    Ok(())
}

/// Run one command against an already loaded bank. Returns true if the bank
/// was changed.
pub fn run_command(bank: &mut WordBank, args: &WordBankArgs) -> Result<bool> {
    match &args.command {
        Command::Add(add_args) => add_word(add_args, bank, args),
        Command::Delete(word_args) => delete_word(word_args, bank, args),
        Command::DeleteTags(tags_args) => delete_tags(tags_args, bank, args),
        Command::Edit(edit_args) => edit_meaning(edit_args, bank, args),
        Command::Tag(tags_args) => add_tags(tags_args, bank, args),
        Command::Synonym(synonym_args) => add_synonyms(synonym_args, bank, args),
        Command::Example(example_args) => example(example_args, bank, args),
        Command::Search(search_args) => search(search_args, bank, args),
        Command::Suggest(suggest_args) => suggest(suggest_args, bank, args),
        Command::Prefix(prefix_args) => search_prefix(prefix_args, bank, args),
        Command::List(order_args) => list_words(order_args, bank, args),
        Command::Frequency(order_args) => list_by_frequency(order_args, bank, args),
        Command::TagWords(tag_args) => words_for_tag(tag_args, bank, args),
        Command::Tags(word_args) => tags_for_word(word_args, bank, args),
        Command::Synonyms(word_args) => synonyms_for_word(word_args, bank, args),
        Command::Recent(recent_args) => recently_added(recent_args, bank, args),
        Command::AllTags => all_tags(bank, args),
        Command::Check => check(bank, args),
        Command::Quiz(quiz_args) => quiz(quiz_args, bank, args),
    }
}

fn add_word(args: &AddArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let entry = bank.add_word_with_tags(&args.word, &args.meaning, &args.tags)?;
    output_result("Word added", &EntryView::from(&entry), cli_args)?;
    Ok(true)
}

fn delete_word(args: &WordArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let entry = bank.delete_word(&args.word)?;
    output_result("Word deleted", &EntryView::from(&entry), cli_args)?;
    Ok(true)
}

fn delete_tags(args: &TagsArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let removal = bank.delete_tags(&args.word, &args.tags)?;
    output_result("Tags deleted", &removal, cli_args)?;
    Ok(!removal.removed.is_empty())
}

fn edit_meaning(args: &EditArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let entry = bank.edit_meaning(&args.word, &args.meaning)?;
    output_result("Meaning updated", &EntryView::from(&entry), cli_args)?;
    Ok(true)
}

fn add_tags(args: &TagsArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let tags = bank.add_tags(&args.word, &args.tags)?;
    output_result("Tags added", &NamedSet::new(&args.word, tags), cli_args)?;
    Ok(true)
}

fn add_synonyms(args: &SynonymArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let synonyms = bank.add_synonyms(&args.word, &args.synonyms)?;
    output_result("Synonyms added", &NamedSet::new(&args.word, synonyms), cli_args)?;
    Ok(true)
}

fn example(args: &ExampleArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    match &args.example {
        Some(example) => {
            let entry = bank.add_example(&args.word, example)?;
            let view = ExampleView {
                word: entry.word().to_string(),
                example: entry.example().map(str::to_string),
            };
            output_result("Example added", &view, cli_args)?;
            Ok(true)
        }
        None => {
            let view = ExampleView {
                word: args.word.clone(),
                example: bank.search_example(&args.word)?.map(str::to_string),
            };
            output_result("Example", &view, cli_args)?;
            Ok(false)
        }
    }
}

fn search(args: &SearchArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let glossary = args
        .glossary
        .as_ref()
        .map(GlossarySource::from_json_file)
        .transpose()?;
    let source = glossary.as_ref().map(|g| g as &dyn MeaningSource);

    let resolution = resolve_meaning(bank, source, &args.word, args.limit)?;
    output_result("Search result", &resolution, cli_args)?;
    Ok(!matches!(resolution, Resolution::NotFound { .. }))
}

fn suggest(args: &SuggestArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let words = bank.suggest_closest(&args.word, args.limit);
    output_result("Closest words", &WordList { words }, cli_args)?;
    Ok(false)
}

fn search_prefix(args: &PrefixArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let words = bank.search_prefix(&args.prefix)?;
    output_result("Matching words", &WordList { words }, cli_args)?;
    Ok(false)
}

fn list_words(args: &OrderArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let list = MeaningList::from(bank.list_words(args.order.into()));
    output_result("Words", &list, cli_args)?;
    Ok(false)
}

fn list_by_frequency(
    args: &OrderArgs,
    bank: &mut WordBank,
    cli_args: &WordBankArgs,
) -> Result<bool> {
    let list = FrequencyList::from(bank.list_by_frequency(args.order.into()));
    output_result("Search frequency", &list, cli_args)?;
    Ok(false)
}

fn words_for_tag(args: &TagArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let words = bank.words_for_tag(&args.tag)?;
    output_result("Words tagged", &NamedSet::new(&args.tag, words), cli_args)?;
    Ok(false)
}

fn tags_for_word(args: &WordArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let tags = bank.tags_for_word(&args.word)?;
    output_result("Tags of word", &NamedSet::new(&args.word, tags), cli_args)?;
    Ok(false)
}

fn synonyms_for_word(
    args: &WordArgs,
    bank: &mut WordBank,
    cli_args: &WordBankArgs,
) -> Result<bool> {
    let synonyms = bank.synonyms_for_word(&args.word)?;
    output_result("Synonyms", &NamedSet::new(&args.word, synonyms), cli_args)?;
    Ok(false)
}

fn recently_added(args: &RecentArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let list = EntryList {
        entries: bank
            .recently_added(args.count)
            .iter()
            .map(EntryView::from)
            .collect(),
    };
    output_result("Recently added", &list, cli_args)?;
    Ok(false)
}

fn all_tags(bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let list = TagList {
        tags: bank
            .all_tags()
            .into_iter()
            .map(|(tag, words)| NamedSet {
                name: tag,
                members: words,
            })
            .collect(),
    };
    output_result("Tags", &list, cli_args)?;
    Ok(false)
}

fn check(bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    bank.verify_integrity()?;
    let result = CheckResult {
        words: bank.len(),
        tags: bank.tag_count(),
        words_with_synonyms: bank.synonym_index().len(),
        frequency_buckets: bank.frequency_index().len(),
    };
    output_result("Integrity check passed", &result, cli_args)?;
    Ok(false)
}

fn quiz(args: &QuizArgs, bank: &mut WordBank, cli_args: &WordBankArgs) -> Result<bool> {
    let questions = match args.seed {
        Some(seed) => generate_quiz(bank, &mut StdRng::seed_from_u64(seed), args.rounds)?,
        None => generate_quiz(bank, &mut rand::rng(), args.rounds)?,
    };
    let report = run_quiz(&questions, io::stdin().lock(), io::stdout().lock())?;
    output_result("Quiz finished", &report, cli_args)?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WordBankError;
    use crate::snapshot::Snapshot;
    use clap::Parser;
    use std::path::Path;
    use tempfile::TempDir;

    fn run(data: &Path, argv: &[&str]) -> Result<()> {
        let data = data.to_string_lossy().to_string();
        let mut full = vec!["wordbank", "-q", "--data", data.as_str()];
        full.extend_from_slice(argv);
        execute_command(WordBankArgs::try_parse_from(full).unwrap())
    }

    #[test]
    fn test_add_then_search_persists_count() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("bank.json");

        run(&data, &["add", "Cat", "a small feline", "-t", "animal"]).unwrap();
        run(&data, &["search", "cat"]).unwrap();
        run(&data, &["search", "cat"]).unwrap();

        let (bank, _) = Snapshot::load(&data)
            .unwrap()
            .restore(WordBankConfig::default());
        assert_eq!(bank.get("cat").unwrap().search_count(), 3);
        assert!(bank.words_for_tag("animal").unwrap().contains("cat"));
    }

    #[test]
    fn test_read_only_command_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("bank.json");

        run(&data, &["list"]).unwrap();
        assert!(!data.exists());
    }

    #[test]
    fn test_duplicate_add_fails() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("bank.json");

        run(&data, &["add", "cat", "feline"]).unwrap();
        let err = run(&data, &["add", "CAT", "other"]).unwrap_err();
        assert!(matches!(err, WordBankError::WordAlreadyExists(_)));
    }

    #[test]
    fn test_search_with_glossary_adds_word() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("bank.json");
        let glossary = dir.path().join("glossary.json");
        std::fs::write(&glossary, r#"{"ephemeral": "lasting a short time"}"#).unwrap();

        run(
            &data,
            &["search", "ephemeral", "--glossary", glossary.to_str().unwrap()],
        )
        .unwrap();

        let (bank, _) = Snapshot::load(&data)
            .unwrap()
            .restore(WordBankConfig::default());
        assert_eq!(bank.search_meaning("ephemeral").unwrap(), "lasting a short time");
    }

    #[test]
    fn test_run_command_reports_mutation() {
        let mut bank = WordBank::new();
        bank.add_word("cat", "feline").unwrap();

        let args = WordBankArgs::try_parse_from(["wordbank", "-q", "prefix", "ca"]).unwrap();
        assert!(!run_command(&mut bank, &args).unwrap());

        let args =
            WordBankArgs::try_parse_from(["wordbank", "-q", "delete-tags", "cat", "pet"]).unwrap();
        assert!(!run_command(&mut bank, &args).unwrap());

        let args = WordBankArgs::try_parse_from(["wordbank", "-q", "tag", "cat", "pet"]).unwrap();
        assert!(run_command(&mut bank, &args).unwrap());
    }

    #[test]
    fn test_read_only_commands_verbose() {
        let mut bank = WordBank::new();
        bank.add_word_with_tags("cat", "feline", ["pet"]).unwrap();
        bank.add_synonym("cat", "kitty").unwrap();
        bank.add_example("cat", "The cat sat.").unwrap();

        for argv in [
            vec!["example", "cat"],
            vec!["tag-words", "pet"],
            vec!["tags", "cat"],
            vec!["synonyms", "cat"],
        ] {
            let mut full = vec!["wordbank", "-vv"];
            full.extend(argv);
            let args = WordBankArgs::try_parse_from(full).unwrap();
            assert!(!run_command(&mut bank, &args).unwrap());
        }

        let args = WordBankArgs::try_parse_from(["wordbank", "-vv", "search", "cat"]).unwrap();
        assert!(run_command(&mut bank, &args).unwrap());
        assert_eq!(bank.get("cat").unwrap().search_count(), 2);
    }

    #[test]
    fn test_quiz_needs_enough_words() {
        let mut bank = WordBank::new();
        bank.add_word("cat", "feline").unwrap();
        bank.add_word("dog", "canine").unwrap();

        let args =
            WordBankArgs::try_parse_from(["wordbank", "-q", "quiz", "--seed", "1"]).unwrap();
        let err = run_command(&mut bank, &args).unwrap_err();
        assert!(matches!(
            err,
            WordBankError::NotEnoughWordsForQuiz {
                required: 4,
                available: 2
            }
        ));
        assert!(err.is_recoverable());
    }
}
