//! Command line argument parsing for the wordbank CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::index::Order;
use crate::quiz::DEFAULT_ROUNDS;

/// wordbank - a personal vocabulary store
#[derive(Parser, Debug, Clone)]
#[command(name = "wordbank")]
#[command(about = "A personal vocabulary store with tags, synonyms and search frequencies")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WordBankArgs {
    /// Snapshot file holding the word bank
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "WORDBANK_DATA",
        default_value = "wordbank.json"
    )]
    pub data: PathBuf,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WordBankArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a new word
    Add(AddArgs),

    /// Delete a word
    Delete(WordArgs),

    /// Remove tags from a word
    #[command(name = "delete-tags")]
    DeleteTags(TagsArgs),

    /// Replace the meaning of a word
    Edit(EditArgs),

    /// Add tags to a word
    Tag(TagsArgs),

    /// Register synonyms for a word
    Synonym(SynonymArgs),

    /// Show or set the usage example of a word
    Example(ExampleArgs),

    /// Look up a word, counting the search
    Search(SearchArgs),

    /// Suggest stored words close to a misspelling
    Suggest(SuggestArgs),

    /// List words starting with a prefix
    Prefix(PrefixArgs),

    /// List every word with its meaning
    List(OrderArgs),

    /// List words grouped by search count
    Frequency(OrderArgs),

    /// List the words carrying a tag
    #[command(name = "tag-words")]
    TagWords(TagArgs),

    /// List the tags of a word
    Tags(WordArgs),

    /// List the synonyms of a word
    Synonyms(WordArgs),

    /// List the most recently added words
    Recent(RecentArgs),

    /// List every tag with its words
    #[command(name = "all-tags")]
    AllTags,

    /// Verify that all indexes agree
    Check,

    /// Take a multiple-choice quiz on stored meanings
    Quiz(QuizArgs),
}

/// Arguments naming a single word
#[derive(Parser, Debug, Clone)]
pub struct WordArgs {
    #[arg(value_name = "WORD")]
    pub word: String,
}

/// Arguments for adding a word
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    #[arg(value_name = "MEANING")]
    pub meaning: String,

    /// Tag to attach (repeatable)
    #[arg(short, long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

/// Arguments for editing a meaning
#[derive(Parser, Debug, Clone)]
pub struct EditArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    #[arg(value_name = "MEANING")]
    pub meaning: String,
}

/// A word followed by one or more tags
#[derive(Parser, Debug, Clone)]
pub struct TagsArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    #[arg(value_name = "TAG", required = true)]
    pub tags: Vec<String>,
}

/// Arguments naming a single tag
#[derive(Parser, Debug, Clone)]
pub struct TagArgs {
    #[arg(value_name = "TAG")]
    pub tag: String,
}

/// Arguments for registering synonyms
#[derive(Parser, Debug, Clone)]
pub struct SynonymArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    #[arg(value_name = "SYNONYM", required = true)]
    pub synonyms: Vec<String>,
}

/// Arguments for the usage example command
#[derive(Parser, Debug, Clone)]
pub struct ExampleArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    /// New example sentence; omit to show the current one
    #[arg(value_name = "EXAMPLE")]
    pub example: Option<String>,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Glossary file (JSON object of word to meaning) consulted on a miss
    #[arg(short, long, value_name = "FILE")]
    pub glossary: Option<PathBuf>,

    /// Maximum number of suggestions
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for closest-word suggestions
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    #[arg(value_name = "WORD")]
    pub word: String,

    /// Maximum number of suggestions
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for prefix search
#[derive(Parser, Debug, Clone)]
pub struct PrefixArgs {
    #[arg(value_name = "PREFIX")]
    pub prefix: String,
}

/// Arguments for ordered listings
#[derive(Parser, Debug, Clone)]
pub struct OrderArgs {
    /// Listing order
    #[arg(short, long, default_value = "ascending")]
    pub order: SortOrder,
}

/// Arguments for the recently added listing
#[derive(Parser, Debug, Clone)]
pub struct RecentArgs {
    /// Number of words to show
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,
}

/// Arguments for the quiz
#[derive(Parser, Debug, Clone)]
pub struct QuizArgs {
    /// Number of questions
    #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
    pub rounds: usize,

    /// Seed for a repeatable quiz
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Listing order
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[value(alias = "asc")]
    Ascending,
    #[value(alias = "desc")]
    Descending,
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => Order::Ascending,
            SortOrder::Descending => Order::Descending,
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_add_command() {
        let args = WordBankArgs::try_parse_from([
            "wordbank",
            "add",
            "serendipity",
            "a happy accident",
            "--tag",
            "noun",
            "-t",
            "favourite",
        ])
        .unwrap();

        if let Command::Add(add_args) = args.command {
            assert_eq!(add_args.word, "serendipity");
            assert_eq!(add_args.meaning, "a happy accident");
            assert_eq!(add_args.tags, vec!["noun", "favourite"]);
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_search_command() {
        let args = WordBankArgs::try_parse_from([
            "wordbank",
            "--data",
            "/tmp/words.json",
            "search",
            "apple",
            "--glossary",
            "glossary.json",
            "--limit",
            "3",
        ])
        .unwrap();

        assert_eq!(args.data, PathBuf::from("/tmp/words.json"));
        if let Command::Search(search_args) = args.command {
            assert_eq!(search_args.word, "apple");
            assert_eq!(search_args.glossary, Some(PathBuf::from("glossary.json")));
            assert_eq!(search_args.limit, Some(3));
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_order_aliases() {
        let args =
            WordBankArgs::try_parse_from(["wordbank", "frequency", "--order", "desc"]).unwrap();

        if let Command::Frequency(order_args) = args.command {
            assert_eq!(Order::from(order_args.order), Order::Descending);
        } else {
            panic!("Expected Frequency command");
        }
    }

    #[test]
    fn test_quiz_command() {
        let args = WordBankArgs::try_parse_from(["wordbank", "quiz"]).unwrap();
        if let Command::Quiz(quiz_args) = args.command {
            assert_eq!(quiz_args.rounds, DEFAULT_ROUNDS);
            assert_eq!(quiz_args.seed, None);
        } else {
            panic!("Expected Quiz command");
        }

        let args =
            WordBankArgs::try_parse_from(["wordbank", "quiz", "-r", "2", "--seed", "9"]).unwrap();
        if let Command::Quiz(quiz_args) = args.command {
            assert_eq!(quiz_args.rounds, 2);
            assert_eq!(quiz_args.seed, Some(9));
        } else {
            panic!("Expected Quiz command");
        }
    }

    #[test]
    fn test_tags_required() {
        assert!(WordBankArgs::try_parse_from(["wordbank", "tag", "apple"]).is_err());
        assert!(WordBankArgs::try_parse_from(["wordbank", "synonym", "big"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = WordBankArgs::try_parse_from(["wordbank", "check"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = WordBankArgs::try_parse_from(["wordbank", "-vvv", "check"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = WordBankArgs::try_parse_from(["wordbank", "-q", "-vv", "check"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }
}
