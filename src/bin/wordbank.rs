//! wordbank CLI binary.
//!
//! Exit status: 0 on success, 1 when the request itself was wrong (unknown
//! word, duplicate add, bank too small for a quiz), 2 when the bank could not
//! be read, written or trusted.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, debug};

use wordbank::cli::args::*;
use wordbank::cli::commands::*;
use wordbank::error::WordBankError;

/// `WORDBANK_LOG` takes precedence over `-v`/`-q`.
const LOG_ENV: &str = "WORDBANK_LOG";

fn main() -> ExitCode {
    let args = WordBankArgs::parse();

    Builder::new()
        .filter_level(log_level(args.verbosity()))
        .parse_env(LOG_ENV)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    debug!("using bank at {}", args.data.display());
    match execute_command(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(hint) = hint(&e) {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn exit_status(error: &WordBankError) -> u8 {
    if error.is_recoverable() { 1 } else { 2 }
}

fn hint(error: &WordBankError) -> Option<&'static str> {
    match error {
        WordBankError::NoWordFound(_) => Some("`wordbank suggest <WORD>` lists close matches"),
        WordBankError::NotEnoughWordsForQuiz { .. } => {
            Some("add more words with distinct meanings using `wordbank add`")
        }
        WordBankError::Integrity(_) => Some("the snapshot may have been edited by hand"),
        _ => None,
    }
}
