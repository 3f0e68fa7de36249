//! Multiple-choice meaning quizzes over the stored words.
//!
//! Each question shows one stored word and [`OPTION_COUNT`] meanings: the
//! word's own meaning and distractors drawn from other entries. Distractors
//! are distinct from each other and from the correct meaning, so a bank needs
//! at least [`OPTION_COUNT`] distinct meanings before a quiz can be built.

use std::collections::BTreeSet;
use std::fmt;
use std::io::{BufRead, Write};

use log::debug;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::{Result, WordBankError};
use crate::index::Order;
use crate::store::WordBank;

/// Number of options per question.
pub const OPTION_COUNT: usize = 4;

/// Number of questions in a quiz unless asked otherwise.
pub const DEFAULT_ROUNDS: usize = 4;

/// One multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub word: String,
    pub options: Vec<String>,
    /// Index of the correct meaning in `options`.
    pub answer: usize,
}

impl QuizQuestion {
    pub fn correct_meaning(&self) -> &str {
        &self.options[self.answer]
    }

    /// `choice` is 1-based, as the options are shown.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer + 1
    }
}

impl fmt::Display for QuizQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "What is the meaning of \"{}\"?", self.word)?;
        for (i, option) in self.options.iter().enumerate() {
            write!(f, "\n  {}. {option}", i + 1)?;
        }
        Ok(())
    }
}

/// A question answered wrongly, kept for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissedQuestion {
    pub word: String,
    pub meaning: String,
}

/// Outcome of [`run_quiz`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizReport {
    pub asked: usize,
    pub correct: usize,
    pub missed: Vec<MissedQuestion>,
}

/// Build one question about a random stored word.
pub fn generate_question<R: Rng + ?Sized>(bank: &WordBank, rng: &mut R) -> Result<QuizQuestion> {
    let entries: Vec<&Entry> = bank.primary_index().iter(Order::Ascending).collect();
    check_bank_size(&entries)?;

    let entry = entries
        .choose(rng)
        .ok_or_else(|| WordBankError::not_enough_words_for_quiz(OPTION_COUNT, 0))?;
    question_for(entry, &entries, rng)
}

/// Build `rounds` questions about distinct random words. Asks about every
/// word once if the bank holds fewer than `rounds`.
pub fn generate_quiz<R: Rng + ?Sized>(
    bank: &WordBank,
    rng: &mut R,
    rounds: usize,
) -> Result<Vec<QuizQuestion>> {
    if rounds == 0 {
        return Err(WordBankError::invalid_argument(
            "a quiz needs at least one round",
        ));
    }
    let entries: Vec<&Entry> = bank.primary_index().iter(Order::Ascending).collect();
    check_bank_size(&entries)?;

    let picked: Vec<&Entry> = entries.choose_multiple(rng, rounds).copied().collect();
    let questions = picked
        .into_iter()
        .map(|entry| question_for(entry, &entries, rng))
        .collect::<Result<Vec<_>>>()?;

    debug!("generated a quiz of {} question(s)", questions.len());
    Ok(questions)
}

fn check_bank_size(entries: &[&Entry]) -> Result<()> {
    if entries.len() < OPTION_COUNT {
        return Err(WordBankError::not_enough_words_for_quiz(
            OPTION_COUNT,
            entries.len(),
        ));
    }
    Ok(())
}

fn question_for<R: Rng + ?Sized>(
    entry: &Entry,
    entries: &[&Entry],
    rng: &mut R,
) -> Result<QuizQuestion> {
    let meaning = entry.meaning();
    let pool: Vec<&str> = entries
        .iter()
        .map(|other| other.meaning())
        .filter(|other| *other != meaning)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if pool.len() < OPTION_COUNT - 1 {
        return Err(WordBankError::not_enough_words_for_quiz(
            OPTION_COUNT,
            pool.len() + 1,
        ));
    }

    let mut options: Vec<String> = pool
        .choose_multiple(rng, OPTION_COUNT - 1)
        .map(|other| other.to_string())
        .collect();
    options.push(meaning.to_string());
    options.shuffle(rng);

    let answer = options
        .iter()
        .position(|option| option == meaning)
        .unwrap_or(OPTION_COUNT - 1);
    Ok(QuizQuestion {
        word: entry.word().to_string(),
        options,
        answer,
    })
}

/// Ask `questions` one by one, reading 1-based answers from `input`.
///
/// Answers that are not an option number are re-asked. End of input stops the
/// quiz early; only questions actually answered are counted.
pub fn run_quiz<B, W>(questions: &[QuizQuestion], mut input: B, mut output: W) -> Result<QuizReport>
where
    B: BufRead,
    W: Write,
{
    let mut report = QuizReport::default();

    'questions: for question in questions {
        writeln!(output, "{question}")?;
        let choice = loop {
            write!(output, "Your answer (1-{}): ", question.options.len())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break 'questions;
            }
            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=question.options.len()).contains(&choice) => break choice,
                _ => writeln!(
                    output,
                    "Please answer with a number from 1 to {}.",
                    question.options.len()
                )?,
            }
        };

        report.asked += 1;
        if question.is_correct(choice) {
            report.correct += 1;
            writeln!(output, "Correct!")?;
        } else {
            writeln!(output, "Wrong, it means: {}", question.correct_meaning())?;
            report.missed.push(MissedQuestion {
                word: question.word.clone(),
                meaning: question.correct_meaning().to_string(),
            });
        }
    }

    Ok(report)
}
