//! This module implements the data loader.
//!
//! A training file has one example per line, written as `label|text`. A query
//! file has one unlabeled text per line. Blank lines are skipped in both.
//!
//! # Example
//! ```rust
//! use dtboost::input::{InputProcessor, LanguageInput};
//!
//! let processor = LanguageInput::default();
//! let example = processor.create_example("nl|Ik heb een vriendje").unwrap();
//! assert_eq!("nl", example.label);
//! assert_eq!(vec![true, false, true, true, true, false, true], example.features);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::decision_tree::{Example, ExampleVec};
use crate::errors::{LearnError, Result};

use log::debug;

/// Separates the label from the text on a training line.
pub const LABEL_SEPARATOR: char = '|';

/// Number of features produced by [`LanguageInput`].
pub const FEATURE_COUNT: usize = 7;

const PRONOUNS: &[&str] = &[
    "ik", "jij", "jou", "jouw", "hij", "zij", "wij", "jullie", "mij", "mijn", "ons", "onze", "hun",
    "haar",
];
const TO_BE: &[&str] = &["ben", "bent", "is", "zijn", "was", "waren", "geweest"];
const TO_HAVE: &[&str] = &["heb", "hebt", "heeft", "hebben", "had", "hadden", "gehad"];

const DEFINITE_ARTICLES: &[&str] = &["de", "het"];
const INDEFINITE_ARTICLE: &str = "een";
const LETTER_PAIRS: &[&str] = &["vr", "jn", "jk", "jf"];
const DOUBLE_LETTERS: &[&str] = &["aa", "ee", "oo", "ll", "kk", "nn", "gg"];

/// Turns raw text into boolean feature vectors.
pub trait InputProcessor {
    fn features(&self, text: &str) -> Vec<bool>;

    /// Parse a `label|text` line. The label is trimmed and the text
    /// lower-cased before the features are computed.
    fn create_example(&self, line: &str) -> Result<Example> {
        let (label, text) = line
            .split_once(LABEL_SEPARATOR)
            .ok_or_else(|| malformed(0, "missing label separator"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(malformed(0, "empty label"));
        }
        Ok(Example::new(self.features(&text.to_lowercase()), label))
    }
}

fn malformed(line: usize, reason: &str) -> LearnError {
    LearnError::MalformedInput {
        line,
        reason: reason.to_string(),
    }
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
}

/// Features that tell Dutch text from English text.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageInput {
    pronouns: Vec<String>,
    to_be: Vec<String>,
    to_have: Vec<String>,
}

impl Default for LanguageInput {
    fn default() -> Self {
        LanguageInput::new(to_owned(PRONOUNS), to_owned(TO_BE), to_owned(TO_HAVE))
    }
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl LanguageInput {
    pub fn new(pronouns: Vec<String>, to_be: Vec<String>, to_have: Vec<String>) -> Self {
        LanguageInput {
            pronouns,
            to_be,
            to_have,
        }
    }

    /// Read the three word lists from one-word-per-line files.
    pub fn from_files<P: AsRef<Path>>(pronouns: P, to_be: P, to_have: P) -> Result<Self> {
        Ok(LanguageInput::new(
            load_word_list(pronouns)?,
            load_word_list(to_be)?,
            load_word_list(to_have)?,
        ))
    }

    fn has_word(&self, text: &str, list: &[String]) -> bool {
        words(text).any(|w| list.iter().any(|l| l == w))
    }
}

impl InputProcessor for LanguageInput {
    /// Expects lower-cased text.
    fn features(&self, text: &str) -> Vec<bool> {
        let contains_any = |list: &[&str]| list.iter().any(|p| text.contains(p));
        vec![
            self.pronouns.iter().any(|p| text.contains(p.as_str())),
            words(text).any(|w| DEFINITE_ARTICLES.iter().any(|a| *a == w)),
            contains_any(LETTER_PAIRS),
            contains_any(DOUBLE_LETTERS),
            words(text).any(|w| w == INDEFINITE_ARTICLE),
            self.has_word(text, &self.to_be),
            self.has_word(text, &self.to_have),
        ]
    }
}

/// Load a word list, one lower-cased word per line.
pub fn load_word_list<P: AsRef<Path>>(file_name: P) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(file_name)?);
    let mut list = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if !word.is_empty() {
            list.push(word);
        }
    }
    Ok(list)
}

/// Load labeled examples from `file_name`.
///
/// # Example
/// ```no_run
/// use dtboost::input::{self, LanguageInput};
/// let train_dv = input::load("train.dat", &LanguageInput::default()).unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: InputProcessor + ?Sized>(
    file_name: P,
    processor: &I,
) -> Result<ExampleVec> {
    let reader = BufReader::new(File::open(file_name)?);
    let mut dv = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let example = processor.create_example(&line).map_err(|e| match e {
            LearnError::MalformedInput { reason, .. } => LearnError::MalformedInput {
                line: idx + 1,
                reason,
            },
            other => other,
        })?;
        dv.push(example);
    }
    debug!("loaded {} examples", dv.len());
    Ok(dv)
}

/// Load unlabeled texts from `file_name` as feature vectors.
pub fn load_queries<P: AsRef<Path>, I: InputProcessor + ?Sized>(
    file_name: P,
    processor: &I,
) -> Result<Vec<Vec<bool>>> {
    let reader = BufReader::new(File::open(file_name)?);
    let mut rows = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(processor.features(&line.to_lowercase()));
    }
    Ok(rows)
}
