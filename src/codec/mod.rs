//! Box-file codec: the bidirectional mapping between on-disk per-character
//! rows and the in-memory word-level model.
//!
//! Row grammar, one row per line:
//!
//! ```text
//! <char> <left> <bottom> <right> <top> <page>
//! ```
//!
//! `<char>` is a single glyph; a tab marks a word boundary and its rectangle
//! is the union rectangle of the whole preceding word. `<page>` is ignored on
//! read and always written as 0.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::geometry::Displacements;
use crate::core::model::WordBoxCore;

/// Glyph that terminates a word in the LSTM box format.
pub const WORD_BOUNDARY: char = '\t';

/// Recoverable defects found while parsing. The format tolerates these
/// silently; they are surfaced so callers can report the data loss.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// A line that does not match the row grammar; it is skipped.
    MalformedRow { line: usize, content: String },
    /// Word and terminator-row counts disagree; the zip truncates to the
    /// shorter side and the excess entries are dropped.
    WordCountMismatch { tab_rows: usize, words: usize },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::MalformedRow { line, content } => {
                write!(f, "line {line}: malformed row skipped: {content:?}")
            }
            ParseWarning::WordCountMismatch { tab_rows, words } => {
                write!(
                    f,
                    "word/terminator count mismatch: {tab_rows} terminator rows \
                     vs {words} words; excess entries dropped"
                )
            }
        }
    }
}

/// Result of parsing one box file: the ordered word-level cores plus any
/// defects encountered on the way.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub cores: Vec<WordBoxCore>,
    pub warnings: Vec<ParseWarning>,
}

/// Tokenize one row. Returns `None` when the line fails the grammar.
fn parse_row(line: &str) -> Option<(char, Displacements)> {
    let glyph = line.chars().next()?;
    let rest = &line[glyph.len_utf8()..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let mut fields = rest.split_whitespace();
    // Non-negative decimal, and it must fit the signed displacement type;
    // anything else fails the row rather than wrapping.
    let mut next_value = || {
        let raw: u32 = fields.next()?.parse().ok()?;
        i32::try_from(raw).ok()
    };
    let left = next_value()?;
    let bottom = next_value()?;
    let right = next_value()?;
    let top = next_value()?;
    let _page = next_value()?;
    if fields.next().is_some() {
        return None;
    }
    Some((glyph, Displacements::new(left, top, right, bottom)))
}

/// Parse raw box-file text into word-level cores.
///
/// Character rows are tokenized in order, their glyphs are concatenated and
/// split on the word boundary to recover the words, and each terminator row
/// (whose rectangle bounds the whole preceding word) is rewritten with its
/// word's text.
pub fn parse(raw: &str) -> ParseOutcome {
    let mut warnings = Vec::new();
    let mut character_rows = Vec::new();
    for (idx, line) in raw.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        match parse_row(line) {
            Some((glyph, displacements)) => {
                character_rows.push(WordBoxCore::new(glyph.to_string(), displacements));
            }
            None => warnings.push(ParseWarning::MalformedRow {
                line: idx + 1,
                content: line.to_string(),
            }),
        }
    }

    let joined: String = character_rows.iter().map(|row| row.text.as_str()).collect();
    let words: Vec<&str> = joined.split(WORD_BOUNDARY).collect();
    // A well-formed file ends every word with a tab, leaving one trailing
    // empty element after the split.
    let word_count = match words.last() {
        Some(last) if last.is_empty() => words.len() - 1,
        _ => words.len(),
    };

    let terminator_rows: Vec<WordBoxCore> = character_rows
        .into_iter()
        .filter(|row| row.text.chars().next() == Some(WORD_BOUNDARY))
        .collect();

    if word_count != terminator_rows.len() {
        warnings.push(ParseWarning::WordCountMismatch {
            tab_rows: terminator_rows.len(),
            words: word_count,
        });
    }

    let cores = terminator_rows
        .into_iter()
        .zip(words)
        .map(|(mut row, word)| {
            row.text = word.to_string();
            row
        })
        .collect();

    ParseOutcome { cores, warnings }
}

/// Serialize word-level cores back to per-character rows, in order.
pub fn serialize<'a, I>(cores: I) -> String
where
    I: IntoIterator<Item = &'a WordBoxCore>,
{
    cores
        .into_iter()
        .map(WordBoxCore::file_representation)
        .collect()
}

/// Read and parse a box file from disk.
pub fn load(path: &Path) -> Result<ParseOutcome> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read box file: {}", path.display()))?;
    Ok(parse(&raw))
}

/// Serialize cores and write them to disk.
pub fn save(path: &Path, cores: &[WordBoxCore]) -> Result<()> {
    fs::write(path, serialize(cores))
        .with_context(|| format!("failed to write box file: {}", path.display()))
}
