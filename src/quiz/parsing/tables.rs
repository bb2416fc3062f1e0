//! Table grammars
//!
//!     Word-document tests lay every question out as a header paragraph, the question text,
//!     an instructional sentence and a table:
//!
//!         Задание №1
//!         Сколько будет 2+2?
//!         Выберите один правильный вариант
//!         | 1 | - | 3 |
//!         | 2 | + | 4 |
//!
//!     The instructional sentence decides how the table is read:
//!
//!         - Choice ("Выберите ... вариант", "Choose ... variant"): rows of
//!           `(index, +/-, text)`.
//!         - Sequence ("Укажите порядок ...", "Indicate the order ..."): rows of
//!           `(index, text)` in scrambled order; the order comes from the answer key.
//!         - Matching ("Укажите соответствие ...", "Indicate correspondence ..."): rows of
//!           `(index, left label, left text, right label, right text)`; the pairing comes
//!           from the answer key.
//!
//!     Question text may itself open like an instruction ("Укажите правильный порядок
//!     действий..."); the instruction is the last instruction-like sentence before the table.
//!
//!     The answer key is a trailing table keyed by question number, see
//!     [answer_key](super::answer_key). Questions of all three kinds may be mixed in one
//!     document.
//!
//! Strictness
//!
//!     Any shape problem (wrong column count, bad marker, header without instruction,
//!     instruction without table, missing key) fails the whole document with
//!     `MalformedTable`. No partially populated questions are ever returned.

use super::answer_key::{parse_order, parse_pairs, AnswerKey};
use crate::quiz::document::{Node, SourceDocument, Table};
use crate::quiz::error::ParseError;
use crate::quiz::lexing::line_classification::normalize_label;
use crate::quiz::model::{Answer, Question};
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_TASK_HEADERS: &[&str] = &[r"Задание\s*№", r"Вопрос\s*№", r"Task\s*(?:№|No\.?|#)"];
pub const DEFAULT_CHOICE_INSTRUCTIONS: &[&str] = &[
    r"Выберите\b[^.]*\bвариант",
    r"Choose\b[^.]*\bvariant",
    r"Select\b[^.]*\b(?:variant|option|answer)",
];
pub const DEFAULT_SEQUENCE_INSTRUCTIONS: &[&str] = &[
    r"Укажите\s+(?:правильный\s+)?порядок",
    r"Установите\s+(?:правильную\s+)?последовательность",
    r"Indicate\s+the\s+order",
];
pub const DEFAULT_MATCHING_INSTRUCTIONS: &[&str] = &[
    r"Укажите\s+соответствие",
    r"Установите\s+соответствие",
    r"Indicate\s+(?:the\s+)?correspondence",
];

static DEFAULT_MARKERS: Lazy<Result<TableMarkers, regex::Error>> = Lazy::new(|| {
    TableMarkers::from_patterns(
        DEFAULT_TASK_HEADERS,
        DEFAULT_CHOICE_INSTRUCTIONS,
        DEFAULT_SEQUENCE_INSTRUCTIONS,
        DEFAULT_MATCHING_INSTRUCTIONS,
    )
});

/// How a question's table is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Choice,
    Sequence,
    Matching,
}

/// Localized phrases that drive the table grammars
#[derive(Debug, Clone)]
pub struct TableMarkers {
    task_header: Regex,
    choice: Regex,
    sequence: Regex,
    matching: Regex,
}

impl TableMarkers {
    /// Compile markers from regex sources. Each list is an alternation; matching is
    /// case-insensitive.
    pub fn from_patterns<S: AsRef<str>>(
        task_headers: &[S],
        choice: &[S],
        sequence: &[S],
        matching: &[S],
    ) -> Result<Self, regex::Error> {
        let task_header = Regex::new(&format!(
            r"(?is)^\s*(?:{})\s*(?P<number>\d+)?\s*[.:)]?\s*(?P<rest>.*)$",
            alternation(task_headers)
        ))?;
        let instruction = |patterns: &[S]| {
            Regex::new(&format!(
                r"(?i)(?:^|[.?!:]\s+)(?P<instruction>{})",
                alternation(patterns)
            ))
        };
        Ok(Self {
            task_header,
            choice: instruction(choice)?,
            sequence: instruction(sequence)?,
            matching: instruction(matching)?,
        })
    }

    /// The question header in `paragraph`, if any: `(number, remaining text)`
    fn header<'a>(&self, paragraph: &'a str) -> Option<(Option<usize>, &'a str)> {
        let caps = self.task_header.captures(paragraph)?;
        let number = caps.name("number").and_then(|m| m.as_str().parse().ok());
        let rest = caps.name("rest").map_or("", |m| m.as_str().trim());
        Some((number, rest))
    }

    /// The last instructional sentence in `paragraph`: `(kind, byte offset where it starts)`
    fn instruction(&self, paragraph: &str) -> Option<(TableKind, usize)> {
        [
            (TableKind::Sequence, &self.sequence),
            (TableKind::Matching, &self.matching),
            (TableKind::Choice, &self.choice),
        ]
        .into_iter()
        .filter_map(|(kind, regex)| {
            let start = regex
                .captures_iter(paragraph)
                .filter_map(|caps| caps.name("instruction").map(|m| m.start()))
                .last()?;
            Some((kind, start))
        })
        .max_by_key(|(_, start)| *start)
    }

    /// Cheap detection: does any paragraph open a question?
    pub fn has_task_header(&self, document: &SourceDocument) -> bool {
        document.paragraphs().any(|p| self.task_header.is_match(p))
    }
}

impl Default for TableMarkers {
    fn default() -> Self {
        match &*DEFAULT_MARKERS {
            Ok(markers) => markers.clone(),
            Err(err) => unreachable!("built-in table markers must compile: {err}"),
        }
    }
}

fn alternation<S: AsRef<str>>(patterns: &[S]) -> String {
    patterns
        .iter()
        .map(|p| format!("(?:{})", p.as_ref()))
        .collect::<Vec<_>>()
        .join("|")
}

#[derive(Debug)]
struct TableQuestion<'a> {
    number: usize,
    text: String,
    kind: TableKind,
    table: &'a Table,
}

#[derive(Debug)]
enum Pending {
    None,
    Open { number: usize, paragraphs: Vec<String> },
}

/// Parse a table-laid-out document.
///
/// Returns an empty list when the document has no question headers.
pub fn parse_table_document(
    document: &SourceDocument,
    markers: &TableMarkers,
) -> Result<Vec<Question>, ParseError> {
    let mut questions: Vec<TableQuestion<'_>> = Vec::new();
    let mut key = AnswerKey::default();
    let mut pending = Pending::None;
    let mut ordinal = 0;

    for node in document.nodes().iter().filter(|n| !n.is_blank()) {
        pending = match (pending, node) {
            (pending, Node::Paragraph(paragraph)) if markers.header(paragraph).is_some() => {
                if let Some(number) = pending.number() {
                    return Err(ParseError::malformed(number, "question has no answer table"));
                }
                ordinal += 1;
                let (number, rest) = markers.header(paragraph).unwrap_or((None, ""));
                Pending::Open {
                    number: number.unwrap_or(ordinal),
                    paragraphs: vec![rest.to_string()],
                }
            }
            (Pending::Open { number, mut paragraphs }, Node::Paragraph(paragraph)) => {
                paragraphs.push(paragraph.clone());
                Pending::Open { number, paragraphs }
            }
            (Pending::None, Node::Paragraph(_)) => Pending::None,

            (Pending::Open { number, paragraphs }, Node::Table(table)) => {
                let (text, kind) = split_instruction(markers, &paragraphs).ok_or_else(|| {
                    ParseError::malformed(number, "table is not preceded by an instructional sentence")
                })?;
                questions.push(TableQuestion {
                    number,
                    text,
                    kind,
                    table,
                });
                Pending::None
            }
            (Pending::None, Node::Table(table)) => {
                if let Some(found) = AnswerKey::from_table(table) {
                    key = found;
                }
                Pending::None
            }
        };
    }

    if let Some(number) = pending.number() {
        return Err(ParseError::malformed(number, "question has no answer table"));
    }

    tracing::debug!(
        questions = questions.len(),
        key_entries = key.len(),
        "table document scanned"
    );

    questions
        .into_iter()
        .map(|question| {
            let built = match question.kind {
                TableKind::Choice => build_choice(&question)?,
                TableKind::Sequence => build_sequence(&question, &key)?,
                TableKind::Matching => build_matching(&question, &key)?,
            };
            built
                .validate()
                .map_err(|err| ParseError::malformed(question.number, err.to_string()))?;
            Ok(built)
        })
        .collect()
}

impl Pending {
    fn number(&self) -> Option<usize> {
        match self {
            Pending::None => None,
            Pending::Open { number, .. } => Some(*number),
        }
    }
}

/// Separate the question text from the instructional sentence.
///
/// The instruction is the last instruction-like sentence before the table; earlier ones are
/// part of the question text, as are paragraphs between the instruction and the table.
fn split_instruction(markers: &TableMarkers, paragraphs: &[String]) -> Option<(String, TableKind)> {
    let (at, (kind, start)) = paragraphs
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, p)| markers.instruction(p).map(|found| (i, found)))?;

    let mut text = String::new();
    for paragraph in &paragraphs[..at] {
        push_line(&mut text, paragraph);
    }
    push_line(&mut text, &paragraphs[at][..start]);
    for paragraph in &paragraphs[at + 1..] {
        push_line(&mut text, paragraph);
    }
    Some((text, kind))
}

fn push_line(text: &mut String, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    if !text.is_empty() {
        text.push('\n');
    }
    text.push_str(line);
}

/// Data rows of an answer table.
///
/// A leading row is a header only when its index cell is not a number while every row after
/// it is numbered, and (for choice tables) its marker cell is not a `+`/`-` marker.
fn data_rows(table: &Table, marker_column: Option<usize>) -> &[Vec<String>] {
    let index_of = |row: &Vec<String>| parse_index(row.first().map_or("", String::as_str));
    match table.rows.split_first() {
        Some((first, rest))
            if index_of(first).is_none()
                && !rest.is_empty()
                && rest.iter().all(|row| index_of(row).is_some())
                && marker_column
                    .and_then(|column| first.get(column))
                    .map_or(true, |cell| parse_marker(cell).is_none()) =>
        {
            rest
        }
        _ => &table.rows,
    }
}

fn parse_marker(cell: &str) -> Option<bool> {
    match cell.trim() {
        "+" => Some(true),
        "-" | "−" | "–" => Some(false),
        _ => None,
    }
}

fn parse_index(cell: &str) -> Option<usize> {
    cell.trim()
        .trim_end_matches(['.', ')'])
        .parse()
        .ok()
}

fn expect_columns(question: &TableQuestion<'_>, row: &[String], expected: usize) -> Result<(), ParseError> {
    if row.len() == expected {
        Ok(())
    } else {
        Err(ParseError::malformed(
            question.number,
            format!("expected {expected} columns, found {}", row.len()),
        ))
    }
}

fn build_choice(question: &TableQuestion<'_>) -> Result<Question, ParseError> {
    let mut answers = Vec::new();
    for row in data_rows(question.table, Some(1)) {
        expect_columns(question, row, 3)?;
        let correct = parse_marker(&row[1]).ok_or_else(|| {
            ParseError::malformed(
                question.number,
                format!("'{}' is not a +/- correctness marker", row[1].trim()),
            )
        })?;
        answers.push(Answer::new(row[2].trim(), correct));
    }
    Ok(Question::choice(question.text.clone(), answers))
}

fn key_value<'k>(question: &TableQuestion<'_>, key: &'k AnswerKey) -> Result<&'k str, ParseError> {
    key.get(question.number)
        .ok_or_else(|| ParseError::malformed(question.number, "no answer-key entry"))
}

fn build_sequence(question: &TableQuestion<'_>, key: &AnswerKey) -> Result<Question, ParseError> {
    let mut rows: Vec<(usize, &str)> = Vec::new();
    for row in data_rows(question.table, None) {
        expect_columns(question, row, 2)?;
        let index = parse_index(&row[0]).ok_or_else(|| {
            ParseError::malformed(question.number, format!("'{}' is not a row index", row[0]))
        })?;
        if rows.iter().any(|(seen, _)| *seen == index) {
            return Err(ParseError::malformed(
                question.number,
                format!("row index {index} appears twice"),
            ));
        }
        rows.push((index, row[1].trim()));
    }

    let order = parse_order(key_value(question, key)?)
        .map_err(|reason| ParseError::malformed(question.number, reason))?;

    let mut positions: Vec<Option<usize>> = vec![None; rows.len()];
    for (position, answer_index) in order {
        let slot = rows
            .iter()
            .position(|(index, _)| *index == answer_index)
            .ok_or_else(|| {
                ParseError::malformed(
                    question.number,
                    format!("answer key references unknown row {answer_index}"),
                )
            })?;
        if positions[slot].replace(position).is_some() {
            return Err(ParseError::malformed(
                question.number,
                format!("row {answer_index} is placed twice"),
            ));
        }
    }

    let answers = rows
        .iter()
        .zip(positions)
        .map(|((index, text), position)| {
            position.map(|p| Answer::ordered(*text, p)).ok_or_else(|| {
                ParseError::malformed(question.number, format!("row {index} has no position"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Question::sequence(question.text.clone(), answers))
}

fn build_matching(question: &TableQuestion<'_>, key: &AnswerKey) -> Result<Question, ParseError> {
    let mut lefts: Vec<(&str, &str)> = Vec::new();
    let mut rights: Vec<(&str, &str)> = Vec::new();
    for row in data_rows(question.table, None) {
        expect_columns(question, row, 5)?;
        if !row[1].is_empty() && !row[2].is_empty() {
            lefts.push((row[1].as_str(), row[2].as_str()));
        }
        if !row[3].is_empty() && !row[4].is_empty() {
            rights.push((row[3].as_str(), row[4].as_str()));
        }
    }

    let pairs = parse_pairs(key_value(question, key)?)
        .map_err(|reason| ParseError::malformed(question.number, reason))?;

    let find = |column: &[(&str, &str)], label: &str| {
        let wanted = normalize_label(label);
        column
            .iter()
            .position(|(candidate, _)| normalize_label(candidate) == wanted)
    };

    let mut variants: Vec<Vec<Vec<usize>>> = vec![Vec::new(); lefts.len()];
    for (left, right) in &pairs {
        let (Some(l), Some(r)) = (find(&lefts, left), find(&rights, right)) else {
            return Err(ParseError::malformed(
                question.number,
                format!("answer key pair {left}={right} does not match the table"),
            ));
        };
        let right_index = lefts.len() + r;
        if !variants[l].iter().any(|v| v.contains(&right_index)) {
            variants[l].push(vec![right_index]);
        }
    }

    let mut answers: Vec<Answer> = lefts
        .iter()
        .zip(variants)
        .map(|((_, text), variants)| Answer::left(*text, variants))
        .collect();
    answers.extend(rights.iter().map(|(_, text)| Answer::right(*text)));

    Ok(Question::matching(question.text.clone(), answers))
}
