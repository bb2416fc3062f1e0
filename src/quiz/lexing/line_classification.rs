//! Line Classification
//!
//! Core classification logic for determining line types in text question files.

use once_cell::sync::Lazy;
use regex::Regex;

/// Classified line of a text question file.
///
/// Borrowed slices point into the source line and are already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineType<'a> {
    /// Whitespace only
    Blank,
    /// Opens a new question; carries the text after the marker
    QuestionStart(&'a str),
    /// Opens a new answer
    AnswerStart {
        correct: bool,
        label: Option<&'a str>,
        text: &'a str,
    },
    /// Marks the answers with these labels as the correct ones
    AnswerKey(Vec<String>),
    /// Anything else: continues the open answer or question
    Continuation(&'a str),
}

pub trait LineClassifier {
    fn classify<'a>(&self, line: &'a str) -> LineType<'a>;
}

/// Character that opens a question in the marker grammars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionMarker {
    /// `#Question`
    Hash,
    /// `?Question`
    Question,
}

impl QuestionMarker {
    pub fn as_char(self) -> char {
        match self {
            QuestionMarker::Hash => '#',
            QuestionMarker::Question => '?',
        }
    }
}

/// Classifier for the `#`/`+`/`-` and `?`/`+`/`-` grammars
#[derive(Debug, Clone, Copy)]
pub struct MarkerClassifier {
    marker: QuestionMarker,
}

impl MarkerClassifier {
    pub fn new(marker: QuestionMarker) -> Self {
        Self { marker }
    }
}

impl LineClassifier for MarkerClassifier {
    fn classify<'a>(&self, line: &'a str) -> LineType<'a> {
        let line = line.trim();
        if line.is_empty() {
            return LineType::Blank;
        }

        if let Some(rest) = line.strip_prefix(self.marker.as_char()) {
            return LineType::QuestionStart(rest.trim());
        }
        if let Some(rest) = line.strip_prefix('+') {
            return LineType::AnswerStart {
                correct: true,
                label: None,
                text: rest.trim(),
            };
        }
        if let Some(rest) = line.strip_prefix('-') {
            return LineType::AnswerStart {
                correct: false,
                label: None,
                text: rest.trim(),
            };
        }

        LineType::Continuation(line)
    }
}

static NUMBERED_QUESTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,4})[.)](\s+.*|[^\d\s].*)?$").expect("valid regex"));

static LETTERED_ANSWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([*+])?\s*([A-Za-zА-Яа-яЁё])\s*[.)]\s+(.*)$").expect("valid regex")
});

static ANSWER_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:правильный\s+ответ|правильные\s+ответы|ответы?|correct\s+answers?|answers?|key)\s*[:\-–]\s*(.+)$")
        .expect("valid regex")
});

static KEY_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,;]+").expect("valid regex"));

/// Classifier for numbered questions with lettered answers
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberedClassifier;

impl NumberedClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl LineClassifier for NumberedClassifier {
    fn classify<'a>(&self, line: &'a str) -> LineType<'a> {
        let line = line.trim();
        if line.is_empty() {
            return LineType::Blank;
        }

        if let Some(caps) = ANSWER_KEY.captures(line) {
            let labels = split_key_labels(caps.get(1).map_or("", |m| m.as_str()));
            if !labels.is_empty() {
                return LineType::AnswerKey(labels);
            }
        }

        if let Some(caps) = NUMBERED_QUESTION.captures(line) {
            let text = caps.get(2).map_or("", |m| m.as_str().trim());
            return LineType::QuestionStart(text);
        }

        if let Some(caps) = LETTERED_ANSWER.captures(line) {
            return LineType::AnswerStart {
                correct: caps.get(1).is_some(),
                label: caps.get(2).map(|m| m.as_str()),
                text: caps.get(3).map_or("", |m| m.as_str().trim()),
            };
        }

        LineType::Continuation(line)
    }
}

/// Longest joined run of labels accepted in a key (`Answer: abd`)
const MAX_LABEL_RUN: usize = 6;

/// Split an answer key value like `a, c`, `BC` or `ac` into single-letter labels.
fn split_key_labels(value: &str) -> Vec<String> {
    let mut labels = Vec::new();
    for token in KEY_SEPARATOR.split(value.trim()) {
        let token = token.trim_matches(|c: char| c == '.' || c == ')');
        if token.is_empty() {
            continue;
        }
        if !token.chars().all(char::is_alphabetic) || !is_label_run(token) {
            // Not a label list (e.g. free-text explanation).
            return Vec::new();
        }
        labels.extend(token.chars().map(String::from));
    }
    labels
}

/// A single letter, or a short run of distinct letters all in one case. Repeated letters
/// mean a word ("see", "text"), not a label list.
fn is_label_run(token: &str) -> bool {
    let letters: Vec<char> = token.chars().collect();
    if letters.len() == 1 {
        return true;
    }
    let one_case = letters.iter().all(|c| c.is_uppercase()) || letters.iter().all(|c| c.is_lowercase());
    let distinct = letters
        .iter()
        .enumerate()
        .all(|(i, c)| !letters[..i].contains(c));
    one_case && distinct && letters.len() <= MAX_LABEL_RUN
}

/// Normalize a label for comparison: lowercase, with Cyrillic letters that look like Latin
/// ones folded onto the Latin letter.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'а' => 'a',
            'в' => 'b',
            'с' => 'c',
            'е' => 'e',
            'к' => 'k',
            'м' => 'm',
            'н' => 'h',
            'о' => 'o',
            'р' => 'p',
            'т' => 't',
            'х' => 'x',
            other => other,
        })
        .collect()
}
