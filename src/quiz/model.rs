//! Question model
//!
//! The shapes every grammar produces and every consumer reads. Field names serialize in
//! camelCase (`isCorrect`, `orderNumber`, ...) since the JSON form is what rendering layers
//! consume; absent optionals are omitted.
//!
//! Invariants (checked by [`Question::validate`]):
//!
//!     - A question has at least two answers.
//!     - At most one of `is_sequence` / `is_matching` is set. Neither means a plain choice
//!       question.
//!     - Choice questions have at least one correct answer, and `is_multi_select` is true
//!       exactly when more than one is correct.
//!     - Sequence answers carry `order_number`s forming a dense permutation of `1..=N`.
//!     - Matching questions mark every answer with `is_left_column`; left answers reference
//!       right answers of the same question through `match_index` / `match_variants`.

use crate::quiz::error::ParseError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
    /// 1-based position in the correct order (sequence questions only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<usize>,
    /// Column of a matching answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_left_column: Option<bool>,
    /// First accepted right-column answer index for a left-column answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_index: Option<usize>,
    /// Acceptable pairings for a left-column answer, each a list of right-column indices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_variants: Option<Vec<Vec<usize>>>,
}

impl Answer {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
            order_number: None,
            is_left_column: None,
            match_index: None,
            match_variants: None,
        }
    }

    /// An answer of a sequence question
    pub fn ordered(text: impl Into<String>, order_number: usize) -> Self {
        Self {
            order_number: Some(order_number),
            ..Self::new(text, false)
        }
    }

    /// A left-column answer of a matching question, paired with the given right answers
    pub fn left(text: impl Into<String>, variants: Vec<Vec<usize>>) -> Self {
        Self {
            is_left_column: Some(true),
            match_index: variants.iter().flatten().next().copied(),
            match_variants: Some(variants),
            ..Self::new(text, false)
        }
    }

    /// A right-column answer of a matching question
    pub fn right(text: impl Into<String>) -> Self {
        Self {
            is_left_column: Some(false),
            ..Self::new(text, false)
        }
    }

    pub fn is_left(&self) -> bool {
        self.is_left_column == Some(true)
    }

    /// Right-column indices this (left-column) answer may be paired with
    pub fn accepted_matches(&self) -> Vec<usize> {
        let mut accepted: Vec<usize> = match &self.match_variants {
            Some(variants) => variants.iter().flatten().copied().collect(),
            None => self.match_index.into_iter().collect(),
        };
        accepted.sort_unstable();
        accepted.dedup();
        accepted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Pick one or more correct answers
    Choice,
    /// Put all answers into the correct order
    Sequence,
    /// Pair left-column answers with right-column answers
    Matching,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_multi_select: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_sequence: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_matching: bool,
    /// Position in the full bank, set once when a subset is drawn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_index: Option<usize>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Question {
    /// A plain choice question; `is_multi_select` is derived from the answers.
    pub fn choice(text: impl Into<String>, answers: Vec<Answer>) -> Self {
        let is_multi_select = answers.iter().filter(|a| a.is_correct).count() > 1;
        Self {
            text: text.into(),
            answers,
            is_multi_select,
            is_sequence: false,
            is_matching: false,
            original_index: None,
        }
    }

    pub fn sequence(text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            is_sequence: true,
            ..Self::choice(text, answers)
        }
    }

    pub fn matching(text: impl Into<String>, answers: Vec<Answer>) -> Self {
        Self {
            is_matching: true,
            ..Self::choice(text, answers)
        }
    }

    pub fn kind(&self) -> QuestionKind {
        if self.is_sequence {
            QuestionKind::Sequence
        } else if self.is_matching {
            QuestionKind::Matching
        } else {
            QuestionKind::Choice
        }
    }

    /// Indices of answers marked correct
    pub fn correct_indices(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_correct)
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices of left-column answers, in answer order
    pub fn left_indices(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_left())
            .map(|(i, _)| i)
            .collect()
    }

    /// Answer indices in their correct order (sequence questions)
    pub fn correct_order(&self) -> Option<Vec<usize>> {
        let mut order = vec![None; self.answers.len()];
        for (i, answer) in self.answers.iter().enumerate() {
            let position = answer.order_number?.checked_sub(1)?;
            *order.get_mut(position)? = Some(i);
        }
        order.into_iter().collect()
    }

    /// Check the model invariants.
    pub fn validate(&self) -> Result<(), ParseError> {
        let invalid = |reason: String| Err(ParseError::InvalidQuestion(reason));

        if self.answers.len() < 2 {
            return invalid(format!(
                "question '{}' has {} answer(s), at least 2 required",
                self.text,
                self.answers.len()
            ));
        }
        if self.is_sequence && self.is_matching {
            return invalid("question cannot be both sequence and matching".to_string());
        }

        match self.kind() {
            QuestionKind::Choice => {
                let correct = self.correct_indices().len();
                if correct == 0 {
                    return invalid(format!("question '{}' has no correct answer", self.text));
                }
                if self.is_multi_select != (correct > 1) {
                    return invalid(format!(
                        "question '{}' multi-select flag does not match {} correct answer(s)",
                        self.text, correct
                    ));
                }
            }
            QuestionKind::Sequence => {
                if self.correct_order().is_none() {
                    return invalid(format!(
                        "order numbers of '{}' are not a permutation of 1..={}",
                        self.text,
                        self.answers.len()
                    ));
                }
            }
            QuestionKind::Matching => {
                if self.answers.iter().any(|a| a.is_left_column.is_none()) {
                    return invalid(format!("matching answer of '{}' has no column", self.text));
                }
                let lefts = self.left_indices();
                if lefts.is_empty() || lefts.len() == self.answers.len() {
                    return invalid(format!("'{}' needs both answer columns", self.text));
                }
                for &left in &lefts {
                    let accepted = self.answers[left].accepted_matches();
                    if accepted.is_empty() {
                        return invalid(format!(
                            "left answer '{}' has no match",
                            self.answers[left].text
                        ));
                    }
                    let dangling = accepted
                        .iter()
                        .any(|&i| self.answers.get(i).map_or(true, |a| a.is_left()));
                    if dangling {
                        return invalid(format!(
                            "left answer '{}' references an index outside the right column",
                            self.answers[left].text
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
