//! Drawing subsets of a question bank
//!
//! A quiz session works on a subset of the bank. Every drawn question is a copy tagged with
//! its `original_index` in the full bank; the bank itself is never modified. A question that
//! already carries an index (drawn from a subset or a restored session) keeps it.

use crate::quiz::model::Question;
use rand::seq::{index, SliceRandom};
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMethod {
    /// Questions `[start, start + count)` in bank order
    Sequential,
    /// `count` distinct questions drawn uniformly from `[start, len)`
    Random,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("start index {start} is out of range for a bank of {len} questions")]
    StartOutOfRange { start: usize, len: usize },

    #[error("question count must be at least 1")]
    EmptySelection,

    #[error("cannot take {count} questions from index {start}: the bank has {len}")]
    NotEnoughQuestions { start: usize, count: usize, len: usize },
}

/// Draw `count` questions starting at `start_index`.
///
/// Sequential selection must fit inside the bank. Random selection is capped at the number
/// of questions available past `start_index`.
pub fn select_questions<R: Rng + ?Sized>(
    bank: &[Question],
    start_index: usize,
    count: usize,
    method: SelectionMethod,
    rng: &mut R,
) -> Result<Vec<Question>, SelectionError> {
    if start_index >= bank.len() {
        return Err(SelectionError::StartOutOfRange {
            start: start_index,
            len: bank.len(),
        });
    }
    if count == 0 {
        return Err(SelectionError::EmptySelection);
    }

    let available = bank.len() - start_index;
    let indices: Vec<usize> = match method {
        SelectionMethod::Sequential => {
            if count > available {
                return Err(SelectionError::NotEnoughQuestions {
                    start: start_index,
                    count,
                    len: bank.len(),
                });
            }
            (start_index..start_index + count).collect()
        }
        SelectionMethod::Random => index::sample(rng, available, count.min(available))
            .into_iter()
            .map(|offset| start_index + offset)
            .collect(),
    };

    tracing::debug!(?method, start_index, drawn = indices.len(), "selected questions");

    Ok(indices
        .into_iter()
        .map(|i| Question {
            original_index: bank[i].original_index.or(Some(i)),
            ..bank[i].clone()
        })
        .collect())
}

/// Shuffle the answers of a choice question in place.
///
/// Sequence and matching questions are left alone: their answers are ordered or
/// cross-referenced by index.
pub fn shuffle_answers<R: Rng + ?Sized>(question: &mut Question, rng: &mut R) {
    if question.is_sequence || question.is_matching {
        return;
    }
    question.answers.shuffle(rng);
}
