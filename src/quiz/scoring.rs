//! Answer evaluation
//!
//! What `selected` means depends on the question kind:
//!
//!     - Choice: the set of answer indices the user picked. Order and duplicates are ignored.
//!     - Sequence: answer indices in the order the user arranged them.
//!     - Matching: `selected[k]` is the answer index the user paired with the `k`-th left
//!       answer.
//!
//! Out-of-range indices never score.

use crate::quiz::model::{Question, QuestionKind};
use std::collections::BTreeSet;

/// Whether `selected` is a correct response to `question`.
pub fn calculate_score(question: &Question, selected: &[usize]) -> bool {
    match question.kind() {
        QuestionKind::Choice => {
            let picked: BTreeSet<usize> = selected.iter().copied().collect();
            let correct: BTreeSet<usize> = question.correct_indices().into_iter().collect();
            picked == correct
        }
        QuestionKind::Sequence => {
            selected.len() == question.answers.len()
                && selected.iter().enumerate().all(|(position, &i)| {
                    question
                        .answers
                        .get(i)
                        .is_some_and(|answer| answer.order_number == Some(position + 1))
                })
        }
        QuestionKind::Matching => {
            let lefts = question.left_indices();
            selected.len() == lefts.len()
                && lefts
                    .iter()
                    .zip(selected)
                    .all(|(&left, chosen)| question.answers[left].accepted_matches().contains(chosen))
        }
    }
}

/// Number of correctly answered questions; missing selections count as wrong.
pub fn score_bank(questions: &[Question], selections: &[Vec<usize>]) -> usize {
    questions
        .iter()
        .zip(selections)
        .filter(|(question, selected)| calculate_score(question, selected))
        .count()
}
