//! Quiz progress snapshots
//!
//! A [`QuizSnapshot`] is an immutable value: every transition consumes the snapshot and
//! returns the next one, so a caller can keep (or persist) any earlier state. The JSON form
//! is what a host application stores between runs.

use crate::quiz::model::Question;
use crate::quiz::scoring::calculate_score;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("the quiz is already finished")]
    Finished,

    #[error("answer index {index} is out of range for question {question}")]
    AnswerOutOfRange { question: usize, index: usize },

    #[error("invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSnapshot {
    pub questions: Vec<Question>,
    /// Index of the question being shown
    pub current: usize,
    /// Selection recorded for each answered question, in order
    pub responses: Vec<Vec<usize>>,
}

impl QuizSnapshot {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current: 0,
            responses: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Record the selection for the current question and move to the next one.
    pub fn answer(mut self, selected: Vec<usize>) -> Result<Self, SessionError> {
        let question = self.current_question().ok_or(SessionError::Finished)?;
        if let Some(&index) = selected.iter().find(|&&i| i >= question.answers.len()) {
            return Err(SessionError::AnswerOutOfRange {
                question: self.current,
                index,
            });
        }
        self.responses.push(selected);
        self.current += 1;
        Ok(self)
    }

    /// Number of correctly answered questions so far
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.responses)
            .filter(|(question, selected)| calculate_score(question, selected))
            .count()
    }

    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }
}
