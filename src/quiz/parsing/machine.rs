//! Line state machine
//!
//! Drives the text grammars. States are `Idle` (nothing open), `InQuestion` (a question is
//! open, no answer) and `InAnswer` (a question and one of its answers are open). Each
//! classified line triggers exactly one transition:
//!
//! | state      | question   | answer             | blank          | continuation     | key         |
//! |------------|------------|--------------------|----------------|------------------|-------------|
//! | Idle       | InQuestion | Idle (orphan)      | Idle           | Idle (orphan)    | Idle        |
//! | InQuestion | commit, InQuestion | InAnswer   | InQuestion     | question text    | set key     |
//! | InAnswer   | commit, InQuestion | push, InAnswer | push, InQuestion | answer text  | push, set key |
//!
//! A question is committed only with at least two answers; plain choice questions must also
//! have at least one correct answer. Anything else is dropped without failing the parse.

use crate::quiz::lexing::line_classification::normalize_label;
use crate::quiz::lexing::LineType;
use crate::quiz::model::{Answer, Question};

#[derive(Debug, Default)]
struct AnswerDraft {
    label: Option<String>,
    text: String,
    correct: bool,
}

#[derive(Debug, Default)]
struct QuestionDraft {
    text: String,
    answers: Vec<AnswerDraft>,
    key: Option<Vec<String>>,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    InQuestion(QuestionDraft),
    InAnswer(QuestionDraft, AnswerDraft),
}

/// Accumulates questions from a stream of classified lines.
#[derive(Debug, Default)]
pub struct LineMachine {
    state: State,
    committed: Vec<Question>,
    dropped: usize,
}

impl LineMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one classified line.
    pub fn feed(&mut self, line: LineType<'_>) {
        let state = std::mem::take(&mut self.state);
        self.state = match (state, line) {
            (state, LineType::QuestionStart(text)) => {
                self.close(state);
                State::InQuestion(QuestionDraft {
                    text: text.to_string(),
                    ..QuestionDraft::default()
                })
            }

            (State::Idle, _) => State::Idle,

            (State::InQuestion(question), LineType::AnswerStart { correct, label, text }) => {
                State::InAnswer(question, AnswerDraft::new(correct, label, text))
            }
            (State::InAnswer(mut question, answer), LineType::AnswerStart { correct, label, text }) => {
                question.answers.push(answer);
                State::InAnswer(question, AnswerDraft::new(correct, label, text))
            }

            (State::InQuestion(question), LineType::Blank) => State::InQuestion(question),
            (State::InAnswer(mut question, answer), LineType::Blank) => {
                question.answers.push(answer);
                State::InQuestion(question)
            }

            (State::InQuestion(mut question), LineType::Continuation(text)) => {
                append_text(&mut question.text, text);
                State::InQuestion(question)
            }
            (State::InAnswer(question, mut answer), LineType::Continuation(text)) => {
                append_text(&mut answer.text, text);
                State::InAnswer(question, answer)
            }

            (State::InQuestion(mut question), LineType::AnswerKey(labels)) => {
                question.key = Some(labels);
                State::InQuestion(question)
            }
            (State::InAnswer(mut question, answer), LineType::AnswerKey(labels)) => {
                question.answers.push(answer);
                question.key = Some(labels);
                State::InQuestion(question)
            }
        };
    }

    /// Flush the open question and return everything committed, in source order.
    pub fn finish(mut self) -> Vec<Question> {
        let state = std::mem::take(&mut self.state);
        self.close(state);
        if self.dropped > 0 {
            tracing::debug!(dropped = self.dropped, "dropped incomplete questions");
        }
        self.committed
    }

    fn close(&mut self, state: State) {
        let draft = match state {
            State::Idle => return,
            State::InQuestion(question) => question,
            State::InAnswer(mut question, answer) => {
                question.answers.push(answer);
                question
            }
        };

        if draft.answers.len() < 2 {
            tracing::debug!(
                question = %draft.text,
                answers = draft.answers.len(),
                "dropping question with fewer than two answers"
            );
            self.dropped += 1;
            return;
        }

        let question = draft.into_question();
        if let Err(err) = question.validate() {
            tracing::warn!(question = %question.text, error = %err, "dropping invalid question");
            self.dropped += 1;
            return;
        }
        self.committed.push(question);
    }
}

impl AnswerDraft {
    fn new(correct: bool, label: Option<&str>, text: &str) -> Self {
        Self {
            label: label.map(str::to_string),
            text: text.to_string(),
            correct,
        }
    }
}

impl QuestionDraft {
    fn into_question(self) -> Question {
        let key: Option<Vec<String>> = self
            .key
            .map(|labels| labels.iter().map(|l| normalize_label(l)).collect());

        let answers = self
            .answers
            .into_iter()
            .map(|answer| {
                let correct = match (&key, &answer.label) {
                    (Some(key), Some(label)) => key.contains(&normalize_label(label)),
                    (Some(_), None) => false,
                    (None, _) => answer.correct,
                };
                Answer::new(answer.text, correct)
            })
            .collect();

        Question::choice(self.text, answers)
    }
}

/// Space-join a continuation line onto existing text.
fn append_text(target: &mut String, text: &str) {
    if !target.is_empty() {
        target.push(' ');
    }
    target.push_str(text);
}
