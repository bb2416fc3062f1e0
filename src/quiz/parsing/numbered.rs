//! Numbered-letter grammar
//!
//! ```text
//! 1. Capital of France?
//! a) Berlin
//! *b) Paris
//! c) Rome
//!
//! 2. Even numbers?
//! A) 2
//! B) 3
//! C) 4
//! Answer: A, C
//! ```
//!
//! A `*` or `+` before the letter marks the answer correct; an answer-key line, when present,
//! decides instead. Labels may be Latin or Cyrillic.

use super::machine::LineMachine;
use crate::quiz::lexing::{classify_lines, LineType, NumberedClassifier};
use crate::quiz::model::Question;

pub fn parse_numbered_format(text: &str) -> Vec<Question> {
    let mut machine = LineMachine::new();
    for line in classify_lines(text, &NumberedClassifier::new()) {
        machine.feed(line);
    }
    machine.finish()
}

/// Detection predicate: a numbered question immediately followed (blank lines and
/// continuations aside) by a lettered answer.
pub fn looks_like_numbered_format(text: &str) -> bool {
    let mut in_question = false;
    for line in classify_lines(text, &NumberedClassifier::new()) {
        match line {
            LineType::QuestionStart(_) => in_question = true,
            LineType::AnswerStart { label: Some(_), .. } if in_question => return true,
            LineType::Blank | LineType::Continuation(_) => {}
            _ => in_question = false,
        }
    }
    false
}
