//! Testing utilities for question-bank assertions
//!
//! # Parser Testing Guidelines
//!
//! Two tools, used together:
//!
//! 1. **[QuizSamples](samples::QuizSamples)** - verified sample files for every grammar
//! 2. **[assert_questions](fn@assert_questions)** - fluent verification of parsed questions
//!
//! ## Rule 1: Prefer the Sample Files
//!
//! The sample files under `samples/` are checked against every grammar. Inline sources are
//! fine for a targeted edge case, but whole-format tests should start from a sample:
//!
//! ```rust-example
//! use quizbank::quiz::testing::samples::QuizSamples;
//!
//! let source = QuizSamples::get("hash-marker.txt").unwrap();
//! let questions = parse_plain_format(source, QuestionMarker::Hash);
//! ```
//!
//! ## Rule 2: Assert Shape and Content
//!
//! Counting questions says little. The fluent API checks text, answers, correctness and
//! kind of each question in one chain:
//!
//! ```rust-example
//! use quizbank::quiz::testing::assert_questions;
//!
//! assert_questions(&questions)
//!     .count(2)
//!     .question(0, |q| {
//!         q.text("Сколько будет 2+2?")
//!             .answer_count(3)
//!             .correct(&[1])
//!             .single_select()
//!     })
//!     .question(1, |q| q.kind(QuestionKind::Sequence).order(&[2, 1, 3]));
//! ```

mod testing_assertions;
mod testing_matchers;

pub mod samples;

pub use testing_assertions::{assert_questions, AnswerAssertion, QuestionAssertion, QuestionsAssertion};
pub use testing_matchers::TextMatch;
