//! Fluent assertion API for parsed questions

use super::testing_matchers::TextMatch;
use crate::quiz::model::{Answer, Question, QuestionKind};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a parsed question list
pub fn assert_questions(questions: &[Question]) -> QuestionsAssertion<'_> {
    QuestionsAssertion { questions }
}

// ============================================================================
// Question List Assertions
// ============================================================================

pub struct QuestionsAssertion<'a> {
    questions: &'a [Question],
}

impl<'a> QuestionsAssertion<'a> {
    /// Assert the number of questions
    pub fn count(self, expected: usize) -> Self {
        let actual = self.questions.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} questions, found {}: [{}]",
            expected,
            actual,
            summarize_questions(self.questions)
        );
        self
    }

    /// Assert on a specific question by index
    pub fn question<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(QuestionAssertion<'a>) -> QuestionAssertion<'a>,
    {
        assert!(
            index < self.questions.len(),
            "Question index {} out of bounds ({} questions)",
            index,
            self.questions.len()
        );
        assertion(QuestionAssertion {
            question: &self.questions[index],
            context: format!("questions[{index}]"),
        });
        self
    }

    /// Assert every question satisfies the model invariants
    pub fn all_valid(self) -> Self {
        for (i, question) in self.questions.iter().enumerate() {
            if let Err(err) = question.validate() {
                panic!("questions[{i}]: {err}");
            }
        }
        self
    }
}

// ============================================================================
// Question Assertions
// ============================================================================

pub struct QuestionAssertion<'a> {
    question: &'a Question,
    context: String,
}

impl<'a> QuestionAssertion<'a> {
    /// Assert the exact question text
    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.question.text, &self.context);
        self
    }

    pub fn text_starts_with(self, prefix: &str) -> Self {
        TextMatch::StartsWith(prefix.to_string()).assert(&self.question.text, &self.context);
        self
    }

    pub fn text_contains(self, needle: &str) -> Self {
        TextMatch::Contains(needle.to_string()).assert(&self.question.text, &self.context);
        self
    }

    pub fn kind(self, expected: QuestionKind) -> Self {
        assert_eq!(
            self.question.kind(),
            expected,
            "{}: expected {:?} question",
            self.context,
            expected
        );
        self
    }

    pub fn answer_count(self, expected: usize) -> Self {
        assert_eq!(
            self.question.answers.len(),
            expected,
            "{}: expected {} answers, found [{}]",
            self.context,
            expected,
            summarize_answers(&self.question.answers)
        );
        self
    }

    /// Assert exactly these answer indices are marked correct
    pub fn correct(self, expected: &[usize]) -> Self {
        assert_eq!(
            self.question.correct_indices(),
            expected,
            "{}: wrong correct answers in [{}]",
            self.context,
            summarize_answers(&self.question.answers)
        );
        self
    }

    pub fn single_select(self) -> Self {
        assert!(
            !self.question.is_multi_select,
            "{}: expected a single-select question",
            self.context
        );
        self
    }

    pub fn multi_select(self) -> Self {
        assert!(
            self.question.is_multi_select,
            "{}: expected a multi-select question",
            self.context
        );
        self
    }

    /// Assert the `order_number` of every answer, in answer order
    pub fn order(self, expected: &[usize]) -> Self {
        let actual: Vec<Option<usize>> = self.question.answers.iter().map(|a| a.order_number).collect();
        let expected: Vec<Option<usize>> = expected.iter().copied().map(Some).collect();
        assert_eq!(actual, expected, "{}: wrong order numbers", self.context);
        self
    }

    /// Assert on a specific answer by index
    pub fn answer<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(AnswerAssertion<'a>) -> AnswerAssertion<'a>,
    {
        assert!(
            index < self.question.answers.len(),
            "{}: answer index {} out of bounds ({} answers)",
            self.context,
            index,
            self.question.answers.len()
        );
        assertion(AnswerAssertion {
            answer: &self.question.answers[index],
            context: format!("{}.answers[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Answer Assertions
// ============================================================================

pub struct AnswerAssertion<'a> {
    answer: &'a Answer,
    context: String,
}

impl AnswerAssertion<'_> {
    pub fn text(self, expected: &str) -> Self {
        TextMatch::Exact(expected.to_string()).assert(&self.answer.text, &self.context);
        self
    }

    pub fn is_correct(self, expected: bool) -> Self {
        assert_eq!(
            self.answer.is_correct, expected,
            "{}: expected is_correct = {}",
            self.context, expected
        );
        self
    }

    pub fn left_column(self) -> Self {
        assert_eq!(
            self.answer.is_left_column,
            Some(true),
            "{}: expected a left-column answer",
            self.context
        );
        self
    }

    pub fn right_column(self) -> Self {
        assert_eq!(
            self.answer.is_left_column,
            Some(false),
            "{}: expected a right-column answer",
            self.context
        );
        self
    }

    /// Assert the accepted right-column indices of a left-column answer
    pub fn matches(self, expected: &[usize]) -> Self {
        assert_eq!(
            self.answer.accepted_matches(),
            expected,
            "{}: wrong accepted matches",
            self.context
        );
        self
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn summarize_questions(questions: &[Question]) -> String {
    questions
        .iter()
        .map(|q| format!("{:?}({})", q.kind(), truncate(&q.text)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn summarize_answers(answers: &[Answer]) -> String {
    answers
        .iter()
        .map(|a| format!("{}{}", if a.is_correct { "+" } else { "-" }, truncate(&a.text)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str) -> String {
    const LIMIT: usize = 24;
    if text.chars().count() <= LIMIT {
        text.to_string()
    } else {
        format!("{}…", text.chars().take(LIMIT).collect::<String>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question::choice("2+2?", vec![Answer::new("3", false), Answer::new("4", true)]),
            Question::sequence("Order", vec![Answer::ordered("b", 2), Answer::ordered("a", 1)]),
        ]
    }

    #[test]
    fn chains_over_questions_and_answers() {
        let questions = questions();
        assert_questions(&questions)
            .count(2)
            .all_valid()
            .question(0, |q| {
                q.text("2+2?")
                    .kind(QuestionKind::Choice)
                    .correct(&[1])
                    .single_select()
                    .answer(1, |a| a.text("4").is_correct(true))
            })
            .question(1, |q| q.kind(QuestionKind::Sequence).order(&[2, 1]));
    }

    #[test]
    #[should_panic(expected = "Expected 3 questions")]
    fn reports_count_mismatch() {
        assert_questions(&questions()).count(3);
    }

    #[test]
    #[should_panic(expected = "questions[0]: expected text '2+3?'")]
    fn reports_context() {
        assert_questions(&questions()).question(0, |q| q.text("2+3?"));
    }
}
