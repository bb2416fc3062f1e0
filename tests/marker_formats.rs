//! Text grammars: `#` / `?` markers and numbered questions
//!
//! Whole-format checks run over the verified files in `samples/`; the property tests render
//! random question banks back to marker text and parse them again.

use proptest::prelude::*;
use quizbank::quiz::lexing::QuestionMarker;
use quizbank::quiz::model::{Answer, Question, QuestionKind};
use quizbank::quiz::parsing::{parse_numbered_format, parse_plain_format, parse_plain_format_auto};
use quizbank::quiz::testing::assert_questions;
use quizbank::quiz::testing::samples::QuizSamples;

fn sample(name: &str) -> &'static str {
    QuizSamples::get(name).expect("sample exists")
}

#[test]
fn test_hash_marker_sample() {
    let questions = parse_plain_format(sample("hash-marker.txt"), QuestionMarker::Hash);

    assert_questions(&questions)
        .count(3)
        .all_valid()
        .question(0, |q| {
            q.text("Сколько будет 2+2?")
                .answer_count(3)
                .correct(&[1])
                .single_select()
        })
        .question(1, |q| {
            q.text("Какие числа простые?")
                .answer_count(4)
                .correct(&[0, 1, 3])
                .multi_select()
        })
        .question(2, |q| {
            q.text(r"Вычислите $\frac{1}{2} + \frac{1}{2}$ и запишите результат")
                .answer(0, |a| a.text("$1$").is_correct(true))
                .answer(1, |a| a.text(r"$\frac{1}{4}$").is_correct(false))
        });
}

#[test]
fn test_question_marker_sample() {
    let questions = parse_plain_format(sample("question-marker.txt"), QuestionMarker::Question);

    assert_questions(&questions)
        .count(2)
        .question(0, |q| q.text("What is the capital of France?").correct(&[1]))
        .question(1, |q| q.correct(&[0, 2]).multi_select());
}

#[test]
fn test_auto_marker_picks_question_mark() {
    let questions = parse_plain_format_auto(sample("question-marker.txt"));
    assert_eq!(questions.len(), 2);
}

#[test]
fn test_numbered_sample() {
    let questions = parse_numbered_format(sample("numbered.txt"));

    assert_questions(&questions)
        .count(3)
        .all_valid()
        .question(0, |q| {
            q.text("Which planet is closest to the Sun?")
                .correct(&[1])
                .answer(1, |a| a.text("Mercury"))
        })
        .question(1, |q| q.correct(&[0, 2]).multi_select())
        .question(2, |q| q.text("Столица России?").correct(&[0]));
}

#[test]
fn test_numbered_key_with_joined_lowercase_labels() {
    let questions = parse_numbered_format("1. Even?\na) 2\nb) 3\nc) 4\nAnswer: ac\n");
    assert_questions(&questions)
        .count(1)
        .question(0, |q| q.text("Even?").correct(&[0, 2]).multi_select());

    let questions = parse_numbered_format("1. Гласные?\nа) о\nб) к\nв) е\nОтвет: ав\n");
    assert_questions(&questions).question(0, |q| q.correct(&[0, 2]));
}

#[test]
fn test_short_question_is_dropped() {
    let source = "#Q1\n+a\n-b\n\n#Q2\n+only\n\n#Q3\n-x\n+y\n";
    let questions = parse_plain_format(source, QuestionMarker::Hash);

    assert_questions(&questions)
        .count(2)
        .question(0, |q| q.text("Q1"))
        .question(1, |q| q.text("Q3").correct(&[1]));
}

#[test]
fn test_question_without_correct_answer_is_dropped() {
    let questions = parse_plain_format("#Q\n-a\n-b\n", QuestionMarker::Hash);
    assert!(questions.is_empty());
}

#[test]
fn test_continuation_lines_join_answers() {
    let source = "#Long\nquestion\n+first part\nsecond part\n-other\n";
    let questions = parse_plain_format(source, QuestionMarker::Hash);

    assert_questions(&questions).question(0, |q| {
        q.text("Long question")
            .kind(QuestionKind::Choice)
            .answer(0, |a| a.text("first part second part"))
    });
}

#[test]
fn test_no_markers_is_empty() {
    assert!(parse_plain_format("nothing to see\nhere", QuestionMarker::Hash).is_empty());
    assert!(parse_plain_format("", QuestionMarker::Question).is_empty());
}

fn words() -> impl Strategy<Value = String> {
    "[a-zA-Zа-я][a-zA-Zа-я0-9 ]{0,20}[a-zA-Zа-я0-9]"
}

fn question() -> impl Strategy<Value = Question> {
    (
        words(),
        prop::collection::vec((words(), any::<bool>()), 2..6),
        any::<prop::sample::Index>(),
    )
        .prop_map(|(text, mut answers, forced)| {
            let i = forced.index(answers.len());
            answers[i].1 = true;
            let answers = answers
                .into_iter()
                .map(|(text, correct)| Answer::new(text, correct))
                .collect();
            Question::choice(text, answers)
        })
}

fn render(questions: &[Question], marker: char) -> String {
    let mut out = String::new();
    for question in questions {
        out.push_str(&format!("{}{}\n", marker, question.text));
        for answer in &question.answers {
            let sign = if answer.is_correct { '+' } else { '-' };
            out.push_str(&format!("{}{}\n", sign, answer.text));
        }
        out.push('\n');
    }
    out
}

proptest! {
    #[test]
    fn test_marker_round_trip(questions in prop::collection::vec(question(), 0..8)) {
        let hashed = parse_plain_format(&render(&questions, '#'), QuestionMarker::Hash);
        prop_assert_eq!(&hashed, &questions);

        let asked = parse_plain_format(&render(&questions, '?'), QuestionMarker::Question);
        prop_assert_eq!(&asked, &questions);
    }

    #[test]
    fn test_multi_select_is_derived(questions in prop::collection::vec(question(), 1..5)) {
        for question in parse_plain_format(&render(&questions, '#'), QuestionMarker::Hash) {
            let correct = question.answers.iter().filter(|a| a.is_correct).count();
            prop_assert_eq!(question.is_multi_select, correct > 1);
        }
    }
}
