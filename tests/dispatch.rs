//! Format detection and fallback across the grammar registry

use quizbank::quiz::document::SourceDocument;
use quizbank::quiz::error::ParseError;
use quizbank::quiz::formats::GrammarRegistry;
use quizbank::quiz::model::QuestionKind;
use quizbank::quiz::testing::assert_questions;
use quizbank::quiz::testing::samples::QuizSamples;
use quizbank::quiz::QuestionLoader;
use rstest::rstest;

#[rstest]
#[case("hash-marker.txt", 3)]
#[case("question-marker.txt", 2)]
#[case("numbered.txt", 3)]
#[case("tables.txt", 3)]
fn test_every_sample_is_recognized(#[case] name: &str, #[case] expected: usize) {
    let source = QuizSamples::get(name).unwrap();
    let questions = QuestionLoader::default()
        .load_bytes(name, source.as_bytes())
        .unwrap();

    assert_questions(&questions).count(expected).all_valid();
}

#[test]
fn test_samples_list_is_complete() {
    assert_eq!(QuizSamples::list().count(), 4);
}

#[test]
fn test_prose_yields_no_questions_found() {
    let err = QuestionLoader::default()
        .load_bytes("notes.txt", "Meeting notes.\nNothing to ask here.\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, ParseError::NoQuestionsFound));
}

#[test]
fn test_empty_file_yields_no_questions_found() {
    let err = QuestionLoader::default().load_bytes("empty.txt", b"").unwrap_err();
    assert!(matches!(err, ParseError::NoQuestionsFound));
}

#[test]
fn test_only_short_questions_yield_no_questions_found() {
    let err = QuestionLoader::default()
        .load_bytes("short.txt", "#Q1\n+a\n\n#Q2\n-b\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, ParseError::NoQuestionsFound));
}

#[test]
fn test_malformed_tables_fall_back_to_markers() {
    let source = SourceDocument::from_text(
        "Задание №1\nВопрос?\nВыберите один вариант\n1\tневерно\n\n#Запасной вопрос\n+да\n-нет\n",
    );
    let registry = GrammarRegistry::with_defaults().with_order(&["tables", "hash-marker"]);

    let questions = registry.parse(&source).unwrap();
    assert_questions(&questions)
        .count(1)
        .question(0, |q| q.text("Запасной вопрос").kind(QuestionKind::Choice));
}

#[test]
fn test_malformed_tables_alone_yield_no_questions_found() {
    let source = SourceDocument::from_text("Задание №1\nВопрос?\nВыберите один вариант\n1\tневерно\n");
    let err = GrammarRegistry::with_defaults().parse(&source).unwrap_err();
    assert!(matches!(err, ParseError::NoQuestionsFound));
}

#[test]
fn test_doc_is_rejected_before_parsing() {
    let err = QuestionLoader::default()
        .load_bytes("legacy.doc", b"\xd0\xcf\x11\xe0")
        .unwrap_err();
    assert!(matches!(err, ParseError::UnsupportedFormat(_)));
}
