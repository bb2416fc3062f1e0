//! Plain-marker grammars
//!
//! ```text
//! #Which of these are prime?
//! +2
//! +3
//! -4
//!
//! #Second question text
//! that continues here
//! -wrong
//! +right
//! ```
//!
//! The `?` grammar is identical with `?` opening questions.

use super::machine::LineMachine;
use crate::quiz::lexing::{classify_lines, LineType, MarkerClassifier, QuestionMarker};
use crate::quiz::model::Question;

/// Parse a marker-format text file.
///
/// Returns an empty list when the text has no question markers at all.
pub fn parse_plain_format(text: &str, marker: QuestionMarker) -> Vec<Question> {
    let mut machine = LineMachine::new();
    for line in classify_lines(text, &MarkerClassifier::new(marker)) {
        machine.feed(line);
    }
    machine.finish()
}

/// Parse with whichever marker opens more questions (`#` on ties).
pub fn parse_plain_format_auto(text: &str) -> Vec<Question> {
    let hashes = count_question_lines(text, QuestionMarker::Hash);
    let questions = count_question_lines(text, QuestionMarker::Question);
    if questions > hashes {
        parse_plain_format(text, QuestionMarker::Question)
    } else {
        parse_plain_format(text, QuestionMarker::Hash)
    }
}

/// Number of lines that open a question under the given marker
pub fn count_question_lines(text: &str, marker: QuestionMarker) -> usize {
    classify_lines(text, &MarkerClassifier::new(marker))
        .iter()
        .filter(|line| matches!(line, LineType::QuestionStart(_)))
        .count()
}

/// Detection predicate: a question line followed somewhere by an answer line
pub fn looks_like_marker_format(text: &str, marker: QuestionMarker) -> bool {
    let mut seen_question = false;
    for line in classify_lines(text, &MarkerClassifier::new(marker)) {
        match line {
            LineType::QuestionStart(_) => seen_question = true,
            LineType::AnswerStart { .. } if seen_question => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH_SOURCE: &str = "#Which of these are prime?\n+2\n+3\n-4\n\n#Second question text\nthat continues here\n-wrong\n+right\n";

    #[test]
    fn parses_hash_grammar() {
        let questions = parse_plain_format(HASH_SOURCE, QuestionMarker::Hash);
        assert_eq!(questions.len(), 2);

        assert_eq!(questions[0].text, "Which of these are prime?");
        assert_eq!(questions[0].correct_indices(), vec![0, 1]);
        assert!(questions[0].is_multi_select);

        assert_eq!(questions[1].text, "Second question text that continues here");
        assert_eq!(questions[1].correct_indices(), vec![1]);
        assert!(!questions[1].is_multi_select);
    }

    #[test]
    fn parses_question_mark_grammar() {
        let source = HASH_SOURCE.replace('#', "?");
        let questions = parse_plain_format(&source, QuestionMarker::Question);
        assert_eq!(questions.len(), 2);
        assert!(parse_plain_format(&source, QuestionMarker::Hash).is_empty());
    }

    #[test]
    fn auto_picks_the_dominant_marker() {
        let source = "?One\n+a\n-b\n?Two\n+a\n-b\n";
        assert_eq!(parse_plain_format_auto(source).len(), 2);
        assert_eq!(parse_plain_format_auto(HASH_SOURCE).len(), 2);
    }

    #[test]
    fn no_markers_yields_nothing() {
        assert!(parse_plain_format("just some prose\nwith lines", QuestionMarker::Hash).is_empty());
        assert!(!looks_like_marker_format("just prose", QuestionMarker::Hash));
        assert!(looks_like_marker_format(HASH_SOURCE, QuestionMarker::Hash));
    }

    #[test]
    fn drops_question_with_single_answer() {
        let source = "#Short\n+only\n#Full\n+a\n-b\n";
        let questions = parse_plain_format(source, QuestionMarker::Hash);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Full");
    }
}
