//! Lexer
//!
//!     Text question files are line oriented. Lexing here means classifying each line into a
//!     [`LineType`] for a given grammar; the parsing stage then drives a state machine over
//!     the classified lines. Classification never looks at neighbouring lines, so it is cheap
//!     enough to run during format detection too.
//!
//! Grammars
//!
//!     - Marker lines: a question marker (`#` or `?`) opens a question, `+`/`-` opens a
//!       correct/incorrect answer. See [`MarkerClassifier`].
//!     - Numbered lines: `1.` opens a question, `a)` opens an answer, `*a)` or `+a)` marks it
//!       correct and `Answer: a, c` marks answers correct by label. See
//!       [`NumberedClassifier`].

pub mod line_classification;

pub use line_classification::{
    LineClassifier, LineType, MarkerClassifier, NumberedClassifier, QuestionMarker,
};

/// Classify every line of `source` with the given classifier.
pub fn classify_lines<'a, C: LineClassifier>(source: &'a str, classifier: &C) -> Vec<LineType<'a>> {
    source
        .strip_prefix('\u{feff}')
        .unwrap_or(source)
        .lines()
        .map(|line| classifier.classify(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_crlf_sources() {
        let lines = classify_lines("#Q\r\n+a\r\n\r\n-b\r\n", &MarkerClassifier::new(QuestionMarker::Hash));
        assert_eq!(
            lines,
            vec![
                LineType::QuestionStart("Q"),
                LineType::AnswerStart {
                    correct: true,
                    label: None,
                    text: "a"
                },
                LineType::Blank,
                LineType::AnswerStart {
                    correct: false,
                    label: None,
                    text: "b"
                },
            ]
        );
    }

    #[test]
    fn strips_byte_order_mark() {
        let lines = classify_lines("\u{feff}?Q", &MarkerClassifier::new(QuestionMarker::Question));
        assert_eq!(lines, vec![LineType::QuestionStart("Q")]);
    }
}
