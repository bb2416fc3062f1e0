//! Property-based tests for the math span segmenter

use proptest::prelude::*;
use quizbank::quiz::math::{reconstruct, segment, Span, SpanKind};

/// Text built mostly from `$`, braces and letters so delimiters collide often
fn dollar_heavy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => Just("$".to_string()),
            1 => Just("$$".to_string()),
            1 => Just("{".to_string()),
            1 => Just("}".to_string()),
            4 => "[a-z +^_\\\\]{1,4}",
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn test_literal_text_is_identity(text in "[^$]{1,64}") {
        prop_assert_eq!(segment(&text), vec![Span::text(text.clone())]);
    }

    #[test]
    fn test_round_trip_any_text(text in any::<String>()) {
        prop_assert_eq!(reconstruct(&segment(&text)), text);
    }

    #[test]
    fn test_round_trip_dollar_heavy(text in dollar_heavy()) {
        let spans = segment(&text);
        prop_assert_eq!(reconstruct(&spans), text);
    }

    #[test]
    fn test_no_adjacent_text_spans(text in dollar_heavy()) {
        let spans = segment(&text);
        for pair in spans.windows(2) {
            prop_assert!(!(pair[0].kind == SpanKind::Text && pair[1].kind == SpanKind::Text));
        }
        prop_assert!(spans.iter().all(|s| s.kind != SpanKind::Text || !s.content.is_empty()));
    }

    #[test]
    fn test_segmenting_is_deterministic(text in dollar_heavy()) {
        prop_assert_eq!(segment(&text), segment(&text));
    }
}

#[test]
fn test_examples() {
    assert_eq!(
        segment("Solve $x^2$ then $$\\int f$$."),
        vec![
            Span::text("Solve "),
            Span::inline("x^2"),
            Span::text(" then "),
            Span::block("\\int f"),
            Span::text("."),
        ]
    );
    assert_eq!(segment("costs $5"), vec![Span::text("costs $5")]);
    assert_eq!(segment("$$open"), vec![Span::text("$$open")]);
    assert!(segment("").is_empty());
}
