//! Math span segmentation
//!
//! Splits question and answer text into literal text, inline math (`$...$`) and block math
//! (`$$...$$`). The content of math spans is kept verbatim so a renderer can fall back to the
//! raw delimited source when the markup does not render.
//!
//! Scanning rules:
//!
//!     - Outside math, `$$` opens block math and a single `$` opens inline math.
//!     - Inside inline math, any `$` closes it.
//!     - Inside block math, only `$$` closes it; a lone `$` is content.
//!     - An unterminated opener at end of input is not math: the opener and everything after
//!       it are flushed as literal text.
//!
//! Concatenating [`Span::source`] over the result always reproduces the input.

/// Kind of a segmented span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Text,
    InlineMath,
    BlockMath,
}

impl SpanKind {
    fn delimiter(self) -> &'static str {
        match self {
            SpanKind::Text => "",
            SpanKind::InlineMath => "$",
            SpanKind::BlockMath => "$$",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    /// Content with delimiters stripped
    pub content: String,
}

impl Span {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Text,
            content: content.into(),
        }
    }

    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::InlineMath,
            content: content.into(),
        }
    }

    pub fn block(content: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::BlockMath,
            content: content.into(),
        }
    }

    pub fn is_math(&self) -> bool {
        self.kind != SpanKind::Text
    }

    /// The span as it appeared in the source, delimiters included
    pub fn source(&self) -> String {
        let delimiter = self.kind.delimiter();
        format!("{delimiter}{}{delimiter}", self.content)
    }

    /// Whether math content is structurally sound: balanced braces and `\left`/`\right` pairs.
    ///
    /// Literal text is always well formed.
    pub fn is_well_formed(&self) -> bool {
        if !self.is_math() {
            return true;
        }
        let mut depth: i64 = 0;
        let mut chars = self.content.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '\\' => {
                    chars.next();
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0 && self.content.matches("\\left").count() == self.content.matches("\\right").count()
    }

    /// Text to hand to a renderer: the math content when well formed, otherwise the raw
    /// delimited source as literal text.
    pub fn display_text(&self) -> String {
        if self.is_well_formed() {
            self.content.clone()
        } else {
            self.source()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    Inline,
    Block,
}

/// Split text into literal, inline-math and block-math spans.
///
/// Empty input yields no spans. Adjacent literal runs are merged.
pub fn segment(text: &str) -> Vec<Span> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let mut mode = Mode::Text;

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let doubled = ch == '$' && chars.get(i + 1) == Some(&'$');

        match (mode, ch) {
            (Mode::Inline, '$') => {
                spans.push(Span::inline(std::mem::take(&mut buffer)));
                mode = Mode::Text;
                i += 1;
            }
            (Mode::Block, '$') if doubled => {
                spans.push(Span::block(std::mem::take(&mut buffer)));
                mode = Mode::Text;
                i += 2;
            }
            (Mode::Text, '$') => {
                push_text(&mut spans, std::mem::take(&mut buffer));
                if doubled {
                    mode = Mode::Block;
                    i += 2;
                } else {
                    mode = Mode::Inline;
                    i += 1;
                }
            }
            _ => {
                buffer.push(ch);
                i += 1;
            }
        }
    }

    // Dangling opener: keep it as literal text rather than inventing a closer.
    let dangling = match mode {
        Mode::Text => buffer,
        Mode::Inline => format!("${buffer}"),
        Mode::Block => format!("$${buffer}"),
    };
    push_text(&mut spans, dangling);

    spans
}

fn push_text(spans: &mut Vec<Span>, text: String) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(Span {
            kind: SpanKind::Text,
            content,
        }) => content.push_str(&text),
        _ => spans.push(Span::text(text)),
    }
}

/// Concatenate span sources back into the original text
pub fn reconstruct(spans: &[Span]) -> String {
    spans.iter().map(Span::source).collect()
}

/// Cheap pre-check: can this text contain any math span at all?
pub fn may_contain_math(text: &str) -> bool {
    text.contains('$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_text_is_one_span() {
        assert_eq!(segment("no math here"), vec![Span::text("no math here")]);
        assert!(segment("").is_empty());
    }

    #[test]
    fn inline_and_block_math() {
        let spans = segment("Solve $x^2$ then $$\\int f$$ done");
        assert_eq!(
            spans,
            vec![
                Span::text("Solve "),
                Span::inline("x^2"),
                Span::text(" then "),
                Span::block("\\int f"),
                Span::text(" done"),
            ]
        );
    }

    #[test]
    fn lone_dollar_inside_block_is_content() {
        assert_eq!(segment("$$a $ b$$"), vec![Span::block("a $ b")]);
    }

    #[test]
    fn dollar_pair_inside_inline_closes_then_reopens() {
        // `$a$$b$`: the second `$` closes inline math, the third opens a new one.
        assert_eq!(segment("$a$$b$"), vec![Span::inline("a"), Span::inline("b")]);
    }

    #[test]
    fn dangling_inline_opener_is_literal() {
        assert_eq!(segment("costs $5"), vec![Span::text("costs $5")]);
    }

    #[test]
    fn dangling_block_opener_is_literal() {
        assert_eq!(
            segment("$x$ and $$y"),
            vec![Span::inline("x"), Span::text(" and $$y")]
        );
    }

    #[test]
    fn empty_math_spans_survive() {
        assert_eq!(segment("$$$$"), vec![Span::block("")]);
        assert_eq!(reconstruct(&segment("a$$b")), "a$$b");
    }

    #[test]
    fn reconstruct_round_trips() {
        for source in ["a $b$ c", "$$x$$", "$", "$$", "$a$$", "x $$ y $ z $$", "100$ and $"] {
            assert_eq!(reconstruct(&segment(source)), source, "source: {source:?}");
        }
    }

    #[test]
    fn malformed_math_falls_back_to_source() {
        let broken = Span::inline("\\frac{1}{2");
        assert!(!broken.is_well_formed());
        assert_eq!(broken.display_text(), "$\\frac{1}{2$");

        let fine = Span::block("\\left( x \\right)");
        assert!(fine.is_well_formed());
        assert_eq!(fine.display_text(), "\\left( x \\right)");

        let escaped = Span::inline("\\{ a \\}");
        assert!(escaped.is_well_formed());
    }
}
