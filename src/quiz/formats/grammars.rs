//! Built-in grammars

use super::registry::Grammar;
use crate::quiz::document::SourceDocument;
use crate::quiz::error::ParseError;
use crate::quiz::lexing::QuestionMarker;
use crate::quiz::model::Question;
use crate::quiz::parsing::marker::{looks_like_marker_format, parse_plain_format};
use crate::quiz::parsing::numbered::{looks_like_numbered_format, parse_numbered_format};
use crate::quiz::parsing::{parse_table_document, TableMarkers};

/// `1.` questions with `a)` answers
pub struct NumberedGrammar;

impl Grammar for NumberedGrammar {
    fn name(&self) -> &str {
        "numbered"
    }

    fn detect(&self, source: &SourceDocument) -> bool {
        looks_like_numbered_format(source.text())
    }

    fn parse(&self, source: &SourceDocument) -> Result<Vec<Question>, ParseError> {
        Ok(parse_numbered_format(source.text()))
    }

    fn description(&self) -> &str {
        "Numbered questions with lettered answers and optional answer-key lines"
    }
}

/// `#` or `?` questions with `+`/`-` answers
pub struct MarkerGrammar {
    marker: QuestionMarker,
}

impl MarkerGrammar {
    pub fn new(marker: QuestionMarker) -> Self {
        Self { marker }
    }

    pub fn hash() -> Self {
        Self::new(QuestionMarker::Hash)
    }

    pub fn question() -> Self {
        Self::new(QuestionMarker::Question)
    }
}

impl Grammar for MarkerGrammar {
    fn name(&self) -> &str {
        match self.marker {
            QuestionMarker::Hash => "hash-marker",
            QuestionMarker::Question => "question-marker",
        }
    }

    fn detect(&self, source: &SourceDocument) -> bool {
        looks_like_marker_format(source.text(), self.marker)
    }

    fn parse(&self, source: &SourceDocument) -> Result<Vec<Question>, ParseError> {
        Ok(parse_plain_format(source.text(), self.marker))
    }

    fn description(&self) -> &str {
        match self.marker {
            QuestionMarker::Hash => "'#' questions with '+'/'-' answers",
            QuestionMarker::Question => "'?' questions with '+'/'-' answers",
        }
    }
}

/// Choice, sequence and matching tables with a trailing answer key
#[derive(Default)]
pub struct TableGrammar {
    markers: TableMarkers,
}

impl TableGrammar {
    pub fn new(markers: TableMarkers) -> Self {
        Self { markers }
    }
}

impl Grammar for TableGrammar {
    fn name(&self) -> &str {
        "tables"
    }

    fn detect(&self, source: &SourceDocument) -> bool {
        source.tables().next().is_some() && self.markers.has_task_header(source)
    }

    fn parse(&self, source: &SourceDocument) -> Result<Vec<Question>, ParseError> {
        parse_table_document(source, &self.markers)
    }

    fn description(&self) -> &str {
        "Word-style tables: choice, sequence and matching with an answer-key table"
    }
}
