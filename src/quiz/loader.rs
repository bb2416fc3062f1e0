//! File and byte entry points
//!
//! [`QuestionLoader`] routes a source by extension and hands the resulting
//! [`SourceDocument`] to its [`GrammarRegistry`]:
//!
//!     - `.txt`: UTF-8 text (a leading BOM is dropped).
//!     - `.docx`: ZIP container, see [extraction](crate::quiz::extraction).
//!     - `.doc` and anything else: `UnsupportedFormat`.
//!
//! Reading the file is the only I/O; [`QuestionLoader::load_path_async`] awaits it and then
//! parses synchronously.

use crate::quiz::config::QuizConfig;
use crate::quiz::document::SourceDocument;
use crate::quiz::error::ParseError;
use crate::quiz::extraction::extract_docx;
use crate::quiz::formats::{GrammarRegistry, TableGrammar};
use crate::quiz::model::Question;
use std::path::Path;

/// Source kinds recognized by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    Docx,
}

impl SourceKind {
    /// Classify a file name by its extension.
    pub fn from_name(name: &str) -> Result<Self, ParseError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "txt" => Ok(SourceKind::Text),
            "docx" => Ok(SourceKind::Docx),
            "doc" => Err(ParseError::UnsupportedFormat(
                "legacy .doc files are not supported, save the file as .docx".to_string(),
            )),
            "" => Err(ParseError::UnsupportedFormat(format!("{name} has no extension"))),
            other => Err(ParseError::UnsupportedFormat(format!(".{other}"))),
        }
    }
}

/// Build a source document from raw bytes.
pub fn read_source(kind: SourceKind, bytes: &[u8]) -> Result<SourceDocument, ParseError> {
    match kind {
        SourceKind::Text => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| ParseError::ExtractionFailure(format!("text file is not UTF-8: {e}")))?;
            Ok(SourceDocument::from_text(text))
        }
        SourceKind::Docx => Ok(SourceDocument::from_nodes(extract_docx(bytes)?)),
    }
}

pub struct QuestionLoader {
    registry: GrammarRegistry,
}

impl QuestionLoader {
    pub fn new(registry: GrammarRegistry) -> Self {
        Self { registry }
    }

    /// Build the registry described by a configuration: localized table markers and the
    /// grammar priority order.
    pub fn from_config(config: &QuizConfig) -> Result<Self, ParseError> {
        let markers = config
            .markers
            .compile()
            .map_err(|e| ParseError::InvalidConfig(format!("invalid marker pattern: {e}")))?;
        let mut registry = GrammarRegistry::with_defaults();
        registry.register(TableGrammar::new(markers));
        Ok(Self::new(registry.with_order(&config.dispatch.order)))
    }

    pub fn registry(&self) -> &GrammarRegistry {
        &self.registry
    }

    pub fn parse_document(&self, document: &SourceDocument) -> Result<Vec<Question>, ParseError> {
        self.registry.parse(document)
    }

    /// Parse a source held in memory; `name` only decides the format.
    pub fn load_bytes(&self, name: &str, bytes: &[u8]) -> Result<Vec<Question>, ParseError> {
        let kind = SourceKind::from_name(name)?;
        self.load_kind(Path::new(name), kind, bytes)
    }

    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Vec<Question>, ParseError> {
        let path = path.as_ref();
        let kind = SourceKind::from_name(&path.to_string_lossy())?;
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_kind(path, kind, &bytes)
    }

    pub async fn load_path_async(&self, path: impl AsRef<Path>) -> Result<Vec<Question>, ParseError> {
        let path = path.as_ref();
        let kind = SourceKind::from_name(&path.to_string_lossy())?;
        let bytes = tokio::fs::read(path).await.map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_kind(path, kind, &bytes)
    }

    fn load_kind(&self, path: &Path, kind: SourceKind, bytes: &[u8]) -> Result<Vec<Question>, ParseError> {
        let document = read_source(kind, bytes)?;
        let questions = self.parse_document(&document)?;
        tracing::info!(
            source = %path.display(),
            questions = questions.len(),
            "loaded question bank"
        );
        Ok(questions)
    }
}

impl Default for QuestionLoader {
    fn default() -> Self {
        Self::new(GrammarRegistry::with_defaults())
    }
}
