//! Grammar registry
//!
//! Grammars are kept in priority order. [`GrammarRegistry::parse`] walks that order and returns
//! the first grammar result that is non-empty; a `MalformedTable` error or an empty result means
//! "not this format" and moves on to the next grammar. Any other error is returned as-is.

use crate::quiz::document::SourceDocument;
use crate::quiz::error::ParseError;
use crate::quiz::model::Question;

/// A question-file layout
pub trait Grammar: Send + Sync {
    /// Short identifier (e.g. "hash-marker", "tables")
    fn name(&self) -> &str;

    /// Cheap check: a few scans over the source, no full parse
    fn detect(&self, source: &SourceDocument) -> bool;

    fn parse(&self, source: &SourceDocument) -> Result<Vec<Question>, ParseError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Ordered collection of grammars
pub struct GrammarRegistry {
    grammars: Vec<Box<dyn Grammar>>,
}

impl GrammarRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        GrammarRegistry {
            grammars: Vec::new(),
        }
    }

    /// Register a grammar at the lowest priority.
    ///
    /// A grammar with the same name is replaced in place, keeping its priority.
    pub fn register<G: Grammar + 'static>(&mut self, grammar: G) {
        match self.grammars.iter().position(|g| g.name() == grammar.name()) {
            Some(i) => self.grammars[i] = Box::new(grammar),
            None => self.grammars.push(Box::new(grammar)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Grammar> {
        self.grammars
            .iter()
            .find(|g| g.name() == name)
            .map(|g| g.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Reorder by name. Named grammars come first in the given order; unknown names are
    /// ignored and unnamed grammars keep their relative order after the named ones.
    pub fn with_order<S: AsRef<str>>(mut self, order: &[S]) -> Self {
        let rank = |g: &Box<dyn Grammar>| {
            order
                .iter()
                .position(|name| name.as_ref() == g.name())
                .unwrap_or(order.len())
        };
        self.grammars.sort_by_key(rank);
        self
    }

    /// Grammar names in priority order
    pub fn list_grammars(&self) -> Vec<(&str, &str)> {
        self.grammars
            .iter()
            .map(|g| (g.name(), g.description()))
            .collect()
    }

    /// Parse with the first grammar that detects and produces questions.
    pub fn parse(&self, source: &SourceDocument) -> Result<Vec<Question>, ParseError> {
        for grammar in &self.grammars {
            if !grammar.detect(source) {
                tracing::debug!(grammar = grammar.name(), "grammar not detected");
                continue;
            }
            match grammar.parse(source) {
                Ok(questions) if !questions.is_empty() => {
                    tracing::debug!(
                        grammar = grammar.name(),
                        questions = questions.len(),
                        "grammar matched"
                    );
                    return Ok(questions);
                }
                Ok(_) => {
                    tracing::debug!(grammar = grammar.name(), "grammar produced no questions");
                }
                Err(err) if err.is_fallthrough() => {
                    tracing::warn!(grammar = grammar.name(), error = %err, "falling back to next grammar");
                }
                Err(err) => return Err(err),
            }
        }
        Err(ParseError::NoQuestionsFound)
    }

    /// Create a registry with the built-in grammars in default priority order
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::NumberedGrammar);
        registry.register(super::MarkerGrammar::hash());
        registry.register(super::MarkerGrammar::question());
        registry.register(super::TableGrammar::default());

        registry
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
