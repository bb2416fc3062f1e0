//! Question-file grammars and dispatch
//!
//! Each supported file layout is a [`Grammar`]: a cheap detection predicate plus a parser. The
//! [`GrammarRegistry`] tries them in priority order and keeps the first usable result.

pub mod grammars;
pub mod registry;

pub use grammars::{MarkerGrammar, NumberedGrammar, TableGrammar};
pub use registry::{Grammar, GrammarRegistry};
