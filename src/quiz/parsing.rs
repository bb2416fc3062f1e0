//! Parsing
//!
//!     Every grammar turns a source into an ordered `Vec<Question>`. Text grammars work line by
//!     line through the [`machine`] state machine; the table grammars walk the paragraph/table
//!     node stream of a [`SourceDocument`](crate::quiz::document::SourceDocument).
//!
//! Leniency
//!
//!     Text grammars drop individual incomplete questions (fewer than two answers, or no
//!     correct answer) and keep the rest. Table grammars are strict: any shape problem fails
//!     the whole grammar with `MalformedTable` so the dispatcher can try the next one.

pub mod answer_key;
pub mod machine;
pub mod marker;
pub mod numbered;
pub mod tables;

pub use marker::{parse_plain_format, parse_plain_format_auto};
pub use numbered::parse_numbered_format;
pub use tables::{parse_table_document, TableMarkers};
