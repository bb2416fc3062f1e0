//! Main module for quizbank library functionality

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod math;
pub mod model;
pub mod parsing;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod testing;

pub use error::ParseError;
pub use formats::GrammarRegistry;
pub use loader::QuestionLoader;
pub use model::{Answer, Question, QuestionKind};
