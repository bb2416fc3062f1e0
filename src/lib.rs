//! # quizbank
//!
//! A parser for quiz question banks.
//!
//! Question files come in several ad-hoc formats: line-marker text files (`#`/`+`/`-` and
//! `?`/`+`/`-`), numbered questions with lettered answers, and Word documents laid out as
//! choice, sequence and matching tables with a trailing answer key. All of them are parsed into
//! the same [`Question`](quiz::model::Question) model.
//!
//! File Layout
//!
//! src/quiz
//!   ├── model        Question / Answer shapes and their invariants
//!   ├── math         `$` / `$$` math span segmentation
//!   ├── lexing       Line classification for the text grammars
//!   ├── document     Paragraph / table node stream shared by every grammar
//!   ├── extraction   DOCX to node stream
//!   ├── parsing      The grammars themselves
//!   ├── formats      Grammar registry and dispatch
//!   ├── scoring      Answer evaluation
//!   ├── selection    Drawing subsets of a bank
//!   ├── catalog      Test catalog manifest
//!   ├── session      Quiz progress snapshots
//!   ├── loader       File and byte entry points
//!   └── config       Layered configuration
//!
//! For testing helpers, see the [testing module](quiz::testing).

pub mod quiz;
