//! faqs: FAQ search, category filtering and highlighting.
//!
//! The engine and its supporting pieces live in `faqs-core`; the terminal
//! front-end lives in `faqs-tui`. This crate re-exports the core so that
//! integration tests and benches import one path, and adds the headless
//! output mode used by the binary.
//!
//! # Architecture
//!
//! ```text
//! Corpus ──► FaqEngine ◄── Debouncer ◄── keystrokes / stdin lines
//!               │
//!               ├──► faqs-tui (ratatui view)
//!               └──► headless reports (raw / jsonl)
//! ```

pub mod headless;

pub use faqs_core::{
    config, corpus, debounce, engine, highlight, rotation, AnswerBlock, BlockKind, Category,
    CategoryFilter, Corpus, CorpusError, DeepLinkTarget, EntryHighlights, FaqEngine, FaqEntry,
    SearchState,
};
