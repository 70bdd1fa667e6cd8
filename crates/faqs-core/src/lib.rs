//! faqs-core: FAQ search, filtering and highlighting.
//!
//! This crate exposes the engine and the small pieces around it as public
//! modules, plus the shared types used by the TUI and the binary.
//!
//! # Architecture
//!
//! ```text
//! Corpus ──► FaqEngine ◄── Debouncer ◄── raw input
//!               │
//!               └──► Highlighter spans ──► view
//! ```
//!
//! The engine is synchronous and single-threaded. Timing (debounce, banner
//! rotation) lives outside it and is driven by whoever owns the event loop.

pub mod config;
pub mod corpus;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod highlight;
pub mod rotation;
pub mod types;

pub use corpus::Corpus;
pub use engine::FaqEngine;
pub use error::CorpusError;
pub use types::{
    AnswerBlock, BlockKind, Category, CategoryFilter, DeepLinkTarget, EntryHighlights, FaqEntry,
    SearchState,
};
