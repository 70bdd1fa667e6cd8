//! Core types for faqs-core.
//!
//! This module defines the records the engine operates on: the [`FaqEntry`]
//! question/answer pair with its block-structured answer, the [`Category`]
//! grouping, and the [`SearchState`] owned by the engine.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Block-level structure inside an answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    #[default]
    Paragraph,
    ListItem,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockKind::Paragraph => write!(f, "paragraph"),
            BlockKind::ListItem => write!(f, "list_item"),
        }
    }
}

/// One paragraph or list item of an answer. Highlights are computed per block
/// so the view can keep the block structure intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerBlock {
    #[serde(default)]
    pub kind: BlockKind,
    pub text: String,
}

impl AnswerBlock {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self { kind: BlockKind::Paragraph, text: text.into() }
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        Self { kind: BlockKind::ListItem, text: text.into() }
    }
}

/// Highlight spans currently applied to an entry.
///
/// Spans are byte ranges into the original (not lower-cased) text. `answer`
/// holds one span list per [`AnswerBlock`], in block order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryHighlights {
    pub question: Vec<Range<usize>>,
    pub answer: Vec<Vec<Range<usize>>>,
}

impl EntryHighlights {
    /// True when no span is applied anywhere in the entry.
    pub fn is_empty(&self) -> bool {
        self.question.is_empty() && self.answer.iter().all(Vec::is_empty)
    }

    /// Total number of highlighted occurrences across question and answer.
    pub fn count(&self) -> usize {
        self.question.len() + self.answer.iter().map(Vec::len).sum::<usize>()
    }

    pub fn clear(&mut self) {
        self.question.clear();
        self.answer.clear();
    }
}

/// A single question/answer record.
///
/// Text content is fixed at construction; only the `expanded`, `visible` and
/// highlight state changes afterwards, and only through
/// [`FaqEngine`](crate::engine::FaqEngine).
#[derive(Debug, Clone, PartialEq)]
pub struct FaqEntry {
    id: String,
    category_id: String,
    question: String,
    answer: Vec<AnswerBlock>,
    /// Lower-cased question, computed once for matching.
    question_norm: String,
    /// Lower-cased answer blocks, computed once for matching. Each block is
    /// matched on its own.
    answer_norm: Vec<String>,
    pub(crate) expanded: bool,
    pub(crate) visible: bool,
    pub(crate) highlights: EntryHighlights,
}

impl FaqEntry {
    pub fn new(
        id: impl Into<String>,
        category_id: impl Into<String>,
        question: impl Into<String>,
        answer: Vec<AnswerBlock>,
    ) -> Self {
        let question = question.into();
        let question_norm = question.to_lowercase();
        let answer_norm = answer.iter().map(|b| b.text.to_lowercase()).collect();
        Self {
            id: id.into(),
            category_id: category_id.into(),
            question,
            answer,
            question_norm,
            answer_norm,
            expanded: false,
            visible: true,
            highlights: EntryHighlights::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &[AnswerBlock] {
        &self.answer
    }

    /// Plain answer text: blocks joined with `\n`.
    pub fn answer_text(&self) -> String {
        self.answer
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn highlights(&self) -> &EntryHighlights {
        &self.highlights
    }

    pub(crate) fn question_matches(&self, query: &str) -> bool {
        self.question_norm.contains(query)
    }

    pub(crate) fn answer_matches(&self, query: &str) -> bool {
        self.answer_norm.iter().any(|block| block.contains(query))
    }
}

/// A named grouping of entries with its own visibility flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub(crate) visible: bool,
}

impl Category {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), visible: true }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The active category selection. `all` is a sentinel, not a category id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL: &'static str = "all";

    /// Parse a category identifier; `"all"` maps to [`CategoryFilter::All`].
    pub fn parse(id: &str) -> Self {
        if id == Self::ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(id.to_string())
        }
    }

    /// Whether a category with `category_id` is shown under this filter.
    pub fn admits(&self, category_id: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => id == category_id,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "{}", Self::ALL),
            CategoryFilter::Only(id) => write!(f, "{id}"),
        }
    }
}

/// The engine's current query and category selection.
///
/// A new query or category selection replaces the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Normalised query: lower-cased and trimmed. Empty means no search.
    pub query: String,
    pub category: CategoryFilter,
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }
}

/// Lower-case and trim raw user input.
pub fn normalize_query(raw: &str) -> String {
    raw.to_lowercase().trim().to_string()
}

/// What a view needs to act on a deep link: which entry to scroll to, and
/// which category was selected for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkTarget {
    pub entry_id: String,
    pub category_id: String,
}
