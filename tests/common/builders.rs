//! Test builders: ergonomic constructors for entries and engines.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use faqs::{AnswerBlock, Category, Corpus, FaqEngine, FaqEntry};

// ---------------------------------------------------------------------------
// FaqEntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`FaqEntry`] test fixtures.
///
/// # Example
///
/// ```rust
/// let entry = FaqEntryBuilder::new("fees", "Fees")
///     .category("billing")
///     .paragraph("A 2% withdrawal fee applies.")
///     .list_item("Cards: 2%")
///     .build();
/// ```
pub struct FaqEntryBuilder {
    id: String,
    category: String,
    question: String,
    answer: Vec<AnswerBlock>,
}

impl FaqEntryBuilder {
    pub fn new(id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category: "general".to_string(),
            question: question.into(),
            answer: Vec::new(),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.answer.push(AnswerBlock::paragraph(text));
        self
    }

    pub fn list_item(mut self, text: impl Into<String>) -> Self {
        self.answer.push(AnswerBlock::list_item(text));
        self
    }

    pub fn build(self) -> FaqEntry {
        FaqEntry::new(self.id, self.category, self.question, self.answer)
    }
}

// ---------------------------------------------------------------------------
// EngineBuilder
// ---------------------------------------------------------------------------

/// Builds a validated [`Corpus`] and wraps it in a [`FaqEngine`].
#[derive(Default)]
pub struct EngineBuilder {
    categories: Vec<Category>,
    entries: Vec<FaqEntry>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, id: &str, label: &str) -> Self {
        self.categories.push(Category::new(id, label));
        self
    }

    pub fn entry(mut self, entry: FaqEntryBuilder) -> Self {
        self.entries.push(entry.build());
        self
    }

    pub fn corpus(self) -> Corpus {
        Corpus::new(self.categories, self.entries, Vec::new()).expect("test corpus must be valid")
    }

    pub fn build(self) -> FaqEngine {
        FaqEngine::from(self.corpus())
    }
}
