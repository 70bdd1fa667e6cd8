//! Corpus: the authored categories, entries and banner messages.
//!
//! Corpora are TOML documents parsed through the `config` crate. A default
//! corpus is embedded via [`include_str!`] so the binary works with no files
//! on disk.
//!
//! ```toml
//! messages = ["Rotating banner text"]
//!
//! [[categories]]
//! id = "billing"
//! label = "Deposits & Withdrawals"
//!
//! [[entries]]
//! id = "min-deposit"
//! category = "billing"
//! question = "What is the minimum deposit?"
//! answer = "A single paragraph, or a list of { kind, text } blocks."
//! ```

use std::collections::HashSet;
use std::path::Path;

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::CorpusError;
use crate::types::{AnswerBlock, Category, CategoryFilter, FaqEntry};

const DEFAULT_CORPUS_SRC: &str = include_str!("corpus/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawCategory {
    id: String,
    label: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    Text(String),
    Blocks(Vec<AnswerBlock>),
}

impl RawAnswer {
    fn into_blocks(self) -> Vec<AnswerBlock> {
        match self {
            RawAnswer::Text(text) => vec![AnswerBlock::paragraph(text)],
            RawAnswer::Blocks(blocks) => blocks,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    id: String,
    category: String,
    question: String,
    answer: RawAnswer,
}

#[derive(Debug, Deserialize)]
struct RawCorpus {
    #[serde(default)]
    messages: Vec<String>,
    #[serde(default)]
    categories: Vec<RawCategory>,
    #[serde(default)]
    entries: Vec<RawEntry>,
}

// ---------------------------------------------------------------------------
// Public Corpus type
// ---------------------------------------------------------------------------

/// A validated corpus, ready to hand to [`FaqEngine`](crate::engine::FaqEngine).
#[derive(Debug, Clone)]
pub struct Corpus {
    pub categories: Vec<Category>,
    pub entries: Vec<FaqEntry>,
    /// Rotating banner messages, in display order.
    pub messages: Vec<String>,
}

impl Corpus {
    /// Validate and assemble a corpus.
    ///
    /// Rejects duplicate ids, the reserved `all` category id, entries pointing
    /// at categories that do not exist, and blank questions.
    pub fn new(
        categories: Vec<Category>,
        entries: Vec<FaqEntry>,
        messages: Vec<String>,
    ) -> Result<Self, CorpusError> {
        let mut category_ids = HashSet::new();
        for category in &categories {
            if category.id == CategoryFilter::ALL {
                return Err(CorpusError::ReservedCategory);
            }
            if !category_ids.insert(category.id.as_str()) {
                return Err(CorpusError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut entry_ids = HashSet::new();
        for entry in &entries {
            if !entry_ids.insert(entry.id()) {
                return Err(CorpusError::DuplicateEntry(entry.id().to_string()));
            }
            if !category_ids.contains(entry.category_id()) {
                return Err(CorpusError::UnknownCategory {
                    entry: entry.id().to_string(),
                    category: entry.category_id().to_string(),
                });
            }
            if entry.question().trim().is_empty() {
                return Err(CorpusError::EmptyQuestion(entry.id().to_string()));
            }
        }

        Ok(Self { categories, entries, messages })
    }

    /// Parse a corpus from a TOML string.
    pub fn from_toml_str(src: &str) -> Result<Self, CorpusError> {
        let raw: RawCorpus = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let categories = raw
            .categories
            .into_iter()
            .map(|c| {
                let label = c.label.unwrap_or_else(|| c.id.clone());
                Category::new(c.id, label)
            })
            .collect();
        let entries = raw
            .entries
            .into_iter()
            .map(|e| FaqEntry::new(e.id, e.category, e.question, e.answer.into_blocks()))
            .collect();

        Self::new(categories, entries, raw.messages)
    }

    /// Read and parse a corpus file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let src = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_toml_str(&src)?;
        tracing::debug!(
            path = %path.display(),
            categories = corpus.categories.len(),
            entries = corpus.entries.len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    /// The corpus compiled into the binary.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the unit tests below
    /// rule out.
    pub fn embedded() -> Self {
        Self::from_toml_str(DEFAULT_CORPUS_SRC).expect("embedded corpus must be valid")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlockKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_corpus_loads() {
        let corpus = Corpus::embedded();
        assert_eq!(corpus.categories.len(), 5);
        assert!(corpus.entries.len() >= 10);
        assert!(!corpus.messages.is_empty());
        assert!(corpus.entries.iter().any(|e| e.id() == "min-deposit"));
    }

    #[test]
    fn string_answer_becomes_single_paragraph() {
        let corpus = Corpus::from_toml_str(
            r#"
            [[categories]]
            id = "billing"

            [[entries]]
            id = "fees"
            category = "billing"
            question = "Fees"
            answer = "A 2% withdrawal fee applies."
            "#,
        )
        .unwrap();
        let entry = &corpus.entries[0];
        assert_eq!(entry.answer(), &[AnswerBlock::paragraph("A 2% withdrawal fee applies.")]);
        // label falls back to the id
        assert_eq!(corpus.categories[0].label, "billing");
    }

    #[test]
    fn block_answer_keeps_kinds() {
        let corpus = Corpus::from_toml_str(
            r#"
            [[categories]]
            id = "account"
            label = "Account"

            [[entries]]
            id = "steps"
            category = "account"
            question = "How do I sign up?"
            answer = [
              { kind = "paragraph", text = "Steps:" },
              { kind = "list_item", text = "Register" },
              { text = "Defaults to paragraph" },
            ]
            "#,
        )
        .unwrap();
        let kinds: Vec<_> = corpus.entries[0].answer().iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BlockKind::Paragraph, BlockKind::ListItem, BlockKind::Paragraph]);
    }

    #[test]
    fn rejects_unknown_category() {
        let err = Corpus::new(
            vec![Category::new("billing", "Billing")],
            vec![FaqEntry::new("a", "trading", "Q?", vec![])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CorpusError::UnknownCategory { .. }));
        assert_eq!(err.to_string(), "entry `a` names unknown category `trading`");
    }

    #[test]
    fn rejects_duplicate_entry() {
        let err = Corpus::new(
            vec![Category::new("billing", "Billing")],
            vec![
                FaqEntry::new("a", "billing", "Q1?", vec![]),
                FaqEntry::new("a", "billing", "Q2?", vec![]),
            ],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateEntry(id) if id == "a"));
    }

    #[test]
    fn rejects_duplicate_and_reserved_categories() {
        let dup = Corpus::new(
            vec![Category::new("x", "X"), Category::new("x", "Y")],
            vec![],
            vec![],
        );
        assert!(matches!(dup, Err(CorpusError::DuplicateCategory(_))));

        let reserved = Corpus::new(vec![Category::new("all", "All")], vec![], vec![]);
        assert!(matches!(reserved, Err(CorpusError::ReservedCategory)));
    }

    #[test]
    fn rejects_blank_question() {
        let err = Corpus::new(
            vec![Category::new("g", "G")],
            vec![FaqEntry::new("blank", "g", "   ", vec![])],
            vec![],
        );
        assert!(matches!(err, Err(CorpusError::EmptyQuestion(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Corpus::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faq.toml");
        std::fs::write(
            &path,
            "[[categories]]\nid = \"g\"\n\n[[entries]]\nid = \"q\"\ncategory = \"g\"\nquestion = \"Why?\"\nanswer = \"Because.\"\n",
        )
        .unwrap();
        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.entries[0].answer_text(), "Because.");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Corpus::from_toml_str("[[entries]\nid = ").unwrap_err();
        assert!(matches!(err, CorpusError::Parse(_)));
    }
}
