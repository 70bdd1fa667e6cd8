//! Error types for faqs-core.
//!
//! Engine operations are total and never fail. The only fallible boundary in
//! the core is loading an authored corpus, reported as [`CorpusError`].

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed corpus: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("duplicate category id `{0}`")]
    DuplicateCategory(String),

    #[error("`all` is reserved and cannot be used as a category id")]
    ReservedCategory,

    #[error("duplicate entry id `{0}`")]
    DuplicateEntry(String),

    #[error("entry `{entry}` names unknown category `{category}`")]
    UnknownCategory { entry: String, category: String },

    #[error("entry `{0}` has an empty question")]
    EmptyQuestion(String),
}
