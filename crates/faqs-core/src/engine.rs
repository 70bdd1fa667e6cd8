//! Engine: visibility, accordion state and highlights for an FAQ corpus.
//!
//! [`FaqEngine`] owns the entries, the categories and the [`SearchState`].
//! Every operation is total: unknown ids and empty corpora degrade to no-ops
//! or to the "no results" state, never to an error.
//!
//! # Expansion rules
//!
//! - [`FaqEngine::toggle`] keeps at most one entry open.
//! - [`FaqEngine::set_category`] collapses everything.
//! - A non-empty [`FaqEngine::search`] goes through `set_category("all")`
//!   first, then opens every entry that matches in its answer but not its
//!   question. Any number of entries may be open at once while searching.
//! - An empty search restores visibility and clears highlights, but neither
//!   collapses entries nor resets the category selection.

use crate::corpus::Corpus;
use crate::highlight::Highlighter;
use crate::types::{
    normalize_query, Category, CategoryFilter, DeepLinkTarget, EntryHighlights, FaqEntry,
    SearchState,
};

#[derive(Debug, Clone)]
pub struct FaqEngine {
    entries: Vec<FaqEntry>,
    categories: Vec<Category>,
    state: SearchState,
    /// The query echoed back when a search leaves nothing visible.
    no_results: Option<String>,
}

impl FaqEngine {
    /// Build an engine over `categories` and `entries`. Everything starts
    /// visible and collapsed with the `all` filter selected.
    pub fn new(categories: Vec<Category>, entries: Vec<FaqEntry>) -> Self {
        let mut engine = Self {
            entries,
            categories,
            state: SearchState::default(),
            no_results: None,
        };
        for category in &mut engine.categories {
            category.visible = true;
        }
        for entry in &mut engine.entries {
            entry.visible = true;
            entry.expanded = false;
            entry.highlights.clear();
        }
        engine
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Select a category (`"all"` selects every category) and collapse every
    /// expanded entry. An unknown id leaves no category visible.
    pub fn set_category(&mut self, category_id: &str) {
        let filter = CategoryFilter::parse(category_id);
        for category in &mut self.categories {
            category.visible = filter.admits(&category.id);
        }
        let collapsed = self.collapse_all();
        tracing::debug!(category = %filter, collapsed, "engine: category selected");
        self.state.category = filter;
    }

    /// Apply a query. Debouncing is the caller's job; see
    /// [`crate::debounce`].
    pub fn search(&mut self, raw_query: &str) {
        let query = normalize_query(raw_query);

        if query.is_empty() {
            for entry in &mut self.entries {
                entry.visible = true;
                entry.highlights.clear();
            }
            for category in &mut self.categories {
                category.visible = true;
            }
            self.no_results = None;
            self.state.query = query;
            tracing::debug!("engine: search cleared");
            return;
        }

        // A search must never be hidden by a category filter.
        self.set_category(CategoryFilter::ALL);

        let highlighter = Highlighter::new(&query);
        let mut visible = 0usize;
        let mut auto_expanded = 0usize;

        for entry in &mut self.entries {
            entry.highlights.clear();

            let in_question = entry.question_matches(&query);
            let in_answer = entry.answer_matches(&query);
            entry.visible = in_question || in_answer;
            if !entry.visible {
                continue;
            }
            visible += 1;

            if let Some(h) = &highlighter {
                entry.highlights = EntryHighlights {
                    question: h.spans(entry.question()),
                    answer: entry.answer().iter().map(|b| h.spans(&b.text)).collect(),
                };
            }

            if in_answer && !in_question {
                entry.expanded = true;
                auto_expanded += 1;
            }
        }

        for category in &mut self.categories {
            category.visible = self
                .entries
                .iter()
                .any(|e| e.visible && e.category_id() == category.id);
        }

        self.no_results = (visible == 0).then(|| query.clone());
        tracing::debug!(query = %query, visible, auto_expanded, "engine: search applied");
        self.state.query = query;
    }

    /// Equivalent to `search("")`, for callers that bypass the debounce
    /// (e.g. an Escape key that clears the input).
    pub fn clear_search(&mut self) {
        self.search("");
    }

    /// Accordion toggle: close the entry if open, otherwise open it and close
    /// every other entry. Visibility is never touched.
    pub fn toggle(&mut self, entry_id: &str) {
        let Some(idx) = self.index_of(entry_id) else {
            tracing::debug!(entry = entry_id, "engine: toggle on unknown entry");
            return;
        };

        if self.entries[idx].expanded {
            self.entries[idx].expanded = false;
            tracing::debug!(entry = entry_id, "engine: collapsed");
            return;
        }

        self.collapse_all();
        self.entries[idx].expanded = true;
        tracing::debug!(entry = entry_id, "engine: expanded");
    }

    /// Open the entry named by a deep link and select its category.
    ///
    /// The category is selected first so that its collapse does not close
    /// the linked entry. Returns what the view needs to scroll to it, or
    /// `None` (with no state change) for an unknown id.
    pub fn open_deep_link(&mut self, entry_id: &str) -> Option<DeepLinkTarget> {
        let idx = self.index_of(entry_id)?;
        let category_id = self.entries[idx].category_id().to_string();

        self.set_category(&category_id);
        self.entries[idx].expanded = true;

        tracing::debug!(entry = entry_id, category = %category_id, "engine: deep link opened");
        Some(DeepLinkTarget { entry_id: entry_id.to_string(), category_id })
    }

    /// Open the entry named by the fragment of `location`
    /// (`faq.html#min-deposit`, or a bare `#min-deposit`).
    pub fn open_location(&mut self, location: &str) -> Option<DeepLinkTarget> {
        let id = fragment(location)?;
        self.open_deep_link(id)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn entry(&self, entry_id: &str) -> Option<&FaqEntry> {
        self.entries.iter().find(|e| e.id() == entry_id)
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    pub fn search_state(&self) -> &SearchState {
        &self.state
    }

    /// The query to echo in a "no results" message, if the last search left
    /// nothing visible.
    pub fn no_results(&self) -> Option<&str> {
        self.no_results.as_deref()
    }

    /// Whether the view should draw this entry: the entry itself and its
    /// category must both be visible.
    pub fn is_shown(&self, entry: &FaqEntry) -> bool {
        entry.visible
            && self
                .category(entry.category_id())
                .is_some_and(Category::is_visible)
    }

    /// Entries the view should draw, in corpus order.
    pub fn shown_entries(&self) -> impl Iterator<Item = &FaqEntry> + '_ {
        self.entries.iter().filter(move |e| self.is_shown(e))
    }

    /// Ids of every expanded entry, in corpus order.
    pub fn expanded_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.expanded)
            .map(FaqEntry::id)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn index_of(&self, entry_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id() == entry_id)
    }

    /// Collapse every entry; returns how many were open.
    fn collapse_all(&mut self) -> usize {
        let mut n = 0;
        for entry in &mut self.entries {
            if entry.expanded {
                entry.expanded = false;
                n += 1;
            }
        }
        n
    }
}

impl From<Corpus> for FaqEngine {
    fn from(corpus: Corpus) -> Self {
        Self::new(corpus.categories, corpus.entries)
    }
}

/// The fragment identifier of a location reference, without the `#`.
/// Returns `None` when there is no fragment or it is empty.
pub fn fragment(location: &str) -> Option<&str> {
    let (_, frag) = location.split_once('#')?;
    (!frag.is_empty()).then_some(frag)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
