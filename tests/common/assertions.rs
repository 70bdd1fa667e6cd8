//! Domain-specific assertion macros for faqs harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* view flag was wrong and what the engine looked like
//! at the time.

// ---------------------------------------------------------------------------
// Visibility assertions
// ---------------------------------------------------------------------------

/// Assert the exact set of shown entry ids, in corpus order.
///
/// ```rust
/// assert_shown!(engine, ["fees", "withdrawal-time"]);
/// ```
#[macro_export]
macro_rules! assert_shown {
    ($engine:expr, [$($id:expr),* $(,)?]) => {{
        let engine: &faqs::FaqEngine = &$engine;
        let actual: Vec<&str> = engine.shown_entries().map(|e| e.id()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(
            actual, expected,
            "assert_shown! failed (query {:?}, category {})",
            engine.search_state().query, engine.search_state().category
        );
    }};
}

/// Assert that every entry is shown.
#[macro_export]
macro_rules! assert_all_shown {
    ($engine:expr) => {{
        let engine: &faqs::FaqEngine = &$engine;
        let hidden: Vec<&str> = engine
            .entries()
            .iter()
            .filter(|e| !engine.is_shown(e))
            .map(|e| e.id())
            .collect();
        if !hidden.is_empty() {
            panic!("assert_all_shown! failed: hidden entries {:?}", hidden);
        }
    }};
}

// ---------------------------------------------------------------------------
// Expansion assertions
// ---------------------------------------------------------------------------

/// Assert the exact set of expanded entry ids, in corpus order.
#[macro_export]
macro_rules! assert_expanded {
    ($engine:expr, [$($id:expr),* $(,)?]) => {{
        let engine: &faqs::FaqEngine = &$engine;
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(engine.expanded_ids(), expected, "assert_expanded! failed");
    }};
}

// ---------------------------------------------------------------------------
// Highlight assertions
// ---------------------------------------------------------------------------

/// Assert that an entry carries no highlight spans at all.
#[macro_export]
macro_rules! assert_no_highlights {
    ($engine:expr) => {{
        let engine: &faqs::FaqEngine = &$engine;
        for entry in engine.entries() {
            if !entry.highlights().is_empty() {
                panic!(
                    "assert_no_highlights! failed: `{}` still has {} span(s)",
                    entry.id(),
                    entry.highlights().count()
                );
            }
        }
    }};
}

/// Assert that every highlight span of `$entry_id` covers text equal
/// (ignoring case) to `$query`, and that there is at least one.
#[macro_export]
macro_rules! assert_highlights_query {
    ($engine:expr, $entry_id:expr, $query:expr) => {{
        let engine: &faqs::FaqEngine = &$engine;
        let id: &str = $entry_id;
        let query: String = $query.to_lowercase();
        let entry = engine
            .entry(id)
            .unwrap_or_else(|| panic!("assert_highlights_query!: no entry `{}`", id));
        let h = entry.highlights();
        if h.is_empty() {
            panic!("assert_highlights_query! failed: `{}` has no highlights", id);
        }
        for span in &h.question {
            pretty_assertions::assert_eq!(entry.question()[span.clone()].to_lowercase(), query);
        }
        for (block, spans) in entry.answer().iter().zip(&h.answer) {
            for span in spans {
                pretty_assertions::assert_eq!(block.text[span.clone()].to_lowercase(), query);
            }
        }
    }};
}
