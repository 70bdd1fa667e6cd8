//! Highlighter: locates literal, case-insensitive occurrences of a query.
//!
//! The query is always treated as literal text. It is escaped with
//! [`regex::escape`] before compilation, so `"$100 (approx.)"` matches exactly
//! that string and nothing else.
//!
//! Spans are byte ranges into the original text. Because spans are kept next
//! to the text rather than spliced into it, clearing them restores the text
//! exactly; there is no markup to strip and nothing to nest.

use std::ops::Range;

use regex::{Regex, RegexBuilder};

/// Default markers used by [`render_markup`] when the caller has no preference.
pub const DEFAULT_OPEN: &str = "<mark>";
pub const DEFAULT_CLOSE: &str = "</mark>";

/// A compiled literal matcher for one query.
#[derive(Debug, Clone)]
pub struct Highlighter {
    regex: Regex,
}

impl Highlighter {
    /// Compile a highlighter for `query`.
    ///
    /// Returns `None` for an empty query, or if the escaped pattern exceeds the
    /// regex size limit (a pathological paste). Callers treat `None` as "no
    /// spans", never as an error.
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(regex) => Some(Self { regex }),
            Err(err) => {
                tracing::warn!(error = %err, len = query.len(), "highlight: query not compilable");
                None
            }
        }
    }

    /// Byte ranges of every non-overlapping occurrence in `text`, left to right.
    pub fn spans(&self, text: &str) -> Vec<Range<usize>> {
        self.regex.find_iter(text).map(|m| m.range()).collect()
    }
}

/// A run of text that is either inside or outside a highlight span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split `text` into alternating plain/matched segments.
///
/// `spans` must be sorted, non-overlapping and on char boundaries, which is
/// what [`Highlighter::spans`] produces. Empty segments are skipped.
pub fn segments<'a>(text: &'a str, spans: &[Range<usize>]) -> Vec<Segment<'a>> {
    let mut out = Vec::with_capacity(spans.len() * 2 + 1);
    let mut pos = 0;
    for span in spans {
        if span.start > pos {
            out.push(Segment { text: &text[pos..span.start], matched: false });
        }
        if span.end > span.start {
            out.push(Segment { text: &text[span.clone()], matched: true });
        }
        pos = span.end;
    }
    if pos < text.len() {
        out.push(Segment { text: &text[pos..], matched: false });
    }
    out
}

/// Wrap every span of `text` in `open`/`close` markers.
pub fn render_markup(text: &str, spans: &[Range<usize>], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * (open.len() + close.len()));
    for seg in segments(text, spans) {
        if seg.matched {
            out.push_str(open);
            out.push_str(seg.text);
            out.push_str(close);
        } else {
            out.push_str(seg.text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn empty_query_has_no_highlighter() {
        assert!(Highlighter::new("").is_none());
    }

    #[test]
    fn matches_every_occurrence_case_insensitively() {
        let h = Highlighter::new("deposit").unwrap();
        let text = "Deposit now: the minimum DEPOSIT is small.";
        assert_eq!(h.spans(text), vec![0..7, 25..32]);
    }

    #[rstest]
    #[case("$100 (approx.)", "Fees are $100 (approx.) per year", vec![9..23])]
    #[case("$100 (approx.)", "Fees are $100 approx per year", vec![])]
    #[case("a.b", "axb a.b", vec![4..7])]
    #[case("[x]", "tick [x] or [y]", vec![5..8])]
    #[case("c++", "learn c++ or c", vec![6..9])]
    #[case("^start", "not ^start of line", vec![4..10])]
    #[case("\\d", "escape \\d literal 5", vec![7..9])]
    fn query_is_literal(#[case] query: &str, #[case] text: &str, #[case] expected: Vec<Range<usize>>) {
        let h = Highlighter::new(query).unwrap();
        assert_eq!(h.spans(text), expected);
    }

    #[test]
    fn occurrences_do_not_overlap() {
        let h = Highlighter::new("aa").unwrap();
        assert_eq!(h.spans("aaaaa"), vec![0..2, 2..4]);
    }

    #[test]
    fn markup_wraps_spans_only() {
        let text = "What is the minimum deposit?";
        let spans = Highlighter::new("deposit").unwrap().spans(text);
        insta::assert_snapshot!(
            render_markup(text, &spans, DEFAULT_OPEN, DEFAULT_CLOSE),
            @"What is the minimum <mark>deposit</mark>?"
        );
    }

    #[test]
    fn markup_without_spans_is_identity() {
        let text = "Nothing to see";
        assert_eq!(render_markup(text, &[], "[", "]"), text);
    }

    #[test]
    fn segments_cover_text_in_order() {
        let segs = segments("abXcdX", &[2..3, 5..6]);
        let joined: String = segs.iter().map(|s| s.text).collect();
        assert_eq!(joined, "abXcdX");
        assert_eq!(segs.iter().filter(|s| s.matched).count(), 2);
    }

    #[test]
    fn preserves_original_case_inside_span() {
        let text = "Withdrawal FEE";
        let spans = Highlighter::new("withdrawal fee").unwrap().spans(text);
        assert_eq!(render_markup(text, &spans, "<", ">"), "<Withdrawal FEE>");
    }

    proptest! {
        #[test]
        fn spans_are_sorted_disjoint_and_match_query(
            query in "[a-c$().]{1,3}",
            text in "[a-cA-C$(). ]{0,40}",
        ) {
            let h = Highlighter::new(&query).unwrap();
            let spans = h.spans(&text);
            let mut last_end = 0;
            for span in &spans {
                prop_assert!(span.start >= last_end);
                prop_assert!(span.end > span.start);
                prop_assert_eq!(text[span.clone()].to_lowercase(), query.to_lowercase());
                last_end = span.end;
            }
        }
    }
}
