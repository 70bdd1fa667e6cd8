//! FAQ list widget: the accordion pane.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k`, `↓` / `j` | Move the cursor between shown questions |
//! | `Enter` / `Space` | Open or close the question under the cursor |
//! | `←` / `h`, `→` / `l` | Previous / next category |
//! | `PageUp` / `PageDown` | Move the cursor one page |
//! | `g` / `Home` | Back to the first question |
//!
//! The cursor is tracked by entry id rather than by index, so it stays on the
//! same question while a search or category change reshuffles what is shown.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use faqs_core::highlight::segments;
use faqs_core::{BlockKind, CategoryFilter, FaqEngine, FaqEntry};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 5;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FaqListState {
    /// Id of the entry under the cursor.
    pub cursor: Option<String>,
    /// First rendered line; adjusted during render to keep the cursor in view.
    scroll: Cell<usize>,
}

impl FaqListState {
    pub fn new(engine: &FaqEngine) -> Self {
        let mut state = Self::default();
        state.sync(engine);
        state
    }

    /// Keep the cursor on a shown entry: if the current one was filtered
    /// out, move to the first shown entry (or to nothing).
    pub fn sync(&mut self, engine: &FaqEngine) {
        let still_shown = self
            .cursor
            .as_deref()
            .and_then(|id| engine.entry(id))
            .is_some_and(|e| engine.is_shown(e));
        if !still_shown {
            self.cursor = engine.shown_entries().next().map(|e| e.id().to_string());
            self.scroll.set(0);
        }
    }

    /// Put the cursor on `entry_id` (used after a deep link).
    pub fn select(&mut self, entry_id: &str, engine: &FaqEngine) {
        self.cursor = Some(entry_id.to_string());
        self.sync(engine);
    }

    /// Handle a navigation event. Toggling and category switching act on the
    /// engine directly.
    pub fn handle(&mut self, event: &AppEvent, engine: &mut FaqEngine) {
        match event {
            AppEvent::Nav(Direction::Up) => self.step(engine, -1),
            AppEvent::Nav(Direction::Down) => self.step(engine, 1),
            AppEvent::ScrollUp => self.step(engine, -(PAGE_STEP as isize)),
            AppEvent::ScrollDown => self.step(engine, PAGE_STEP as isize),
            AppEvent::ScrollToTop => {
                self.cursor = engine.shown_entries().next().map(|e| e.id().to_string());
                self.scroll.set(0);
                tracing::debug!("list: top");
            }
            AppEvent::Enter | AppEvent::Char(' ') => {
                if let Some(id) = self.cursor.clone() {
                    engine.toggle(&id);
                }
            }
            AppEvent::Nav(Direction::Left) => self.cycle_category(engine, -1),
            AppEvent::Nav(Direction::Right) => self.cycle_category(engine, 1),
            _ => {}
        }
    }

    fn step(&mut self, engine: &FaqEngine, delta: isize) {
        let ids: Vec<&str> = engine.shown_entries().map(FaqEntry::id).collect();
        if ids.is_empty() {
            self.cursor = None;
            return;
        }
        let pos = self
            .cursor
            .as_deref()
            .and_then(|c| ids.iter().position(|id| *id == c))
            .unwrap_or(0);
        let next = (pos as isize + delta).clamp(0, ids.len() as isize - 1) as usize;
        self.cursor = Some(ids[next].to_string());
        tracing::debug!(cursor = ids[next], "list: cursor moved");
    }

    fn cycle_category(&mut self, engine: &mut FaqEngine, delta: isize) {
        let next = adjacent_category(engine, delta);
        engine.set_category(&next);
        self.sync(engine);
    }
}

/// The category id `delta` steps away from the current selection, cycling
/// through `all` followed by every category in corpus order.
pub fn adjacent_category(engine: &FaqEngine, delta: isize) -> String {
    let mut ids = vec![CategoryFilter::ALL.to_string()];
    ids.extend(engine.categories().iter().map(|c| c.id.clone()));
    let current = engine.search_state().category.to_string();
    let pos = ids.iter().position(|id| *id == current).unwrap_or(0) as isize;
    let len = ids.len() as isize;
    ids[(pos + delta).rem_euclid(len) as usize].clone()
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FaqList<'a> {
    state: &'a FaqListState,
    engine: &'a FaqEngine,
    focused: bool,
    indent: usize,
    theme: &'a Theme,
}

impl<'a> FaqList<'a> {
    pub fn new(
        state: &'a FaqListState,
        engine: &'a FaqEngine,
        focused: bool,
        indent: u16,
        theme: &'a Theme,
    ) -> Self {
        Self { state, engine, focused, indent: indent as usize, theme }
    }
}

impl Widget for FaqList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let shown = self.engine.shown_entries().count();
        let title = format!("Questions ({shown})");
        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if shown == 0 {
            Paragraph::new(empty_message(self.engine, self.theme)).render(inner, buf);
            return;
        }

        // Leave one column for the scrollbar.
        let width = inner.width.saturating_sub(1) as usize;
        let height = inner.height as usize;

        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut cursor_range = (0, 0);
        for entry in self.engine.shown_entries() {
            let start = lines.len();
            let is_cursor = self.state.cursor.as_deref() == Some(entry.id());
            let mut entry_lines = render_entry(entry, width, self.indent, self.theme);
            if is_cursor && self.focused {
                if let Some(first) = entry_lines.first_mut() {
                    *first = std::mem::take(first)
                        .patch_style(Style::default().add_modifier(Modifier::REVERSED));
                }
            }
            lines.append(&mut entry_lines);
            if is_cursor {
                cursor_range = (start, lines.len());
            }
        }

        let scroll = keep_in_view(self.state.scroll.get(), cursor_range, height);
        self.state.scroll.set(scroll);

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect { x: inner.right().saturating_sub(1), width: 1, ..inner };

        let total = lines.len();
        let visible: Vec<Line<'static>> = lines.into_iter().skip(scroll).take(height).collect();
        Paragraph::new(visible).render(text_area, buf);

        if total > height {
            let mut sb_state = ScrollbarState::new(total)
                .position(scroll)
                .viewport_content_length(height);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                sb_area,
                buf,
                &mut sb_state,
            );
        }
    }
}

/// Adjust `scroll` so the cursor entry's first line is visible, and as much
/// of its answer as fits.
fn keep_in_view(scroll: usize, (start, end): (usize, usize), height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    if start < scroll {
        return start;
    }
    if end > scroll + height {
        return start.min(end - height);
    }
    scroll
}

fn empty_message(engine: &FaqEngine, theme: &Theme) -> Vec<Line<'static>> {
    match engine.no_results() {
        Some(query) => vec![
            Line::from(Span::styled("No results found", theme.no_results.add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                format!("We couldn't find any FAQs matching \"{query}\""),
                theme.no_results,
            )),
            Line::from(Span::styled(
                "Try different keywords, or press Esc to clear the search.",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "No questions in this category.",
            theme.no_results,
        ))],
    }
}

// ---------------------------------------------------------------------------
// Entry rendering
// ---------------------------------------------------------------------------

fn render_entry(entry: &FaqEntry, width: usize, indent: usize, theme: &Theme) -> Vec<Line<'static>> {
    let highlights = entry.highlights();
    let (marker, q_style) = if entry.is_expanded() {
        ("▾ ", theme.question_open)
    } else {
        ("▸ ", theme.question)
    };

    let mut lines = wrap_styled(
        &styled_pieces(entry.question(), &highlights.question, q_style, theme),
        width,
        vec![Span::styled(marker.to_string(), q_style)],
        2,
    );

    if !entry.is_expanded() {
        return lines;
    }

    for (i, block) in entry.answer().iter().enumerate() {
        let style = theme.block_style(block.kind);
        let spans = highlights.answer.get(i).map(Vec::as_slice).unwrap_or(&[]);
        let (prefix, cont) = match block.kind {
            BlockKind::Paragraph => (" ".repeat(indent), indent),
            BlockKind::ListItem => (format!("{}• ", " ".repeat(indent)), indent + 2),
        };
        lines.extend(wrap_styled(
            &styled_pieces(&block.text, spans, style, theme),
            width,
            vec![Span::styled(prefix, style)],
            cont,
        ));
    }
    lines
}

fn styled_pieces<'t>(
    text: &'t str,
    spans: &[std::ops::Range<usize>],
    base: Style,
    theme: &Theme,
) -> Vec<(&'t str, Style)> {
    segments(text, spans)
        .into_iter()
        .map(|seg| {
            let style = if seg.matched { theme.highlighted(base) } else { base };
            (seg.text, style)
        })
        .collect()
}

/// Word-wrap styled pieces to `width` columns. The first line starts with
/// `prefix`; continuation lines are indented by `indent` spaces. Words longer
/// than a line are split at character boundaries.
fn wrap_styled(
    pieces: &[(&str, Style)],
    width: usize,
    prefix: Vec<Span<'static>>,
    indent: usize,
) -> Vec<Line<'static>> {
    let width = width.max(indent + 1);
    let mut lines = Vec::new();
    let mut col: usize = prefix.iter().map(|s| s.content.chars().count()).sum();
    let mut spans = prefix;
    let mut has_text = false;

    let mut break_line = |spans: &mut Vec<Span<'static>>, col: &mut usize| {
        lines.push(Line::from(std::mem::take(spans)));
        spans.push(Span::raw(" ".repeat(indent)));
        *col = indent;
    };

    for (text, style) in pieces {
        for word in text.split_inclusive(' ') {
            let len = word.chars().count();
            if has_text && col + len > width {
                break_line(&mut spans, &mut col);
                has_text = false;
            }
            if col + len <= width {
                spans.push(Span::styled(word.to_string(), *style));
                col += len;
                has_text = true;
                continue;
            }
            let mut chunk = String::new();
            for ch in word.chars() {
                if col >= width {
                    if !chunk.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut chunk), *style));
                    }
                    break_line(&mut spans, &mut col);
                }
                chunk.push(ch);
                col += 1;
            }
            if !chunk.is_empty() {
                spans.push(Span::styled(chunk, *style));
                has_text = true;
            }
        }
    }
    lines.push(Line::from(spans));
    lines
}
